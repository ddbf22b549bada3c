//! Turns a code tree into the bit codes used by the compressor.
//!
//! A code is the path from the root to a leaf, `false` for every step to the left
//! child and `true` for every step to the right. No canonical reassignment is done;
//! the decoder walks the same tree and so must the encoder.

use log::trace;
use rustc_hash::FxHashMap;

use super::huffman::{Node, NodeData};

/// Codes for every symbol in a tree, plus the end-of-stream code.
#[derive(Debug, Clone, Default)]
pub struct CodeTable {
    codes: FxHashMap<u8, Vec<bool>>,
    eos: Vec<bool>,
}

impl CodeTable {
    /// Walk the tree once, depth first, and record the path to each leaf.
    pub fn from_tree(root: &Node) -> Self {
        let mut table = CodeTable::default();
        let mut path = Vec::new();
        return_leaves(root, &mut path, &mut table);
        table
    }

    /// Code for a symbol, or None if the symbol was not in the tree.
    pub fn code(&self, symbol: u8) -> Option<&[bool]> {
        self.codes.get(&symbol).map(|c| c.as_slice())
    }

    /// Code that marks the end of the stream. Empty only when the tree is a lone
    /// end-of-stream leaf.
    pub fn eos(&self) -> &[bool] {
        &self.eos
    }

    /// Number of symbol codes (the end-of-stream code is not counted).
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Symbol codes in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[bool])> + '_ {
        let mut symbols: Vec<u8> = self.codes.keys().copied().collect();
        symbols.sort_unstable();
        symbols
            .into_iter()
            .map(move |s| (s, self.codes[&s].as_slice()))
    }
}

/// Render a code as a string of '0' and '1'.
pub fn code_string(code: &[bool]) -> String {
    code.iter().map(|&b| if b { '1' } else { '0' }).collect()
}

/// Recursively walk the tree, pushing the direction taken onto `path`.
fn return_leaves(node: &Node, path: &mut Vec<bool>, table: &mut CodeTable) {
    match &node.node_data {
        NodeData::Kids(left_child, right_child) => {
            path.push(false);
            return_leaves(left_child, path, table);
            path.pop();
            path.push(true);
            return_leaves(right_child, path, table);
            path.pop();
        }
        NodeData::Leaf(symbol) => {
            trace!("Symbol {:#04x} gets code {}", symbol, code_string(path));
            table.codes.insert(*symbol, path.clone());
        }
        NodeData::Eos => {
            trace!("End of stream gets code {}", code_string(path));
            table.eos = path.clone();
        }
    }
}
