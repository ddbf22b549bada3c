use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::{debug, trace};

use crate::tools::freq_count::FreqTable;

/// Weight given to the end-of-stream leaf.
pub const EOS_WEIGHT: u64 = 1;

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum NodeData {
    /// Left ("0") and right ("1") children.
    Kids(Box<Node>, Box<Node>),
    /// A byte value from the input.
    Leaf(u8),
    /// The end-of-stream marker. Exactly one per tree.
    Eos,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Node {
    pub weight: u64,
    /// Order in which the node entered the queue. Breaks weight ties.
    pub seq: u32,
    pub node_data: NodeData,
}

impl Node {
    /// Create a new node
    pub fn new(weight: u64, seq: u32, node_data: NodeData) -> Node {
        Node {
            weight,
            seq,
            node_data,
        }
    }

    /// Number of terminal nodes, including the end-of-stream leaf.
    pub fn leaf_count(&self) -> usize {
        match &self.node_data {
            NodeData::Kids(left, right) => left.leaf_count() + right.leaf_count(),
            _ => 1,
        }
    }

    /// Number of nodes with children.
    pub fn internal_count(&self) -> usize {
        match &self.node_data {
            NodeData::Kids(left, right) => 1 + left.internal_count() + right.internal_count(),
            _ => 0,
        }
    }

    /// Length of the longest path from this node to a leaf.
    pub fn depth(&self) -> usize {
        match &self.node_data {
            NodeData::Kids(left, right) => 1 + left.depth().max(right.depth()),
            _ => 0,
        }
    }
}

impl Ord for Node {
    /// Reversed so the BinaryHeap pops the lightest node first, and the
    /// earliest queued one when weights are equal.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Build the code tree for a frequency table.
///
/// One leaf per symbol is queued in ascending byte order, then the
/// end-of-stream leaf. The two lightest nodes are merged (first popped on the
/// left) until a single root is left. Compressor and decompressor both call
/// this with the same table and get the same tree.
pub fn build_tree(freqs: &FreqTable) -> Node {
    let mut heap = BinaryHeap::with_capacity(freqs.len() + 1);
    let mut seq = 0_u32;

    for (symbol, count) in freqs.iter() {
        heap.push(Node::new(count as u64, seq, NodeData::Leaf(symbol)));
        seq += 1;
    }
    heap.push(Node::new(EOS_WEIGHT, seq, NodeData::Eos));
    seq += 1;

    // There is always at least the end-of-stream leaf in the heap.
    while let Some(left_child) = heap.pop() {
        let right_child = match heap.pop() {
            Some(node) => node,
            None => {
                debug!(
                    "Built code tree with {} leaves, depth {}.",
                    left_child.leaf_count(),
                    left_child.depth()
                );
                return left_child;
            }
        };
        trace!(
            "Merging nodes {} (weight {}) and {} (weight {})",
            left_child.seq,
            left_child.weight,
            right_child.seq,
            right_child.weight
        );
        heap.push(Node::new(
            left_child.weight + right_child.weight,
            seq,
            NodeData::Kids(Box::new(left_child), Box::new(right_child)),
        ));
        seq += 1;
    }
    unreachable!("the end-of-stream leaf keeps the heap from starting empty")
}
