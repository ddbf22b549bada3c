//! The compression module drives the two operations of the huffzip codec.
//!
//! Compression happens in the following steps:
//! - Frequency count: one full pass over the input.
//! - Code tree: a Huffman tree over the counts plus one end-of-stream leaf.
//! - Code table: the root-to-leaf path of every symbol.
//! - Header: the frequency table, so the decoder can rebuild the same tree.
//! - Body: the code of every input byte, then the end-of-stream code, packed MSB first.
//!
//! Decompression reads the header, rebuilds the tree and walks it bit by bit
//! until it reaches the end-of-stream leaf. Pad bits after that are never read.
//!

pub mod compress;
pub mod decompress;
pub mod header;

/// Byte counts for one finished operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Report {
    pub bytes_in: u64,
    pub bytes_out: u64,
}

impl Report {
    /// Output size relative to input size. 0.0 for an empty input.
    pub fn ratio(&self) -> f64 {
        if self.bytes_in == 0 {
            0.0
        } else {
            self.bytes_out as f64 / self.bytes_in as f64
        }
    }
}
