//! The huffman module builds the code tree and the codes derived from it.
//!
//! One tree is built per operation from the frequency table alone, so the
//! compressor and the decompressor build identical trees. The tree carries one
//! extra end-of-stream leaf of weight 1 that marks where the packed body ends.
//!

pub mod code_table;
pub mod huffman;
