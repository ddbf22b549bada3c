//! Huffman coding file compressor.
//!
//! Version 0.1.0
//!
//! Compresses any byte stream with a single Huffman code built from the byte
//! frequencies of the whole input. The compressed file is a frequency header
//! followed by the packed codes, closed by an end-of-stream code.
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> huffzip -c test.txt`
//!
//! This will compress the file and create the file test.txt.zz.
//! `huffzip -d test.txt.zz` writes the restored data to test.txt.zz.yy.
//!
//! The library side works on any `Read` source and `Write` sink:
//!
//! ```
//! let mut packed = vec![];
//! huffzip::compress(&b"aaab"[..], &mut packed).unwrap();
//! let mut restored = vec![];
//! huffzip::decompress(packed.as_slice(), &mut restored).unwrap();
//! assert_eq!(restored, b"aaab");
//! ```
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use compression::compress::compress;
pub use compression::decompress::decompress;
pub use compression::Report;
pub use error::HuffError;
