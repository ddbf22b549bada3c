//! The bitstream module moves codes between bits and bytes.
//!
//! - bitpacker: packs code bits into bytes, most significant bit first, zero padding the last byte.
//! - bitreader: hands a byte source back out one bit at a time, in the same order.
//!
//! Neither side knows where the meaningful bits end. The end-of-stream code does.
//!
pub mod bitpacker;
pub mod bitreader;
