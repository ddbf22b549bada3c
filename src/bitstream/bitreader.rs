//! BitReader: unpacks a byte source into single bits for the decoder.
//!
//! Every byte yields exactly 8 bits, most significant bit first. The reader knows
//! nothing about padding; the caller decides when to stop.
//!
//! NOTE: This module can read from any I/O source that supports the read() call.
//!

use std::io::ErrorKind;

use crate::error::HuffError;

const BUFFER_SIZE: usize = 64 * 1024;
const BIT_MASK: u8 = 0xff;

/// Reads a packed bitstream.
#[derive(Debug)]
pub struct BitReader<R> {
    buffer: Vec<u8>,
    cursor: usize,
    bit_index: usize,
    /// Bytes pulled from the source so far.
    bytes_read: u64,
    source: R,
}

impl<R: std::io::Read> BitReader<R> {
    /// Creates a new BitReader (with a 64k buffer).
    pub fn new(source: R) -> Self {
        Self {
            buffer: vec![0; BUFFER_SIZE],
            cursor: BUFFER_SIZE,
            bit_index: 0,
            bytes_read: 0,
            source,
        }
    }

    /// Check (and refill) buffer. Returns true if we have data, false if there is no more
    fn have_data(&mut self) -> Result<bool, HuffError> {
        // Only try to read more data when the buffer length is equal to the buffer cursor location
        if self.cursor == self.buffer.len() {
            self.buffer.resize(BUFFER_SIZE, 0);
            let size = loop {
                match self.source.read(&mut self.buffer) {
                    Ok(size) => break size,
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => return Err(HuffError::InputRead(e)),
                }
            };
            // If nothing came back from our read attempt, then we have no more data.
            if size == 0 {
                self.buffer.truncate(0);
                self.cursor = 0;
                return Ok(false);
            }
            self.bytes_read += size as u64;
            // Adjust the buffer if we read less than the buffer size
            self.buffer.truncate(size);
            // Reset the cursor and bit index
            self.cursor = 0;
            self.bit_index = 0;
        }
        Ok(true)
    }

    /// Return bit as Some(usize) (1 or 0), or None if there is no more data to read
    pub fn bit(&mut self) -> Result<Option<usize>, HuffError> {
        // If bit_index is == 0, check if we have a byte to read. Return None if we have no data
        if self.bit_index == 0 && !self.have_data()? {
            return Ok(None);
        }
        let bit = (self.buffer[self.cursor] & BIT_MASK >> self.bit_index) >> (7 - self.bit_index);
        self.bit_index += 1;
        self.bit_index %= 8;
        if self.bit_index == 0 {
            self.cursor += 1;
        }
        Ok(Some(bit as usize))
    }

    /// Return Some(true) if the next bit is 1, Some(false) if 0, consuming the bit,
    /// or None if there is no more data to read
    pub fn bool_bit(&mut self) -> Result<Option<bool>, HuffError> {
        Ok(self.bit()?.map(|bit| bit == 1))
    }

    /// Number of bytes taken from the source, including any not yet handed out as bits.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}

#[cfg(test)]
mod test {
    use std::io;

    use super::BitReader;
    use crate::error::HuffError;

    #[test]
    fn basic_test() {
        let x = [0b10000001_u8].as_slice();
        let mut br = BitReader::new(x);
        assert_eq!(br.bit().unwrap(), Some(1));
        for _ in 0..6 {
            assert_eq!(br.bit().unwrap(), Some(0));
        }
        assert_eq!(br.bit().unwrap(), Some(1));
        assert_eq!(br.bit().unwrap(), None);
        assert_eq!(br.bit().unwrap(), None);
    }

    #[test]
    fn bool_bit_test() {
        let x = [0b01010000, 0b1000_0000].as_slice();
        let mut br = BitReader::new(x);
        let mut got = vec![];
        while let Some(b) = br.bool_bit().unwrap() {
            got.push(b);
        }
        assert_eq!(got.len(), 16);
        assert_eq!(&got[..4], &[false, true, false, true]);
        assert!(got[8]);
        assert!(!got[9]);
    }

    #[test]
    fn loc_test() {
        let x = "Hello, world!".as_bytes();
        let mut br = BitReader::new(x);
        for _ in 0..41 {
            br.bit().unwrap();
        }
        assert_eq!(br.loc(), "[5.1]");
        assert_eq!(br.bytes_read(), 13);
    }

    #[test]
    fn read_error_test() {
        struct Broken;
        impl io::Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "gone"))
            }
        }
        let mut br = BitReader::new(Broken);
        assert!(matches!(br.bit(), Err(HuffError::InputRead(_))));
    }

    #[test]
    fn eight_bits_per_byte_test() {
        let mut br = BitReader::new([0b1010_0001_u8, 0xff].as_slice());
        let mut bits = vec![];
        while let Some(b) = br.bool_bit().unwrap() {
            bits.push(b);
        }
        assert_eq!(bits.len(), 16);
        assert_eq!(
            &bits[..8],
            &[true, false, true, false, false, false, false, true]
        );
        assert!(bits[8..].iter().all(|&b| b));
        let mut empty = BitReader::new([0_u8; 0].as_slice());
        assert_eq!(empty.bit().unwrap(), None);
    }
}
