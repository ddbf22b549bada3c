use std::io::{BufReader, BufWriter, Read, Write};

use log::{debug, info, warn};

use crate::bitstream::bitreader::BitReader;
use crate::error::HuffError;
use crate::huffman_coding::huffman::{build_tree, Node, NodeData};

use super::header::{encoded_len, read_header};
use super::Report;

const EOF_MESSAGE: &str = "bitstream ended before the end-of-stream code";
const OUT_BUFFER: usize = 64 * 1024;

/// Decompress an artifact produced by `compress` from `source` into `sink`.
///
/// The header is read and checked in full before any byte is written. If the body
/// runs dry before the end-of-stream code, the bytes decoded so far are already in
/// the sink and a format error is returned.
pub fn decompress<R: Read, W: Write>(source: R, sink: W) -> Result<Report, HuffError> {
    // The header is read a byte at a time, so buffer it. The BitReader then takes
    // over the same reader for the body.
    let mut f_in = BufReader::new(source);
    let freqs = read_header(&mut f_in)?;
    info!("Found a valid header with {} symbols.", freqs.len());

    let root = build_tree(&freqs);
    let mut f_out = BufWriter::with_capacity(OUT_BUFFER, sink);
    let mut br = BitReader::new(f_in);

    let written = decode(&root, &mut br, &mut f_out)?;
    f_out.flush().map_err(HuffError::OutputWrite)?;

    if written != freqs.total() {
        warn!(
            "Decoded {} bytes but the header counts {}.",
            written,
            freqs.total()
        );
    }
    info!("Wrote {} bytes.", written);
    Ok(Report {
        bytes_in: encoded_len(&freqs) as u64 + br.bytes_read(),
        bytes_out: written,
    })
}

/// Walk the tree one bit at a time, emitting a byte at every symbol leaf and
/// stopping at the end-of-stream leaf. Returns the number of bytes emitted.
fn decode<R: Read, W: Write>(
    root: &Node,
    br: &mut BitReader<R>,
    out: &mut W,
) -> Result<u64, HuffError> {
    let mut written = 0_u64;
    let mut node = root;
    loop {
        let (left, right) = match &node.node_data {
            NodeData::Kids(left, right) => (left.as_ref(), right.as_ref()),
            // Also the exit for an empty input, where the root is the only leaf.
            NodeData::Eos => {
                debug!("Found end of stream at {}.", br.loc());
                return Ok(written);
            }
            NodeData::Leaf(symbol) => {
                out.write_all(&[*symbol]).map_err(HuffError::OutputWrite)?;
                written += 1;
                node = root;
                continue;
            }
        };
        let bit = br
            .bool_bit()?
            .ok_or_else(|| HuffError::format(EOF_MESSAGE))?;
        node = if bit { right } else { left };
    }
}

#[cfg(test)]
mod test {
    use std::io;

    use super::decompress;
    use crate::compression::compress::compress;
    use crate::error::HuffError;

    fn squeeze(data: &[u8]) -> Vec<u8> {
        let mut out = vec![];
        compress(data, &mut out).unwrap();
        out
    }

    #[test]
    fn aaab_test() {
        let packed = vec![b'1', b'0', b'\t', b'a', 0, 0, 0, 3, b'b', 0, 0, 0, 1, 0b1110_0010];
        let mut out = vec![];
        let report = decompress(packed.as_slice(), &mut out).unwrap();
        assert_eq!(out, b"aaab");
        assert_eq!(report.bytes_out, 4);
        assert_eq!(report.bytes_in, 14);
    }

    #[test]
    fn empty_test() {
        let mut out = vec![];
        // Trailing bytes after an empty header are never looked at.
        decompress(&b"0\t\xff\xff"[..], &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn padding_ignored_test() {
        // Same body as aaab, but with the pad bit set and an extra byte of junk.
        let packed = vec![b'1', b'0', b'\t', b'a', 0, 0, 0, 3, b'b', 0, 0, 0, 1, 0b1110_0011, 0xff];
        let mut out = vec![];
        decompress(packed.as_slice(), &mut out).unwrap();
        assert_eq!(out, b"aaab");
    }

    #[test]
    fn bad_header_length_test() {
        // 7 is not a multiple of the entry size. Nothing may be written.
        let mut out = vec![];
        let result = decompress(&b"7\tab\0\0\0\x01c\xff"[..], &mut out);
        assert!(matches!(result, Err(HuffError::Format(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn truncated_body_test() {
        let mut packed = squeeze(b"It is done in the spirit of learning.");
        packed.truncate(packed.len() - 3);
        let mut out = vec![];
        let result = decompress(packed.as_slice(), &mut out);
        assert!(matches!(result, Err(HuffError::Format(_))));
    }

    #[test]
    fn single_symbol_test() {
        let data = vec![b'x'; 1000];
        let mut out = vec![];
        decompress(squeeze(&data).as_slice(), &mut out).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn read_error_test() {
        struct Broken;
        impl io::Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "unreadable"))
            }
        }
        let mut out = vec![];
        assert!(matches!(
            decompress(Broken, &mut out),
            Err(HuffError::InputRead(_))
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn body_read_error_test() {
        // A valid header, then the source fails.
        struct HeaderThenBroken(&'static [u8]);
        impl io::Read for HeaderThenBroken {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                if self.0.is_empty() {
                    return Err(io::Error::new(io::ErrorKind::Other, "unreadable"));
                }
                let n = buf.len().min(self.0.len());
                buf[..n].copy_from_slice(&self.0[..n]);
                self.0 = &self.0[n..];
                Ok(n)
            }
        }
        let source = HeaderThenBroken(b"10\ta\0\0\0\x03b\0\0\0\x01");
        let mut out = vec![];
        assert!(matches!(
            decompress(source, &mut out),
            Err(HuffError::InputRead(_))
        ));
    }

    #[test]
    fn write_error_test() {
        struct Full;
        impl io::Write for Full {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "no space left"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }
        assert!(matches!(
            decompress(squeeze(b"aaab").as_slice(), Full),
            Err(HuffError::OutputWrite(_))
        ));
    }
}
