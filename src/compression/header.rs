//! The frequency header that starts every compressed file.
//!
//! Layout:
//! - byte length of the entry region as decimal ASCII
//! - a tab
//! - one 5 byte entry per symbol, ascending: the symbol, then its count as a big-endian u32
//!
//! The decoder rebuilds the code tree from this header alone.

use std::io::{self, Read, Write};

use log::debug;

use crate::error::HuffError;
use crate::tools::freq_count::FreqTable;

/// Bytes per header entry: one symbol byte and a 4 byte count.
pub const ENTRY_SIZE: usize = 5;
const SEPARATOR: u8 = b'\t';
/// Longest length field we accept. u32::MAX has 10 digits.
const MAX_DIGITS: usize = 10;

/// Size in bytes of the header written for `freqs`.
pub fn encoded_len(freqs: &FreqTable) -> usize {
    let entries_len = freqs.len() * ENTRY_SIZE;
    entries_len.to_string().len() + 1 + entries_len
}

/// Write the header for `freqs`. Returns the number of bytes written.
pub fn write_header<W: Write>(freqs: &FreqTable, sink: &mut W) -> Result<usize, HuffError> {
    let entries_len = freqs.len() * ENTRY_SIZE;
    let mut header = Vec::with_capacity(encoded_len(freqs));
    header.extend_from_slice(entries_len.to_string().as_bytes());
    header.push(SEPARATOR);
    for (symbol, count) in freqs.iter() {
        header.push(symbol);
        header.extend_from_slice(&count.to_be_bytes());
    }
    sink.write_all(&header).map_err(HuffError::OutputWrite)?;
    debug!(
        "Wrote header with {} entries ({} bytes).",
        freqs.len(),
        header.len()
    );
    Ok(header.len())
}

/// Read a header and rebuild the frequency table.
///
/// The whole header is validated before anything is returned, so a bad header
/// never leads to output.
pub fn read_header<R: Read>(source: &mut R) -> Result<FreqTable, HuffError> {
    let entries_len = read_length(source)?;
    if entries_len % ENTRY_SIZE != 0 {
        return Err(HuffError::format(format!(
            "header length {} is not a multiple of {}",
            entries_len, ENTRY_SIZE
        )));
    }
    let entries = entries_len / ENTRY_SIZE;
    if entries > 256 {
        return Err(HuffError::format(format!(
            "header declares {} symbols, at most 256 are possible",
            entries
        )));
    }

    let mut freqs = FreqTable::new();
    let mut entry = [0_u8; ENTRY_SIZE];
    for i in 0..entries {
        source
            .read_exact(&mut entry)
            .map_err(|e| truncated(e, i, entries))?;
        let symbol = entry[0];
        let count = u32::from_be_bytes([entry[1], entry[2], entry[3], entry[4]]);
        if freqs.insert(symbol, count).is_some() {
            return Err(HuffError::format(format!(
                "symbol {:#04x} appears twice in the header",
                symbol
            )));
        }
    }
    debug!("Read header with {} entries.", entries);
    Ok(freqs)
}

/// Read the decimal length field and its trailing separator.
fn read_length<R: Read>(source: &mut R) -> Result<usize, HuffError> {
    let mut digits = String::with_capacity(MAX_DIGITS);
    let mut byte = [0_u8; 1];
    loop {
        source.read_exact(&mut byte).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => {
                HuffError::format("stream ended inside the header length")
            }
            _ => HuffError::InputRead(e),
        })?;
        match byte[0] {
            SEPARATOR => break,
            b @ b'0'..=b'9' if digits.len() < MAX_DIGITS => digits.push(b as char),
            b'0'..=b'9' => return Err(HuffError::format("header length field is too long")),
            other => {
                return Err(HuffError::format(format!(
                    "unexpected byte {:#04x} in header length",
                    other
                )))
            }
        }
    }
    if digits.is_empty() {
        return Err(HuffError::format("header length is missing"));
    }
    digits
        .parse::<usize>()
        .map_err(|e| HuffError::format(format!("bad header length {}: {}", digits, e)))
}

fn truncated(e: io::Error, index: usize, entries: usize) -> HuffError {
    match e.kind() {
        io::ErrorKind::UnexpectedEof => HuffError::format(format!(
            "header ended after {} of {} entries",
            index, entries
        )),
        _ => HuffError::InputRead(e),
    }
}

#[cfg(test)]
mod test {
    use super::{encoded_len, read_header, write_header};
    use crate::error::HuffError;
    use crate::tools::freq_count::FreqTable;

    fn round_trip(freqs: &FreqTable) -> FreqTable {
        let mut buf = vec![];
        write_header(freqs, &mut buf).unwrap();
        read_header(&mut buf.as_slice()).unwrap()
    }

    #[test]
    fn layout_test() {
        let freqs = FreqTable::from_data(b"aaab").unwrap();
        let mut buf = vec![];
        let written = write_header(&freqs, &mut buf).unwrap();
        assert_eq!(written, buf.len());
        assert_eq!(encoded_len(&freqs), 13);
        assert_eq!(
            buf,
            vec![b'1', b'0', b'\t', b'a', 0, 0, 0, 3, b'b', 0, 0, 0, 1]
        );
    }

    #[test]
    fn empty_test() {
        let mut buf = vec![];
        write_header(&FreqTable::new(), &mut buf).unwrap();
        assert_eq!(buf, b"0\t");
        assert!(round_trip(&FreqTable::new()).is_empty());
    }

    #[test]
    fn round_trip_test() {
        let mut freqs = FreqTable::new();
        for s in 0..=255_u8 {
            freqs.insert(s, (s as u32).wrapping_mul(0x0101_0101));
        }
        freqs.insert(b'\t', 0);
        freqs.insert(b'7', u32::MAX);
        assert_eq!(round_trip(&freqs), freqs);
        // "1280\t" plus 256 entries
        assert_eq!(encoded_len(&freqs), 5 + 1280);
    }

    #[test]
    fn stops_at_header_end_test() {
        let freqs = FreqTable::from_data(b"xy").unwrap();
        let mut buf = vec![];
        write_header(&freqs, &mut buf).unwrap();
        buf.extend_from_slice(&[0xaa, 0xbb]);
        let mut source = buf.as_slice();
        assert_eq!(read_header(&mut source).unwrap(), freqs);
        assert_eq!(source, &[0xaa_u8, 0xbb][..]);
    }

    #[test]
    fn bad_multiple_test() {
        let buf = b"7\tabcdefg".to_vec();
        assert!(matches!(
            read_header(&mut buf.as_slice()),
            Err(HuffError::Format(_))
        ));
    }

    #[test]
    fn truncated_test() {
        let buf = vec![b'1', b'0', b'\t', b'a', 0, 0, 0, 3, b'b', 0];
        assert!(matches!(
            read_header(&mut buf.as_slice()),
            Err(HuffError::Format(_))
        ));
    }

    #[test]
    fn bad_length_test() {
        for bad in [&b"\t"[..], b"1x\t", b"", b"10", b"12345678901\t", b"1285\t"] {
            assert!(
                matches!(read_header(&mut &bad[..]), Err(HuffError::Format(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn duplicate_symbol_test() {
        let buf = vec![b'1', b'0', b'\t', b'a', 0, 0, 0, 3, b'a', 0, 0, 0, 1];
        assert!(matches!(
            read_header(&mut buf.as_slice()),
            Err(HuffError::Format(_))
        ));
    }
}
