use std::io::{BufWriter, Read, Write};

use log::{debug, info};

use crate::bitstream::bitpacker::BitPacker;
use crate::error::HuffError;
use crate::huffman_coding::code_table::{code_string, CodeTable};
use crate::huffman_coding::huffman::build_tree;
use crate::tools::freq_count::FreqTable;

use super::header::write_header;
use super::Report;

/*
    The whole input is read before anything is written: the header needs the
    complete frequency table, and the body is coded from the same buffer.

    Steps: count -> tree -> code table -> header -> packed body (codes of every
    input byte in order, then the end-of-stream code).
*/

/// Compress everything `source` yields into `sink`.
///
/// On error the sink may hold a partial artifact; the caller should discard it.
pub fn compress<R: Read, W: Write>(mut source: R, sink: W) -> Result<Report, HuffError> {
    let mut data = Vec::new();
    source
        .read_to_end(&mut data)
        .map_err(HuffError::InputRead)?;
    info!("Read {} bytes of input.", data.len());

    let freqs = FreqTable::from_data(&data)?;
    debug!("Found {} distinct symbols.", freqs.len());

    let codes = {
        let tree = build_tree(&freqs);
        CodeTable::from_tree(&tree)
        // The tree is not needed past this point.
    };
    debug!("End of stream code is {}.", code_string(codes.eos()));

    let mut f_out = BufWriter::new(sink);
    let header_len = write_header(&freqs, &mut f_out)?;

    let body = encode(&data, &codes);
    f_out.write_all(&body).map_err(HuffError::OutputWrite)?;
    f_out.flush().map_err(HuffError::OutputWrite)?;

    let report = Report {
        bytes_in: data.len() as u64,
        bytes_out: (header_len + body.len()) as u64,
    };
    info!(
        "Wrote {} bytes ({} header, {} body). Ratio {:.3}.",
        report.bytes_out,
        header_len,
        body.len(),
        report.ratio()
    );
    Ok(report)
}

/// Pack the codes for `data`, then the end-of-stream code.
///
/// `codes` must come from a tree built over the counts of this same `data`.
pub fn encode(data: &[u8], codes: &CodeTable) -> Vec<u8> {
    let mut bp = BitPacker::new(data.len() / 2 + 1);
    for &byte in data {
        let code = codes
            .code(byte)
            .expect("every input byte has a code in a table built from that input");
        bp.out_code(code);
    }
    bp.out_code(codes.eos());
    debug!("Body ends at {}.", bp.loc());
    bp.flush();
    debug!("Last byte holds {} meaningful bits (0 = all 8).", bp.last_bits);
    bp.output
}
