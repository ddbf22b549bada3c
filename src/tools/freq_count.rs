use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::error::HuffError;

/// Symbol frequencies of one input, keyed by byte value.
///
/// Iteration is always in ascending byte order. Both the header writer and the
/// tree builder depend on that order, so the decoder rebuilds the same tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FreqTable {
    counts: BTreeMap<u8, u32>,
}

impl FreqTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every byte of `data`. Uses parallelism when the data set is over 64k.
    pub fn from_data(data: &[u8]) -> Result<Self, HuffError> {
        let freqs = freqs(data);
        let mut table = Self::new();
        for (symbol, &count) in freqs.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let count = u32::try_from(count).map_err(|_| HuffError::CountOverflow {
                symbol: symbol as u8,
                count,
            })?;
            table.insert(symbol as u8, count);
        }
        Ok(table)
    }

    /// Set the count for a symbol, returning the previous count if there was one.
    pub fn insert(&mut self, symbol: u8, count: u32) -> Option<u32> {
        self.counts.insert(symbol, count)
    }

    pub fn get(&self, symbol: u8) -> Option<u32> {
        self.counts.get(&symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts. Equals the input length for a table built by `from_data`.
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| c as u64).sum()
    }

    /// (symbol, count) pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.counts.iter().map(|(&s, &c)| (s, c))
    }
}

/// Returns a 256 entry frequency count of the input data.
fn freqs(data: &[u8]) -> Vec<u64> {
    if data.len() > 64_000 {
        // 16k is pretty much the sweet spot for chunk size.
        data.par_chunks(16_000)
            .fold(
                || vec![0_u64; 256],
                |mut freqs, chunk| {
                    chunk.iter().for_each(|&el| freqs[el as usize] += 1);
                    freqs
                },
            )
            .reduce(
                || vec![0_u64; 256],
                |s, f| s.iter().zip(&f).map(|(a, b)| a + b).collect::<Vec<u64>>(),
            )
    } else {
        let mut freqs = vec![0_u64; 256];
        data.iter().for_each(|&el| freqs[el as usize] += 1);
        freqs
    }
}
