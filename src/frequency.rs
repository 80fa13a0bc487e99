//! Byte frequency analysis

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Occurrence count of every symbol present in a buffer.
///
/// Symbols that never occur have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyTable {
    counts: BTreeMap<u8, u64>,
}

impl FrequencyTable {
    /// Count every byte of `data`.
    pub fn analyze(data: &[u8]) -> Self {
        let mut freq = [0u64; 256];
        for &b in data {
            freq[b as usize] += 1;
        }
        freq.iter()
            .enumerate()
            .map(|(symbol, &count)| (symbol as u8, count))
            .collect()
    }

    pub fn get(&self, symbol: u8) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, equal to the length of the analyzed buffer.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }

    /// Shannon entropy in bits per byte.
    pub fn entropy_bits(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let len = total as f64;
        let mut entropy = 0.0;
        for &f in self.counts.values() {
            let p = f as f64 / len;
            entropy -= p * p.log2();
        }
        entropy
    }
}

impl FromIterator<(u8, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        let mut counts = BTreeMap::new();
        for (symbol, count) in iter {
            if count > 0 {
                *counts.entry(symbol).or_insert(0) += count;
            }
        }
        Self { counts }
    }
}

impl fmt::Display for FrequencyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (symbol, count) in self.iter() {
            if symbol.is_ascii_graphic() || symbol == b' ' {
                writeln!(f, "{}: {}", symbol as char, count)?;
            } else {
                writeln!(f, "{:#04x}: {}", symbol, count)?;
            }
        }
        Ok(())
    }
}
