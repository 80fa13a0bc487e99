//! Prefix codes derived from a Huffman tree, and their reverse lookup table.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::error::CompressError;
use crate::tree::{HuffmanTree, Node};

/// A bit string, most significant (first emitted) bit first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    pub fn clear(&mut self) {
        self.bits.clear();
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }

    fn with_bit(&self, bit: bool) -> Self {
        let mut bits = Vec::with_capacity(self.bits.len() + 1);
        bits.extend_from_slice(&self.bits);
        bits.push(bit);
        Self { bits }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Code {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bits = s
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(format!("unexpected character {other:?} in code")),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { bits })
    }
}

impl From<Code> for String {
    fn from(code: Code) -> Self {
        code.to_string()
    }
}

impl TryFrom<String> for Code {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Symbol to code mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeTable {
    codes: BTreeMap<u8, Code>,
}

impl CodeTable {
    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    /// Code to symbol table for decoding.
    pub fn reverse(&self) -> ReverseCodeTable {
        let by_code = self
            .codes
            .iter()
            .map(|(&symbol, code)| (code.clone(), symbol))
            .collect();
        ReverseCodeTable { by_code }
    }
}

impl FromIterator<(u8, Code)> for CodeTable {
    fn from_iter<I: IntoIterator<Item = (u8, Code)>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().collect(),
        }
    }
}

/// Code to symbol mapping, the exact inverse of a [`CodeTable`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReverseCodeTable {
    by_code: HashMap<Code, u8>,
}

impl ReverseCodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, refusing empty codes and codes or symbols already present.
    pub fn insert(&mut self, code: Code, symbol: u8) -> Result<(), CompressError> {
        if code.is_empty() {
            return Err(CompressError::InvalidCode(String::new()));
        }
        if self.by_code.contains_key(&code) {
            return Err(CompressError::DuplicateCode(code.to_string()));
        }
        if self.by_code.values().any(|&s| s == symbol) {
            return Err(CompressError::DuplicateSymbol(symbol));
        }
        self.by_code.insert(code, symbol);
        Ok(())
    }

    pub fn get(&self, code: &Code) -> Option<u8> {
        self.by_code.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    pub fn max_code_len(&self) -> usize {
        self.by_code.keys().map(Code::len).max().unwrap_or(0)
    }

    /// Entries as `(code, symbol)` in ascending symbol order.
    pub fn entries(&self) -> Vec<(&Code, u8)> {
        let mut entries: Vec<_> = self.by_code.iter().map(|(code, &s)| (code, s)).collect();
        entries.sort_by_key(|&(_, symbol)| symbol);
        entries
    }
}

/// Walk the tree and record the root-to-leaf path of every symbol.
///
/// Left edges append `0`, right edges append `1`. A tree that is a single
/// leaf gets the one-bit code `0`.
pub fn assign_codes(tree: &HuffmanTree) -> CodeTable {
    let mut codes = BTreeMap::new();
    let mut stack = vec![(tree.root(), Code::new())];

    while let Some((id, prefix)) = stack.pop() {
        match *tree.node(id) {
            Node::Leaf { symbol, .. } => {
                let code = if prefix.is_empty() {
                    prefix.with_bit(false)
                } else {
                    prefix
                };
                codes.insert(symbol, code);
            }
            Node::Internal { left, right, .. } => {
                stack.push((right, prefix.with_bit(true)));
                stack.push((left, prefix.with_bit(false)));
            }
        }
    }

    CodeTable { codes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyTable;

    fn code(s: &str) -> Code {
        s.parse().unwrap()
    }

    fn codes_for(data: &[u8]) -> CodeTable {
        let tree = HuffmanTree::build(&FrequencyTable::analyze(data)).unwrap();
        assign_codes(&tree)
    }

    #[test]
    fn test_known_vector_codes() {
        let freq: FrequencyTable =
            [(b'a', 8), (b'b', 3), (b'c', 1), (b'd', 5), (b'e', 12), (b'f', 6)]
                .into_iter()
                .collect();
        let tree = HuffmanTree::build(&freq).unwrap();
        let codes = assign_codes(&tree);

        let expected = [
            (b'a', "01"),
            (b'b', "1001"),
            (b'c', "1000"),
            (b'd', "101"),
            (b'e', "11"),
            (b'f', "00"),
        ];
        for (symbol, bits) in expected {
            assert_eq!(codes.get(symbol), Some(&code(bits)), "symbol {}", symbol as char);
        }

        // weighted path length of an optimal code for these frequencies
        let cost: u64 = freq
            .iter()
            .map(|(s, f)| f * codes.get(s).unwrap().len() as u64)
            .sum();
        assert_eq!(cost, 83);
    }

    #[test]
    fn test_codes_are_prefix_free() {
        let codes = codes_for(b"she sells sea shells by the sea shore, 0123456789");
        let all: Vec<&Code> = codes.iter().map(|(_, c)| c).collect();
        for (i, a) in all.iter().enumerate() {
            assert!(!a.is_empty());
            for (j, b) in all.iter().enumerate() {
                if i != j {
                    assert!(!a.is_prefix_of(b), "{a} is a prefix of {b}");
                }
            }
        }
    }

    #[test]
    fn test_single_symbol_gets_one_bit() {
        let codes = codes_for(b"aaaa");
        assert_eq!(codes.len(), 1);
        assert_eq!(codes.get(b'a'), Some(&code("0")));
    }

    #[test]
    fn test_full_alphabet() {
        let data: Vec<u8> = (0..=255).collect();
        let codes = codes_for(&data);
        assert_eq!(codes.len(), 256);
        // uniform weights over 256 symbols give a perfectly balanced tree
        assert!(codes.iter().all(|(_, c)| c.len() == 8));
    }

    #[test]
    fn test_reverse_is_inverse() {
        let codes = codes_for(b"abracadabra");
        let reverse = codes.reverse();
        assert_eq!(reverse.len(), codes.len());
        for (symbol, c) in codes.iter() {
            assert_eq!(reverse.get(c), Some(symbol));
        }
        assert_eq!(reverse.max_code_len(), codes.iter().map(|(_, c)| c.len()).max().unwrap());
    }

    #[test]
    fn test_reverse_insert_rejects_duplicates() {
        let mut table = ReverseCodeTable::new();
        table.insert(code("0"), b'a').unwrap();
        assert!(matches!(
            table.insert(code("0"), b'b'),
            Err(CompressError::DuplicateCode(_))
        ));
        assert!(matches!(
            table.insert(code("1"), b'a'),
            Err(CompressError::DuplicateSymbol(b'a'))
        ));
        assert!(matches!(
            table.insert(Code::new(), b'c'),
            Err(CompressError::InvalidCode(_))
        ));
    }

    #[test]
    fn test_code_parse_and_display() {
        let c = code("1001");
        assert_eq!(c.bits(), &[true, false, false, true]);
        assert_eq!(c.to_string(), "1001");
        assert!("10x1".parse::<Code>().is_err());
        assert!(code("10").is_prefix_of(&c));
        assert!(!code("11").is_prefix_of(&c));
    }

    #[test]
    fn test_code_table_serializes_as_strings() {
        let table: CodeTable = [(b'a', code("0")), (b'b', code("10"))].into_iter().collect();
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"codes":{"97":"0","98":"10"}}"#);
        let parsed: CodeTable = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, table);
    }
}
