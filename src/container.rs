//! Container header codec
//!
//! A container is a line-delimited header followed by the packed payload:
//!
//! ```text
//! HS
//! <entry count>
//! <payload bit length>
//! <code>,<symbol>      one line per entry, symbol as a decimal byte value
//! HE
//! <payload bytes>
//! ```
//!
//! Codes are written as `0`/`1` strings and symbols as decimal numbers, so no
//! symbol byte can collide with the `,` or newline delimiters.

use crate::codes::{Code, CodeTable, ReverseCodeTable};
use crate::error::CompressError;

pub const HEADER_START: &[u8] = b"HS";
pub const HEADER_END: &[u8] = b"HE";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    pub table: ReverseCodeTable,
    /// Valid bits in the payload; the rest of the last byte is padding.
    pub bit_len: u64,
}

impl Header {
    pub fn new(codes: &CodeTable, bit_len: u64) -> Self {
        Self {
            table: codes.reverse(),
            bit_len,
        }
    }

    /// Payload size in bytes implied by `bit_len`.
    pub fn payload_len(&self) -> u64 {
        self.bit_len.div_ceil(8)
    }
}

/// Serialize a header, entries in ascending symbol order.
pub fn write_header(header: &Header) -> Vec<u8> {
    let mut out = Vec::with_capacity(16 + header.table.len() * 8);
    out.extend_from_slice(HEADER_START);
    out.push(b'\n');
    out.extend_from_slice(format!("{}\n{}\n", header.table.len(), header.bit_len).as_bytes());
    for (code, symbol) in header.table.entries() {
        out.extend_from_slice(format!("{code},{symbol}\n").as_bytes());
    }
    out.extend_from_slice(HEADER_END);
    out.push(b'\n');
    out
}

/// Parse a container into its header and the payload that follows it.
pub fn parse(data: &[u8]) -> Result<(Header, &[u8]), CompressError> {
    let mut lines = Lines::new(data);

    match lines.next_line() {
        Some(line) if line == HEADER_START => {}
        _ => return Err(CompressError::MissingStartMarker),
    }

    let count = parse_number::<usize>(lines.next_line(), "entry count")?;
    if count > 256 {
        return Err(CompressError::InvalidCount {
            field: "entry count",
            value: count.to_string(),
        });
    }
    let bit_len = parse_number::<u64>(lines.next_line(), "bit length")?;

    let mut table = ReverseCodeTable::new();
    for parsed in 0..count {
        let line = lines.next_line().ok_or(CompressError::MissingEndMarker)?;
        if line == HEADER_END {
            return Err(CompressError::TableLengthMismatch {
                expected: count,
                actual: parsed,
            });
        }
        let (code, symbol) = parse_entry(line, lines.line_no)?;
        table.insert(code, symbol)?;
    }

    let mut extra = 0;
    loop {
        match lines.next_line() {
            Some(line) if line == HEADER_END => break,
            Some(_) => extra += 1,
            None => return Err(CompressError::MissingEndMarker),
        }
    }
    if extra > 0 {
        return Err(CompressError::TableLengthMismatch {
            expected: count,
            actual: count + extra,
        });
    }

    Ok((Header { table, bit_len }, lines.rest()))
}

fn parse_number<T: std::str::FromStr>(
    line: Option<&[u8]>,
    field: &'static str,
) -> Result<T, CompressError> {
    let line = line.ok_or_else(|| CompressError::InvalidCount {
        field,
        value: String::new(),
    })?;
    std::str::from_utf8(line)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| CompressError::InvalidCount {
            field,
            value: String::from_utf8_lossy(line).into_owned(),
        })
}

fn parse_entry(line: &[u8], line_no: usize) -> Result<(Code, u8), CompressError> {
    let malformed = |reason: String| CompressError::MalformedEntry {
        line: line_no,
        reason,
    };

    let text = std::str::from_utf8(line).map_err(|_| malformed("not valid text".into()))?;
    let (code, symbol) = text
        .split_once(',')
        .ok_or_else(|| malformed(format!("missing ',' in {text:?}")))?;
    if code.is_empty() {
        return Err(malformed("empty code".into()));
    }
    let code: Code = code.parse().map_err(malformed)?;
    let symbol: u8 = symbol
        .parse()
        .map_err(|_| malformed(format!("invalid symbol {symbol:?}")))?;
    Ok((code, symbol))
}

/// Splits a byte buffer on `\n` without interpreting anything past the
/// current position.
struct Lines<'a> {
    data: &'a [u8],
    pos: usize,
    line_no: usize,
}

impl<'a> Lines<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            line_no: 0,
        }
    }

    fn next_line(&mut self) -> Option<&'a [u8]> {
        if self.pos >= self.data.len() {
            return None;
        }
        let remaining = &self.data[self.pos..];
        self.line_no += 1;
        match remaining.iter().position(|&b| b == b'\n') {
            Some(end) => {
                self.pos += end + 1;
                Some(&remaining[..end])
            }
            None => {
                self.pos = self.data.len();
                Some(remaining)
            }
        }
    }

    fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }
}
