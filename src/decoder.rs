//! Bit-level Huffman decoding
//!
//! Bits are read MSB first and accumulated until they spell a code from the
//! reverse table. Only the first `bit_len` bits are consumed, so padding in
//! the final byte never reaches the lookup.

use bitstream_io::{BigEndian, BitRead, BitReader};
use std::io::Cursor;

use crate::codes::{Code, ReverseCodeTable};
use crate::error::CompressError;

pub fn decode(
    payload: &[u8],
    bit_len: u64,
    table: &ReverseCodeTable,
) -> Result<Vec<u8>, CompressError> {
    let available = payload.len() as u64 * 8;
    if bit_len > available {
        return Err(CompressError::PayloadTruncated {
            expected: bit_len,
            available,
        });
    }

    let max_len = table.max_code_len();
    let mut r = BitReader::endian(Cursor::new(payload), BigEndian);
    let mut output = Vec::new();
    let mut current = Code::new();

    for _ in 0..bit_len {
        current.push(r.read_bit()?);
        if let Some(symbol) = table.get(&current) {
            output.push(symbol);
            current.clear();
        } else if current.len() >= max_len {
            return Err(CompressError::InvalidCode(current.to_string()));
        }
    }

    if !current.is_empty() {
        return Err(CompressError::IncompleteCode(current.to_string()));
    }

    Ok(output)
}
