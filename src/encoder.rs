//! Bit packing of Huffman codes

use bitstream_io::{BigEndian, BitWrite, BitWriter};

use crate::codes::CodeTable;
use crate::error::CompressError;

/// Packed code bits plus the number of bits that are not padding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedPayload {
    pub bytes: Vec<u8>,
    pub bit_len: u64,
}

impl EncodedPayload {
    /// Zero bits appended to fill the final byte.
    pub fn padding_bits(&self) -> u8 {
        ((8 - self.bit_len % 8) % 8) as u8
    }
}

/// Concatenate the code of every byte of `data`, MSB first, zero-padding the
/// final byte.
pub fn encode(data: &[u8], codes: &CodeTable) -> Result<EncodedPayload, CompressError> {
    let mut bytes = Vec::new();
    let mut bit_len = 0u64;
    {
        let mut w = BitWriter::endian(&mut bytes, BigEndian);
        for &b in data {
            let code = codes.get(b).ok_or(CompressError::UnknownSymbol(b))?;
            for &bit in code.bits() {
                w.write_bit(bit)?;
            }
            bit_len += code.len() as u64;
        }
        w.byte_align()?;
    }
    Ok(EncodedPayload { bytes, bit_len })
}
