//! huffpack: Huffman compression with a self-describing container.
//!
//! The pipeline runs entirely over in-memory buffers:
//! - frequency analysis of the 256 byte symbols
//! - Huffman tree construction over a min-priority queue
//! - prefix code assignment and MSB-first bit packing
//! - a container header that carries the code table and exact payload bit length
//!
//! ```
//! let packed = huffpack::compress(b"abracadabra").unwrap();
//! assert_eq!(huffpack::decompress(&packed).unwrap(), b"abracadabra");
//! ```

pub mod codes;
pub mod config;
pub mod container;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frequency;
pub mod priority_queue;
pub mod tree;

use tracing::{debug, warn};

use crate::codes::{assign_codes, CodeTable};
use crate::config::CompressionConfig;
use crate::container::Header;
use crate::error::CompressError;
use crate::frequency::FrequencyTable;
use crate::tree::HuffmanTree;

/// Compressed output, header and payload kept apart
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CompressedOutput {
    pub header: Vec<u8>,
    pub payload: Vec<u8>,
    pub original_size: usize,
    pub codes: CodeTable,
    pub metadata: CompressionMetadata,
}

/// Metadata about the compression process
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CompressionMetadata {
    pub entropy_bits: f64,
    pub distinct_symbols: usize,
    pub payload_bits: u64,
    pub padding_bits: u8,
    pub ratio: f64,
}

impl CompressedOutput {
    pub fn compressed_size(&self) -> usize {
        self.header.len() + self.payload.len()
    }

    /// The full container: header immediately followed by payload.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.compressed_size());
        bytes.extend_from_slice(&self.header);
        bytes.extend_from_slice(&self.payload);
        bytes
    }
}

/// The main compressor engine
#[derive(Debug, Clone, Default)]
pub struct Compressor {
    config: CompressionConfig,
}

impl Compressor {
    /// Create a new compressor with the given configuration
    pub fn new(config: CompressionConfig) -> Result<Self, CompressError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CompressionConfig {
        &self.config
    }

    /// Compress a buffer. Empty input yields an empty table and payload.
    pub fn compress(&self, data: &[u8]) -> Result<CompressedOutput, CompressError> {
        self.check_size(data.len())?;

        let frequencies = FrequencyTable::analyze(data);
        let codes = match HuffmanTree::build(&frequencies) {
            Some(tree) => assign_codes(&tree),
            None => CodeTable::default(),
        };
        let payload = encoder::encode(data, &codes)?;
        let header = container::write_header(&Header::new(&codes, payload.bit_len));

        let compressed_size = header.len() + payload.bytes.len();
        let ratio = if data.is_empty() {
            1.0
        } else {
            compressed_size as f64 / data.len() as f64
        };
        let metadata = CompressionMetadata {
            entropy_bits: frequencies.entropy_bits(),
            distinct_symbols: frequencies.len(),
            payload_bits: payload.bit_len,
            padding_bits: payload.padding_bits(),
            ratio,
        };

        debug!(
            original_size = data.len(),
            symbols = codes.len(),
            bits = payload.bit_len,
            compressed_size,
            "compressed buffer"
        );

        let output = CompressedOutput {
            header,
            payload: payload.bytes,
            original_size: data.len(),
            codes,
            metadata,
        };

        if self.config.verify_roundtrip {
            self.verify(&output, data)?;
        }

        Ok(output)
    }

    /// Decompress a full container produced by [`Compressor::compress`].
    ///
    /// `max_input_size` bounds the decompressed output, so any container this
    /// compressor produced is accepted regardless of its header overhead.
    pub fn decompress(&self, container: &[u8]) -> Result<Vec<u8>, CompressError> {
        let output = self.decode_container(container)?;
        self.check_size(output.len())?;

        debug!(
            compressed_size = container.len(),
            original_size = output.len(),
            "decompressed buffer"
        );
        Ok(output)
    }

    fn decode_container(&self, container: &[u8]) -> Result<Vec<u8>, CompressError> {
        let (header, payload) = container::parse(container)?;
        let expected = header.payload_len();
        if payload.len() as u64 > expected {
            return Err(CompressError::TrailingPayload(
                (payload.len() as u64 - expected) as usize,
            ));
        }
        decoder::decode(payload, header.bit_len, &header.table)
    }

    fn verify(&self, output: &CompressedOutput, data: &[u8]) -> Result<(), CompressError> {
        let restored = self.decode_container(&output.to_bytes())?;
        if restored != data {
            warn!(original_size = data.len(), "round trip verification failed");
            return Err(CompressError::RoundTripMismatch);
        }
        Ok(())
    }

    fn check_size(&self, size: usize) -> Result<(), CompressError> {
        if size > self.config.max_input_size {
            return Err(CompressError::InputTooLarge {
                size,
                limit: self.config.max_input_size,
            });
        }
        Ok(())
    }
}

/// Compress with the default configuration and return the full container.
pub fn compress(data: &[u8]) -> Result<Vec<u8>, CompressError> {
    Ok(Compressor::default().compress(data)?.to_bytes())
}

/// Decompress a full container with the default configuration.
pub fn decompress(container: &[u8]) -> Result<Vec<u8>, CompressError> {
    Compressor::default().decompress(container)
}
