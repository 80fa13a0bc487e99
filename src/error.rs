//! Error types for huffpack

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompressError {
    #[error("input of {size} bytes exceeds the configured limit of {limit} bytes")]
    InputTooLarge { size: usize, limit: usize },

    #[error("symbol {0:#04x} has no code in the code table")]
    UnknownSymbol(u8),

    #[error("header start marker not found")]
    MissingStartMarker,

    #[error("header end marker not found")]
    MissingEndMarker,

    #[error("invalid {field} in header: {value:?}")]
    InvalidCount { field: &'static str, value: String },

    #[error("code table declares {expected} entries, found {actual}")]
    TableLengthMismatch { expected: usize, actual: usize },

    #[error("malformed code table entry on line {line}: {reason}")]
    MalformedEntry { line: usize, reason: String },

    #[error("code {0} is assigned to more than one symbol")]
    DuplicateCode(String),

    #[error("symbol {0:#04x} appears more than once in the code table")]
    DuplicateSymbol(u8),

    #[error("incomplete code at end of payload: {0}")]
    IncompleteCode(String),

    #[error("bit sequence {0} does not match any code")]
    InvalidCode(String),

    #[error("payload holds {available} bits, header declares {expected}")]
    PayloadTruncated { expected: u64, available: u64 },

    #[error("{0} bytes follow the payload")]
    TrailingPayload(usize),

    #[error("decompressed output differs from the original input")]
    RoundTripMismatch,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
