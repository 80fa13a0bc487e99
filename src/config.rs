//! Configuration for huffpack

use serde::{Deserialize, Serialize};

use crate::error::CompressError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    /// Largest uncompressed buffer: the input to `compress` and the output of `decompress`.
    pub max_input_size: usize,
    /// Decode every freshly compressed container and compare it with the input.
    pub verify_roundtrip: bool,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            max_input_size: 100 * 1024 * 1024, // 100 MB
            verify_roundtrip: false,
        }
    }
}

impl CompressionConfig {
    /// Parse a JSON document; absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, CompressError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CompressError> {
        if self.max_input_size == 0 {
            return Err(CompressError::InvalidConfig(
                "max_input_size must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
