//! Binary-to-text transcoding for container fields (standard base64).

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::errors::{FolderGuardError, Result};

/// Encode raw bytes as standard, padded base64.
pub fn encode_binary(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Decode standard base64 back to bytes.
pub fn decode_binary(text: &str) -> Result<Vec<u8>> {
    BASE64
        .decode(text)
        .map_err(|e| FolderGuardError::InvalidContainer(format!("invalid base64: {e}")))
}
