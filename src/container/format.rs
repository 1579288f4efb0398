//! The persisted encrypted-container format.
//!
//! A `.encrypted` document is a small JSON object:
//!
//! ```text
//! {
//!   "salt": "<base64, 16 bytes>",
//!   "iv": "<base64, 12 bytes>",
//!   "data": "<base64, AES-GCM ciphertext with tag>"
//! }
//! ```
//!
//! Parsing is strict and ordered: JSON object, then field presence (all
//! missing fields reported at once), then field types, then base64.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::crypto::encoding::decode_binary;
use crate::errors::{FolderGuardError, Result};

/// Field names in the order they are validated and reported.
const FIELDS: [&str; 3] = ["salt", "iv", "data"];

/// Decoded container contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Container {
    #[serde(serialize_with = "base64_encode")]
    pub salt: Vec<u8>,

    #[serde(serialize_with = "base64_encode")]
    pub iv: Vec<u8>,

    /// Ciphertext with the 16-byte auth tag appended.
    #[serde(rename = "data", serialize_with = "base64_encode")]
    pub ciphertext: Vec<u8>,
}

/// Parse and validate container text.
pub fn parse(text: &str) -> Result<Container> {
    let object = match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => map,
        _ => return Err(invalid("not JSON".into())),
    };

    let missing: Vec<&str> = FIELDS
        .iter()
        .copied()
        .filter(|name| !object.contains_key(*name))
        .collect();
    if !missing.is_empty() {
        return Err(invalid(format!("missing field: {}", missing.join(", "))));
    }

    let salt = string_field(&object, "salt")?;
    let iv = string_field(&object, "iv")?;
    let data = string_field(&object, "data")?;

    Ok(Container {
        salt: binary_field(salt, "salt")?,
        iv: binary_field(iv, "iv")?,
        ciphertext: binary_field(data, "data")?,
    })
}

/// Serialize a container as pretty-printed JSON.
pub fn serialize(salt: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<String> {
    let container = Container {
        salt: salt.to_vec(),
        iv: iv.to_vec(),
        ciphertext: ciphertext.to_vec(),
    };
    serde_json::to_string_pretty(&container)
        .map_err(|e| FolderGuardError::EncryptionFailed(format!("container serialization: {e}")))
}

fn string_field<'a>(object: &'a Map<String, Value>, name: &str) -> Result<&'a str> {
    object
        .get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| invalid(format!("field must be string: {name}")))
}

fn binary_field(text: &str, name: &str) -> Result<Vec<u8>> {
    decode_binary(text).map_err(|_| invalid(format!("invalid binary encoding: {name}")))
}

fn invalid(reason: String) -> FolderGuardError {
    FolderGuardError::InvalidContainer(reason)
}

fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&crate::crypto::encoding::encode_binary(data))
}
