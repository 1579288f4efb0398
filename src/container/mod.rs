//! Encrypted-container codec.
//!
//! `format` turns `(salt, iv, ciphertext)` into the JSON text stored in an
//! encrypted document and validates that text on the way back.

pub mod format;

pub use format::{parse, serialize, Container};
