//! Cryptographic primitives for Folder Guard.
//!
//! This module provides:
//! - PBKDF2-HMAC-SHA256 password-based key derivation (`kdf`)
//! - AES-256-GCM encryption and decryption (`encryption`)
//! - base64 transcoding of binary fields (`encoding`)

pub mod encoding;
pub mod encryption;
pub mod kdf;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, derive_key, ...};
pub use encoding::{decode_binary, encode_binary};
pub use encryption::{decrypt, encrypt, IV_LEN};
pub use kdf::{derive_key, generate_salt, DerivedKey, KEY_LEN, PBKDF2_ITERATIONS, SALT_LEN};
