//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! The iteration count is fixed so every container written by any
//! release can be opened again with the same password and stored salt.
//! The derived key lives in a `DerivedKey` that wipes itself on drop and
//! never hands its bytes out of the crate.

use rand::RngCore;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::{FolderGuardError, Result};

/// Length of the salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// PBKDF2 iteration count. Changing it breaks every existing container.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// A 256-bit symmetric key usable only for AES-GCM encrypt/decrypt.
///
/// Not `Clone`, not serializable, and zeroed when dropped. Each
/// encrypt or decrypt call derives its own.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey(..)")
    }
}

/// Derive a key from `password` and `salt`.
///
/// Deterministic: the same password and salt always yield the same key.
pub fn derive_key(password: &[u8], salt: &[u8]) -> Result<DerivedKey> {
    if salt.is_empty() {
        return Err(FolderGuardError::KeyDerivationFailed(
            "salt must not be empty".into(),
        ));
    }

    let mut key = DerivedKey {
        bytes: [0u8; KEY_LEN],
    };
    pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, PBKDF2_ITERATIONS, &mut key.bytes);
    Ok(key)
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_key_debug_hides_bytes() {
        let key = derive_key(b"pw", &[7u8; SALT_LEN]).unwrap();
        assert_eq!(format!("{key:?}"), "DerivedKey(..)");
    }

    #[test]
    fn empty_salt_is_rejected() {
        assert!(matches!(
            derive_key(b"pw", &[]),
            Err(FolderGuardError::KeyDerivationFailed(_))
        ));
    }

    #[test]
    fn matches_known_pbkdf2_output() {
        // Independent check against pbkdf2_hmac_array with the same inputs.
        let expected =
            pbkdf2::pbkdf2_hmac_array::<Sha256, KEY_LEN>(b"password", b"saltsaltsaltsalt", 100_000);
        let key = derive_key(b"password", b"saltsaltsaltsalt").unwrap();
        assert_eq!(key.as_bytes(), &expected);
    }
}
