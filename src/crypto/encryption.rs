//! AES-256-GCM authenticated encryption.
//!
//! Each call to `encrypt` generates a fresh random 12-byte IV and returns
//! it next to the ciphertext; the 16-byte auth tag is appended to the
//! ciphertext. The container stores both, so unlike a packed blob the
//! IV is kept as its own field.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use zeroize::Zeroizing;

use super::kdf::DerivedKey;
use crate::errors::{FolderGuardError, Result};

/// Size of the AES-256-GCM nonce (IV) in bytes.
pub const IV_LEN: usize = 12;

/// Encrypt `plaintext` under `key` with a freshly generated IV.
///
/// Returns `(iv, ciphertext || tag)`.
pub fn encrypt(plaintext: &[u8], key: &DerivedKey) -> Result<([u8; IV_LEN], Vec<u8>)> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| FolderGuardError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| FolderGuardError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut iv = [0u8; IV_LEN];
    iv.copy_from_slice(&nonce);
    Ok((iv, ciphertext))
}

/// Decrypt `ciphertext` (tag included) with `iv` and `key`.
///
/// Any verification failure (wrong key, wrong IV, tampered bytes, or an
/// IV of the wrong size) is `AuthenticationFailed`. Nothing is returned
/// on failure.
pub fn decrypt(ciphertext: &[u8], iv: &[u8], key: &DerivedKey) -> Result<Zeroizing<Vec<u8>>> {
    if iv.len() != IV_LEN {
        return Err(FolderGuardError::AuthenticationFailed);
    }
    let nonce = Nonce::from_slice(iv);

    let cipher =
        Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| FolderGuardError::AuthenticationFailed)?;

    let plaintext = cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| FolderGuardError::AuthenticationFailed)?;

    Ok(Zeroizing::new(plaintext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::kdf::{derive_key, SALT_LEN};

    #[test]
    fn short_iv_is_an_authentication_failure() {
        let key = derive_key(b"pw", &[1u8; SALT_LEN]).unwrap();
        let (_, ct) = encrypt(b"hello", &key).unwrap();
        assert!(matches!(
            decrypt(&ct, &[0u8; 8], &key),
            Err(FolderGuardError::AuthenticationFailed)
        ));
    }

    #[test]
    fn ciphertext_carries_tag() {
        let key = derive_key(b"pw", &[2u8; SALT_LEN]).unwrap();
        let (_, ct) = encrypt(b"hello", &key).unwrap();
        assert_eq!(ct.len(), 5 + 16);
    }
}
