//! Integration tests for the encrypted-container codec.

use folderguard::container::{parse, serialize};
use folderguard::crypto::{decrypt, derive_key, encode_binary, encrypt, generate_salt};
use folderguard::FolderGuardError;

fn format_reason(text: &str) -> String {
    match parse(text) {
        Err(FolderGuardError::InvalidContainer(reason)) => reason,
        other => panic!("expected InvalidContainer, got {other:?}"),
    }
}

#[test]
fn full_pipeline_through_container_text() {
    let password = b"Tr7!kq#Vz2@Lm9$xW";
    let salt = generate_salt();
    let key = derive_key(password, &salt).unwrap();
    let (iv, ct) = encrypt(b"# Secret plans", &key).unwrap();

    let text = serialize(&salt, &iv, &ct).unwrap();

    let container = parse(&text).unwrap();
    assert_eq!(container.salt, salt.to_vec());
    assert_eq!(container.iv, iv.to_vec());

    let key_again = derive_key(password, &container.salt).unwrap();
    let plain = decrypt(&container.ciphertext, &container.iv, &key_again).unwrap();
    assert_eq!(plain.as_slice(), b"# Secret plans");
}

#[test]
fn serialized_text_is_a_plain_json_object() {
    let text = serialize(&[0; 16], &[0; 12], &[0; 4]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let obj = value.as_object().unwrap();
    assert_eq!(obj.len(), 3);
    assert_eq!(obj["salt"], encode_binary(&[0; 16]));
    assert_eq!(obj["iv"], encode_binary(&[0; 12]));
    assert_eq!(obj["data"], encode_binary(&[0; 4]));
}

#[test]
fn missing_iv_is_reported() {
    let reason = format_reason(r#"{"salt": "AAAA", "data": "AAAA"}"#);
    assert_eq!(reason, "missing field: iv");
}

#[test]
fn numeric_salt_is_a_type_error() {
    let reason = format_reason(r#"{"salt": 42, "iv": "AAAA", "data": "AAAA"}"#);
    assert_eq!(reason, "field must be string: salt");
}

#[test]
fn markdown_is_not_json() {
    assert_eq!(format_reason("# Just a note\n"), "not JSON");
    assert_eq!(format_reason(""), "not JSON");
}

#[test]
fn tampered_ciphertext_in_container_fails_authentication() {
    let password = b"pw";
    let salt = generate_salt();
    let key = derive_key(password, &salt).unwrap();
    let (iv, mut ct) = encrypt(b"original", &key).unwrap();
    ct[0] ^= 0x80;
    let text = serialize(&salt, &iv, &ct).unwrap();

    let container = parse(&text).expect("still well-formed");
    let key_again = derive_key(password, &container.salt).unwrap();
    assert!(matches!(
        decrypt(&container.ciphertext, &container.iv, &key_again),
        Err(FolderGuardError::AuthenticationFailed)
    ));
}
