use crate::{AuthError, TokenSigner};

use uuid::Uuid;

const SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";

#[test]
fn given_signed_token_when_verified_then_returns_user_id() {
    let signer = TokenSigner::new(SECRET);
    let user_id = Uuid::new_v4();

    let token = signer.sign(user_id).unwrap();
    let result = signer.verify(&token);

    assert!(result.is_ok());
    assert_eq!(result.unwrap(), user_id);
}

#[test]
fn given_two_tokens_for_same_user_when_signed_then_both_verify() {
    let signer = TokenSigner::new(SECRET);
    let user_id = Uuid::new_v4();

    let first = signer.sign(user_id).unwrap();
    let second = signer.sign(user_id).unwrap();

    // Distinct even when issued back-to-back within one second
    assert_ne!(first, second);
    assert_eq!(signer.verify(&first).unwrap(), user_id);
    assert_eq!(signer.verify(&second).unwrap(), user_id);
}

#[test]
fn given_wrong_secret_when_verified_then_returns_decode_error() {
    let signer = TokenSigner::new(SECRET);
    let other = TokenSigner::new(b"wrong-secret-key-also-32-bytes-x");
    let token = signer.sign(Uuid::new_v4()).unwrap();

    let result = other.verify(&token);

    assert!(matches!(result, Err(AuthError::JwtDecode { .. })));
}

#[test]
fn given_garbage_token_when_verified_then_returns_decode_error() {
    let signer = TokenSigner::new(SECRET);

    let result = signer.verify("not.a.jwt");

    assert!(matches!(result, Err(AuthError::JwtDecode { .. })));
}
