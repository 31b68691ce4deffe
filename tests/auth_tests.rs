//! Token decoding and access gating tests

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use libris::auth::{authorize, decode_claims, decode_session, Area, Role, Session};
use libris::Error;

fn make_token(claims: serde_json::Value) -> String {
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"library-backend-secret"),
    )
    .expect("Failed to create token")
}

fn session(role: Role) -> Session {
    Session {
        token: "a.b.c".to_string(),
        subject: "a@b.com".to_string(),
        role,
        expires_at: Utc::now() + Duration::hours(1),
    }
}

#[test]
fn test_jwt_token_format() {
    let token = make_token(serde_json::json!({ "sub": "a@b.com", "exp": 4102444800i64 }));
    assert_eq!(token.split('.').count(), 3); // JWT format: header.payload.signature
}

#[test]
fn test_decode_session_fields() {
    let exp = Utc::now() + Duration::hours(2);
    let token = make_token(serde_json::json!({
        "sub": "a@b.com",
        "role": "LIBRARIAN",
        "exp": exp.timestamp(),
    }));

    let session = decode_session(&token).expect("Failed to decode token");
    assert_eq!(session.subject, "a@b.com");
    assert_eq!(session.role, Role::Librarian);
    assert_eq!(session.expires_at.timestamp(), exp.timestamp());
    assert!(!session.is_expired());
}

#[test]
fn test_decode_does_not_need_the_signing_key() {
    let token = encode(
        &Header::new(Algorithm::HS512),
        &serde_json::json!({ "sub": "a@b.com", "role": "ROLE_LIBRARIAN", "exp": 4102444800i64 }),
        &EncodingKey::from_secret(b"a key this client never sees"),
    )
    .expect("Failed to create token");

    let claims = decode_claims(&token).expect("Failed to decode token");
    assert_eq!(claims.sub, "a@b.com");
    assert_eq!(claims.role(), Role::Librarian);
}

#[test]
fn test_expired_token_still_decodes() {
    let token = make_token(serde_json::json!({ "sub": "a@b.com", "exp": 1000 }));
    let session = decode_session(&token).expect("Failed to decode token");
    assert!(session.is_expired());
}

#[test]
fn test_invalid_token_rejection() {
    assert!(decode_claims("invalid.token.here").is_err());
}

#[test]
fn test_malformed_token_rejection() {
    assert!(decode_claims("not-a-jwt-token").is_err());
    assert!(decode_claims("").is_err());
}

#[test]
fn test_non_string_subject_rejected() {
    let token = make_token(serde_json::json!({ "sub": 42, "exp": 4102444800i64 }));
    assert!(decode_claims(&token).is_err());
}

#[test]
fn test_role_display_and_parse() {
    assert_eq!(Role::User.to_string(), "USER");
    assert_eq!(Role::Librarian.to_string(), "LIBRARIAN");
    assert_eq!("librarian".parse::<Role>(), Ok(Role::Librarian));
    assert!(Role::Librarian.is_librarian());
    assert!(!Role::User.is_librarian());
}

#[test]
fn test_member_area_access() {
    assert!(matches!(authorize(None, Area::Member), Err(Error::Unauthenticated)));
    assert!(authorize(Some(&session(Role::User)), Area::Member).is_ok());
}

#[test]
fn test_librarian_area_access() {
    let member = session(Role::User);
    assert!(matches!(
        authorize(Some(&member), Area::Librarian),
        Err(Error::Forbidden { .. })
    ));

    let librarian = session(Role::Librarian);
    let allowed = authorize(Some(&librarian), Area::Librarian).expect("Librarian denied");
    assert_eq!(allowed.authorization_header(), "Bearer a.b.c");
}
