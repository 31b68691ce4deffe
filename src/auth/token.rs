//! Token payload decoding
//!
//! Tokens are issued and signed by the library backend. The client never
//! verifies the signature: the decoded claims only drive what the UI shows,
//! and the backend re-checks the token on every authenticated request.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::models::{Role, Session};

/// Reasons a token cannot be turned into a session
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("expected 3 dot-separated segments, found {0}")]
    Shape(usize),

    #[error("{0} segment is empty")]
    EmptySegment(&'static str),

    #[error("header is not a base64url JSON object")]
    Header,

    #[error("payload is not base64url: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("invalid claims: {0}")]
    Claims(#[from] serde_json::Error),

    #[error("subject claim is blank")]
    BlankSubject,

    #[error("expiry {0} is out of range")]
    ExpiryOutOfRange(f64),

    #[error("token expired at {0}")]
    Expired(DateTime<Utc>),
}

/// Claims read from the token payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (member email)
    pub sub: String,
    /// Role name, absent for plain members on some backends
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Expiration time (seconds since epoch, fractions allowed)
    pub exp: f64,
}

impl Claims {
    /// Get the member role, `USER` when the claim is absent
    pub fn role(&self) -> Role {
        Role::from_claim(self.role.as_deref())
    }

    /// Expiration as a timestamp, at millisecond precision
    pub fn expires_at(&self) -> Result<DateTime<Utc>, DecodeError> {
        let millis = self.exp * 1000.0;
        if !millis.is_finite() || millis < i64::MIN as f64 || millis > i64::MAX as f64 {
            return Err(DecodeError::ExpiryOutOfRange(self.exp));
        }
        DateTime::from_timestamp_millis(millis.trunc() as i64)
            .ok_or(DecodeError::ExpiryOutOfRange(self.exp))
    }
}

/// Decode the payload of a token without verifying its signature.
///
/// The header only has to be a JSON object; its `alg` is not inspected.
pub fn decode_claims(token: &str) -> Result<Claims, DecodeError> {
    let segments: Vec<&str> = token.trim().split('.').collect();
    let [header, payload, _signature] = segments.as_slice() else {
        return Err(DecodeError::Shape(segments.len()));
    };

    if header.is_empty() {
        return Err(DecodeError::EmptySegment("header"));
    }
    if payload.is_empty() {
        return Err(DecodeError::EmptySegment("payload"));
    }

    let header = URL_SAFE_NO_PAD
        .decode(header.trim_end_matches('='))
        .map_err(|_| DecodeError::Header)?;
    if !matches!(
        serde_json::from_slice::<serde_json::Value>(&header),
        Ok(serde_json::Value::Object(_))
    ) {
        return Err(DecodeError::Header);
    }

    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    let claims: Claims = serde_json::from_slice(&bytes)?;
    if claims.sub.trim().is_empty() {
        return Err(DecodeError::BlankSubject);
    }
    Ok(claims)
}

/// Decode a token into a fully populated session
pub fn decode_session(token: &str) -> Result<Session, DecodeError> {
    let claims = decode_claims(token)?;
    let expires_at = claims.expires_at()?;

    Ok(Session {
        token: token.trim().to_string(),
        role: claims.role(),
        subject: claims.sub,
        expires_at,
    })
}
