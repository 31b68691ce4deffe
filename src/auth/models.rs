//! Session and role models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles issued by the library backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Member - can browse the catalog and reserve books
    #[default]
    User,
    /// Librarian - manages books, categories and users
    Librarian,
}

impl Role {
    /// Resolve the role claim of a token payload.
    ///
    /// A missing or blank claim means `USER`. Unrecognised values also fall
    /// back to `USER` so a surprising claim never widens what the UI shows.
    pub fn from_claim(claim: Option<&str>) -> Self {
        match claim.map(str::trim).filter(|c| !c.is_empty()) {
            None => Role::User,
            Some(value) => value.parse().unwrap_or_else(|_| {
                tracing::warn!(role = value, "Unknown role claim, treating as USER");
                Role::User
            }),
        }
    }

    /// Check if this role may use the admin screens
    pub fn is_librarian(&self) -> bool {
        matches!(self, Role::Librarian)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "USER"),
            Role::Librarian => write!(f, "LIBRARIAN"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        // Spring Security authorities carry a ROLE_ prefix
        let name = upper.strip_prefix("ROLE_").unwrap_or(&upper);
        match name {
            "USER" => Ok(Role::User),
            "LIBRARIAN" => Ok(Role::Librarian),
            _ => Err(format!("unknown role '{}'", s)),
        }
    }
}

/// The authenticated identity derived from a token.
///
/// Only constructed from a fully decoded token, so every field is always
/// populated.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    /// Raw token as issued by the backend
    pub token: String,
    /// Subject claim (the member's email)
    pub subject: String,
    /// Role claim, `USER` when absent
    pub role: Role,
    /// When the token stops being accepted
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Check if the token has expired at `now`. Expiry is inclusive.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Check if the token has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Value for the `Authorization` header of backend requests
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("subject", &self.subject)
            .field("role", &self.role)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Session details safe to print (no token)
#[derive(Debug, Clone, Serialize)]
pub struct SessionInfo {
    pub subject: String,
    pub role: Role,
    pub expires_at: DateTime<Utc>,
}

impl From<&Session> for SessionInfo {
    fn from(session: &Session) -> Self {
        Self {
            subject: session.subject.clone(),
            role: session.role,
            expires_at: session.expires_at,
        }
    }
}
