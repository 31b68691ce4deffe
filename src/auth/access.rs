//! Area gating for the catalog screens
//!
//! Gating here only decides what the client offers. It reads unverified
//! claims, so the backend must still authorize every request on its own.

use clap::ValueEnum;

use crate::auth::models::{Role, Session};
use crate::error::{Error, Result};

/// Screen groups with distinct access rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Area {
    /// Member area: browsing, reservations, history
    Member,
    /// Admin area: books, categories and users
    Librarian,
}

impl Area {
    /// Minimum role needed to enter
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Area::Member => None,
            Area::Librarian => Some(Role::Librarian),
        }
    }
}

/// Check that `session` may enter `area`
pub fn authorize(session: Option<&Session>, area: Area) -> Result<&Session> {
    let session = session.ok_or(Error::Unauthenticated)?;

    match area.required_role() {
        Some(required) if session.role != required => Err(Error::Forbidden {
            required,
            actual: session.role,
        }),
        _ => Ok(session),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn session(role: Role) -> Session {
        Session {
            token: "a.b.c".to_string(),
            subject: "a@b.com".to_string(),
            role,
            expires_at: Utc::now() + Duration::hours(1),
        }
    }

    #[test]
    fn test_member_area_needs_any_session() {
        assert!(matches!(authorize(None, Area::Member), Err(Error::Unauthenticated)));
        assert!(authorize(Some(&session(Role::User)), Area::Member).is_ok());
        assert!(authorize(Some(&session(Role::Librarian)), Area::Member).is_ok());
    }

    #[test]
    fn test_librarian_area_needs_librarian() {
        assert!(matches!(
            authorize(Some(&session(Role::User)), Area::Librarian),
            Err(Error::Forbidden {
                required: Role::Librarian,
                actual: Role::User
            })
        ));
        assert!(authorize(Some(&session(Role::Librarian)), Area::Librarian).is_ok());
        assert!(matches!(authorize(None, Area::Librarian), Err(Error::Unauthenticated)));
    }
}
