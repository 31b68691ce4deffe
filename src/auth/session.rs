//! Session store
//!
//! The store is the only holder of "who is logged in". The persisted slot is
//! a mirror of the in-memory session; whenever the two disagree (corrupted or
//! expired token) the store wins and clears the slot.

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::auth::models::Session;
use crate::auth::token::{decode_session, DecodeError};
use crate::error::Result;
use crate::storage::TokenStorage;

/// Holds the current session and mirrors its token into `S`
pub struct SessionStore<S: TokenStorage> {
    storage: S,
    state: watch::Sender<Option<Session>>,
}

impl<S: TokenStorage> SessionStore<S> {
    /// Create a store with no session. Call [`SessionStore::restore`] to
    /// pick up a token persisted by a previous run.
    pub fn new(storage: S) -> Self {
        let (state, _) = watch::channel(None);
        Self { storage, state }
    }

    /// Restore the session persisted by a previous run.
    ///
    /// Never fails: unreadable, corrupted or expired tokens all end in an
    /// absent session, with the slot cleared where possible.
    pub fn restore(&mut self) -> Option<Session> {
        self.restore_at(Utc::now())
    }

    /// Restore, judging expiry against `now`
    pub fn restore_at(&mut self, now: DateTime<Utc>) -> Option<Session> {
        let token = match self.storage.load() {
            Ok(Some(token)) => token,
            Ok(None) => {
                debug!("No persisted token");
                self.publish(None);
                return None;
            }
            Err(e) => {
                warn!("Failed to read persisted token: {}", e);
                self.discard_persisted();
                self.publish(None);
                return None;
            }
        };

        let session = match decode_session(&token) {
            Ok(session) if session.is_expired_at(now) => {
                info!(subject = %session.subject, "Persisted token expired, logging out");
                None
            }
            Ok(session) => Some(session),
            Err(e) => {
                warn!("Discarding corrupted persisted token: {}", e);
                None
            }
        };

        match session {
            Some(session) => {
                info!(subject = %session.subject, role = %session.role, "Session restored");
                self.publish(Some(session.clone()));
                Some(session)
            }
            None => {
                self.discard_persisted();
                self.publish(None);
                None
            }
        }
    }

    /// Start a session from a token the backend just issued.
    ///
    /// A malformed or already-expired token is rejected before anything is
    /// persisted, leaving both the slot and the current session untouched.
    pub fn login(&mut self, token: &str) -> Result<Session> {
        let session = decode_session(token)?;
        if session.is_expired() {
            return Err(DecodeError::Expired(session.expires_at).into());
        }

        self.storage.save(&session.token)?;

        info!(subject = %session.subject, role = %session.role, "Logged in");
        self.publish(Some(session.clone()));
        Ok(session)
    }

    /// End the session.
    ///
    /// The in-memory session is always cleared, even if the slot cannot be;
    /// the storage error is still reported.
    pub fn logout(&mut self) -> Result<()> {
        let cleared = self.storage.clear();
        if self.state.borrow().is_some() {
            info!("Logged out");
        }
        self.publish(None);
        cleared
    }

    /// Current session, `None` when logged out. No I/O.
    pub fn current(&self) -> Option<Session> {
        self.state.borrow().clone()
    }

    /// Check if a session is active
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_some()
    }

    /// Drop the session if its token has expired. Returns `true` when the
    /// session was ended by this call.
    pub fn check_expiry(&mut self) -> bool {
        self.check_expiry_at(Utc::now())
    }

    /// Expiry check against `now`
    pub fn check_expiry_at(&mut self, now: DateTime<Utc>) -> bool {
        let expired = self
            .state
            .borrow()
            .as_ref()
            .is_some_and(|session| session.is_expired_at(now));

        if expired {
            info!("Session token expired, logging out");
            self.discard_persisted();
            self.publish(None);
        }
        expired
    }

    /// Subscribe to session changes. The receiver starts at the current state.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.state.subscribe()
    }

    /// Access the underlying storage
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn discard_persisted(&mut self) {
        if let Err(e) = self.storage.clear() {
            warn!("Failed to clear persisted token: {}", e);
        }
    }

    fn publish(&self, session: Option<Session>) {
        self.state.send_replace(session);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::Role;
    use crate::error::Error;
    use crate::storage::MemoryStorage;
    use chrono::Duration;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn make_token(sub: &str, role: Option<&str>, exp: DateTime<Utc>) -> String {
        let mut claims = serde_json::json!({ "sub": sub, "exp": exp.timestamp() });
        if let Some(role) = role {
            claims["role"] = role.into();
        }
        encode(&Header::default(), &claims, &EncodingKey::from_secret(b"secret"))
            .expect("Failed to create token")
    }

    /// Storage whose writes always fail
    struct BrokenStorage;

    impl TokenStorage for BrokenStorage {
        fn load(&self) -> Result<Option<String>> {
            Err(Error::Other("disk on fire".to_string()))
        }

        fn save(&mut self, _token: &str) -> Result<()> {
            Err(Error::Other("disk on fire".to_string()))
        }

        fn clear(&mut self) -> Result<()> {
            Err(Error::Other("disk on fire".to_string()))
        }
    }

    #[test]
    fn test_login_then_current() {
        let mut store = SessionStore::new(MemoryStorage::new());
        let exp = Utc::now() + Duration::hours(1);
        let token = make_token("a@b.com", Some("LIBRARIAN"), exp);

        store.login(&token).expect("Failed to login");

        let session = store.current().expect("Session should be active");
        assert_eq!(session.subject, "a@b.com");
        assert_eq!(session.role, Role::Librarian);
        assert_eq!(session.expires_at.timestamp(), exp.timestamp());
        assert_eq!(store.storage().token(), Some(token.as_str()));
    }

    #[test]
    fn test_restore_at_expiry_boundary() {
        let exp = Utc::now() + Duration::hours(1);
        let token = make_token("a@b.com", None, exp);
        let expiry = DateTime::from_timestamp(exp.timestamp(), 0).expect("valid timestamp");

        let mut store = SessionStore::new(MemoryStorage::with_token(token.clone()));
        assert!(store.restore_at(expiry - Duration::seconds(1)).is_some());

        let mut store = SessionStore::new(MemoryStorage::with_token(token));
        assert!(store.restore_at(expiry).is_none());
        assert_eq!(store.storage().token(), None);
    }

    #[test]
    fn test_restore_survives_unreadable_storage() {
        let mut store = SessionStore::new(BrokenStorage);
        assert!(store.restore().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_login_save_failure_keeps_state() {
        let mut store = SessionStore::new(BrokenStorage);
        let token = make_token("a@b.com", None, Utc::now() + Duration::hours(1));

        assert!(store.login(&token).is_err());
        assert!(store.current().is_none());
    }

    #[test]
    fn test_logout_clears_memory_even_if_storage_fails() {
        let mut store = SessionStore::new(BrokenStorage);
        let token = make_token("a@b.com", None, Utc::now() + Duration::hours(1));
        store.publish(decode_session(&token).ok());

        assert!(store.logout().is_err());
        assert!(store.current().is_none());
    }

    #[test]
    fn test_check_expiry_at() {
        let mut store = SessionStore::new(MemoryStorage::new());
        let exp = Utc::now() + Duration::minutes(5);
        store
            .login(&make_token("a@b.com", None, exp))
            .expect("Failed to login");

        assert!(!store.check_expiry_at(exp - Duration::minutes(1)));
        assert!(store.is_authenticated());

        assert!(store.check_expiry_at(exp + Duration::seconds(1)));
        assert!(!store.is_authenticated());
        assert_eq!(store.storage().token(), None);

        // Nothing left to expire
        assert!(!store.check_expiry_at(exp + Duration::minutes(1)));
    }
}
