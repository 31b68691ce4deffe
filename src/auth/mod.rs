//! Authentication and session management

pub mod access;
pub mod models;
pub mod session;
pub mod token;

pub use access::{authorize, Area};
pub use models::{Role, Session, SessionInfo};
pub use session::SessionStore;
pub use token::{decode_claims, decode_session, Claims, DecodeError};
