//! Libris - session handling for the library catalog client
//!
//! The library keeps track of who is signed in to the catalog. A token issued
//! by the backend is decoded locally (without verifying its signature) to
//! derive the member's identity and role, persisted across runs, and dropped
//! as soon as it expires. Decoded claims are for display and navigation only;
//! the backend remains the authority on every request.

pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod storage;

pub use auth::{Role, Session, SessionStore};
pub use config::Config;
pub use error::Error;
