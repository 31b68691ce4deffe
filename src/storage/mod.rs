//! Persisted token slot
//!
//! The slot mirrors the session held in memory. It holds at most one raw
//! token under a single key and is only ever written by the session store.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::Result;

/// A single persisted token
pub trait TokenStorage {
    /// Read the stored token, `None` when the slot is empty
    fn load(&self) -> Result<Option<String>>;

    /// Replace the stored token
    fn save(&mut self, token: &str) -> Result<()>;

    /// Empty the slot. Clearing an empty slot succeeds.
    fn clear(&mut self) -> Result<()>;
}
