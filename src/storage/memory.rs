//! In-memory token slot

use super::TokenStorage;
use crate::error::Result;

/// Token slot that lives only as long as the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    token: Option<String>,
}

impl MemoryStorage {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot that already holds a token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// Peek at the stored token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

impl TokenStorage for MemoryStorage {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.token.clone())
    }

    fn save(&mut self, token: &str) -> Result<()> {
        self.token = Some(token.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.token = None;
        Ok(())
    }
}
