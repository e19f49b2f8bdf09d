use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::TokenStoreError;

/// Holds the single opaque bearer token.
///
/// The file-backed store re-reads the file on every `get`, so a navigation
/// decision always sees what is actually persisted rather than a cached copy
/// that could desync. The in-memory variant exists for tests.
#[derive(Debug)]
pub enum TokenStore {
    File { path: PathBuf },
    InMemory(RwLock<Option<String>>),
}

impl TokenStore {
    /// A store persisting the token at the given path.
    #[must_use]
    pub fn file(path: PathBuf) -> Self {
        Self::File { path }
    }

    /// A store that forgets the token when dropped.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::InMemory(RwLock::new(None))
    }

    /// Returns the stored token, if a non-empty one exists.
    #[must_use]
    pub fn get(&self) -> Option<String> {
        let raw = match self {
            TokenStore::File { path } => fs::read_to_string(path).ok()?,
            TokenStore::InMemory(cell) => cell.read().ok()?.clone()?,
        };
        let token = raw.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    /// Persists the token, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `TokenStoreError::Write` when the token file cannot be
    /// written.
    pub fn set(&self, token: &str) -> Result<(), TokenStoreError> {
        match self {
            TokenStore::File { path } => {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent).map_err(TokenStoreError::Write)?;
                }
                fs::write(path, token).map_err(TokenStoreError::Write)
            }
            TokenStore::InMemory(cell) => {
                if let Ok(mut guard) = cell.write() {
                    *guard = Some(token.to_string());
                }
                Ok(())
            }
        }
    }

    /// Removes the stored token. Clearing an already-empty store succeeds.
    ///
    /// # Errors
    ///
    /// Returns `TokenStoreError::Clear` when the token file exists but cannot
    /// be removed.
    pub fn clear(&self) -> Result<(), TokenStoreError> {
        match self {
            TokenStore::File { path } => match fs::remove_file(path) {
                Ok(()) => Ok(()),
                Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
                Err(err) => Err(TokenStoreError::Clear(err)),
            },
            TokenStore::InMemory(cell) => {
                if let Ok(mut guard) = cell.write() {
                    *guard = None;
                }
                Ok(())
            }
        }
    }
}
