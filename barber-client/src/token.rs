// barber-client/src/token.rs
// Bearer token storage (the browser's local storage equivalent)

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Where the session token lives between requests
pub trait TokenStore: Send + Sync + Debug {
    /// Current token, if the user is logged in
    fn load(&self) -> Option<String>;

    fn save(&self, token: &str) -> std::io::Result<()>;

    /// Forget the token; a missing token is not an error
    fn clear(&self) -> std::io::Result<()>;
}

/// In-memory token store
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: RwLock::new(token),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    fn save(&self, token: &str) -> std::io::Result<()> {
        let mut guard = self
            .token
            .write()
            .map_err(|_| std::io::Error::other("token lock poisoned"))?;
        *guard = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> std::io::Result<()> {
        let mut guard = self
            .token
            .write()
            .map_err(|_| std::io::Error::other("token lock poisoned"))?;
        *guard = None;
        Ok(())
    }
}

/// Stored token file contents
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredToken {
    token: String,
    saved_at: i64,
}

/// JSON file token store
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Token file `filename` under `base_path`
    pub fn new(base_path: impl Into<PathBuf>, filename: &str) -> Self {
        let path = base_path.into().join(filename);
        Self { path }
    }

    /// Make sure the parent directory exists
    fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        if !self.path.exists() {
            return None;
        }
        let json = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<StoredToken>(&json) {
            Ok(stored) => Some(stored.token),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring unreadable token file");
                None
            }
        }
    }

    fn save(&self, token: &str) -> std::io::Result<()> {
        self.ensure_dir()?;
        let stored = StoredToken {
            token: token.to_string(),
            saved_at: shared::util::now_millis(),
        };
        let json = serde_json::to_string_pretty(&stored)?;
        fs::write(&self.path, json)
    }

    fn clear(&self) -> std::io::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
