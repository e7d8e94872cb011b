use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Fixed storage key for the persisted admin token.
pub const TOKEN_KEY: &str = "admin_token";

/// Injectable auth context. The client reads the token before every request
/// and writes it only at login/logout.
pub trait TokenStore: Send + Sync {
    fn token(&self) -> Option<String>;
    fn set_token(&self, token: Option<String>);
}

/// In-memory store, used in tests and short-lived sessions.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl TokenStore for MemoryTokenStore {
    fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|guard| guard.clone())
    }

    fn set_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = token;
        }
    }
}

/// Durable store: a single file named after [`TOKEN_KEY`] in the given
/// directory.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(TOKEN_KEY),
        }
    }
}

impl TokenStore for FileTokenStore {
    fn token(&self) -> Option<String> {
        fs::read_to_string(&self.path)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn set_token(&self, token: Option<String>) {
        let result = match token {
            Some(token) => fs::write(&self.path, token),
            None if self.path.exists() => fs::remove_file(&self.path),
            None => Ok(()),
        };
        if let Err(err) = result {
            tracing::warn!("failed to persist auth token: {err}");
        }
    }
}

/// Client-side route guard outcome.
#[derive(Debug, PartialEq, Eq)]
pub enum Guard {
    Allow,
    RedirectToLogin,
}

/// Token presence gates every route except the login page itself.
pub fn check_route(store: &dyn TokenStore, on_login_page: bool) -> Guard {
    if on_login_page || store.token().is_some() {
        Guard::Allow
    } else {
        Guard::RedirectToLogin
    }
}
