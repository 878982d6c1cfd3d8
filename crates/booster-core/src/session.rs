//! Session record and its persistent stores.
//!
//! The session is replaced wholesale on login, signup and logout. Stores are
//! injected wherever a session is needed; nothing reads it from a global.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ids::{ChatId, GroupId, TokenId};

/// File name of the persisted session inside the project config directory.
pub const SESSION_FILE_NAME: &str = "session.json";

/// The logged-in account, as returned by the backend's login/signup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Backend user id
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,

    /// Chat id used as the account key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<ChatId>,

    /// Username (login by username/password)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Active wallet group at login time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_wallet_group_id: Option<GroupId>,

    /// Active token at login time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_token_id: Option<TokenId>,

    /// Bearer token, when the backend issues one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Session {
    /// A minimal session keyed by chat id.
    pub fn for_chat(chat_id: impl Into<ChatId>) -> Self {
        Self {
            chat_id: Some(chat_id.into()),
            ..Self::default()
        }
    }

    /// The key sent as `chatId` on every request.
    ///
    /// Falls back to the username for accounts that logged in by name.
    pub fn chat_key(&self) -> Option<ChatId> {
        self.chat_id
            .clone()
            .filter(|c| !c.as_str().is_empty())
            .or_else(|| {
                self.username
                    .as_deref()
                    .filter(|u| !u.is_empty())
                    .map(ChatId::from)
            })
    }
}

/// Typed access to the persisted session.
pub trait SessionStore: Send + Sync {
    /// Load the session, `None` when logged out.
    fn load(&self) -> Result<Option<Session>>;

    /// Replace the stored session.
    fn save(&self, session: &Session) -> Result<()>;

    /// Remove the stored session. Clearing an empty store is not an error.
    fn clear(&self) -> Result<()>;
}

// ============================================================================
// FileSessionStore
// ============================================================================

/// Session persisted as a JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store at an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<config dir>/<project>/session.json`.
    pub fn default_for(project: &str) -> Result<Self> {
        let dir = dirs::config_dir()
            .ok_or_else(|| Error::session("Could not determine config directory"))?;
        Ok(Self::new(dir.join(project).join(SESSION_FILE_NAME)))
    }

    /// Location of the session file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::io_with_path(e, &self.path)),
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        let session = serde_json::from_str(&content).map_err(|e| {
            Error::session(format!(
                "Corrupt session file {}: {e}",
                self.path.display()
            ))
        })?;
        Ok(Some(session))
    }

    fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
        }
        let json = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, json).map_err(|e| Error::io_with_path(e, &self.path))?;
        log::debug!("session saved to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                log::debug!("session cleared at {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::io_with_path(e, &self.path)),
        }
    }
}

// ============================================================================
// MemorySessionStore
// ============================================================================

/// In-memory session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: RwLock<Option<Session>>,
}

impl MemorySessionStore {
    /// An empty (logged out) store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that starts logged in.
    pub fn with_session(session: Session) -> Self {
        Self {
            inner: RwLock::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>> {
        let guard = self
            .inner
            .read()
            .map_err(|_| Error::session("session lock poisoned"))?;
        Ok(guard.clone())
    }

    fn save(&self, session: &Session) -> Result<()> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| Error::session("session lock poisoned"))?;
        *guard = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| Error::session("session lock poisoned"))?;
        *guard = None;
        Ok(())
    }
}
