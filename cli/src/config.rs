//! Session persistence
//!
//! The two session entries (authenticated flag + login timestamp) live
//! in `session.toml` under the store's directory, `~/.agentdesk` in
//! normal operation. They are a client-side convenience gate only;
//! nothing here is validated against a server.

use std::fs;
use std::path::PathBuf;

use agentdesk_core::session::AdminSession;

pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Store under `~/.agentdesk`.
    pub fn open() -> Result<Self, String> {
        let home = dirs::home_dir().ok_or("Cannot find home directory")?;
        Ok(Self::at(home.join(".agentdesk")))
    }

    /// Store rooted at an explicit directory.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub(crate) fn path(&self) -> PathBuf {
        self.dir.join("session.toml")
    }

    /// Read the stored session, `None` when no entries exist.
    pub fn load(&self) -> Result<Option<AdminSession>, String> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(|e| e.to_string())?;
        // A file missing either entry is the same as no session at all.
        Ok(toml::from_str(&content).ok())
    }

    pub fn save(&self, session: &AdminSession) -> Result<(), String> {
        fs::create_dir_all(&self.dir).map_err(|e| e.to_string())?;
        let content = toml::to_string_pretty(session).map_err(|e| e.to_string())?;
        fs::write(self.path(), content).map_err(|e| e.to_string())
    }

    /// Remove the stored entries. Missing entries are not an error.
    pub fn clear(&self) -> Result<(), String> {
        match fs::remove_file(self.path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.to_string()),
        }
    }
}
