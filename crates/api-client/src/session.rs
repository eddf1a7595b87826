//! Local session storage
//!
//! The auth service owns sessions; we only cache the tokens so a later
//! command (or a later screen) can find out who is signed in.

use crate::endpoints::auth::Session;
use crate::error::{ApiError, ApiResult};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Where a session is kept between operations
pub trait SessionStore: Send + Sync {
    /// Load the cached session, if any
    fn load(&self) -> ApiResult<Option<Session>>;
    /// Replace the cached session
    fn save(&self, session: &Session) -> ApiResult<()>;
    /// Forget the cached session
    fn clear(&self) -> ApiResult<()>;
}

/// In-process session storage
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Session>> {
        // A poisoned lock still holds a valid Option<Session>
        self.session
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> ApiResult<Option<Session>> {
        Ok(self.lock().clone())
    }

    fn save(&self, session: &Session) -> ApiResult<()> {
        *self.lock() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> ApiResult<()> {
        *self.lock() = None;
        Ok(())
    }
}

/// Session storage in a JSON file
///
/// The file is written with owner-only permissions on unix since it holds a
/// refresh token.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store the session at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store the session under the user config directory
    pub fn default_location() -> ApiResult<Self> {
        dirs::config_dir()
            .map(|dir| Self::new(dir.join("petfyco").join("session.json")))
            .ok_or_else(|| ApiError::config("could not determine the user config directory"))
    }

    /// Path of the session file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> ApiResult<Option<Session>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&content) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "Ignoring unreadable session file");
                Ok(None)
            }
        }
    }

    fn save(&self, session: &Session) -> ApiResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(session)?;
        let mut file = open_private(&self.path)?;
        file.write_all(json.as_bytes())?;

        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    fn clear(&self) -> ApiResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Open `path` for writing, readable by the owner only before any byte lands
#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // `mode` only applies on creation; tighten files left by older versions
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    fs::File::create(path)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::endpoints::auth::User;
    use uuid::Uuid;

    pub(crate) fn session(expires_at: Option<i64>) -> Session {
        Session {
            access_token: "access".into(),
            refresh_token: "refresh".into(),
            token_type: "bearer".into(),
            expires_in: 3600,
            expires_at,
            user: User {
                id: Uuid::new_v4(),
                email: Some("ana@example.com".into()),
                role: Some("authenticated".into()),
            },
        }
    }

    #[test]
    fn test_memory_store() {
        let store = MemorySessionStore::default();
        assert!(store.load().unwrap().is_none());

        let s = session(None);
        store.save(&s).unwrap();
        assert_eq!(store.load().unwrap(), Some(s));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested").join("session.json"));
        assert!(store.load().unwrap().is_none());

        let s = session(Some(1_700_000_000));
        store.save(&s).unwrap();
        assert_eq!(store.load().unwrap(), Some(s));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(store.path()).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }

        store.clear().unwrap();
        assert!(!store.path().exists());
        store.clear().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_save_tightens_existing_world_readable_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{}").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let store = FileSessionStore::new(&path);
        let s = session(None);
        store.save(&s).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.load().unwrap(), Some(s));
    }

    #[test]
    fn test_corrupt_file_reads_as_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let store = FileSessionStore::new(path);
        assert!(store.load().unwrap().is_none());
    }
}
