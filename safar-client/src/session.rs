use crate::error::ClientResult;
use safar_core::user::UserProfile;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Cached authentication state: bearer token, the user profile as last
/// fetched, and the derived tenant/company id. Login populates it; logout
/// or a 401 clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
    pub company_id: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().map(|t| !t.is_empty()).unwrap_or(false)
    }

    /// Tenant id from the cache: the explicitly stored one, else the one on
    /// the cached user profile.
    pub fn company_id(&self) -> Option<&str> {
        self.company_id
            .as_deref()
            .or_else(|| self.user.as_ref().and_then(|u| u.company_id.as_deref()))
            .filter(|id| !id.is_empty())
    }
}

/// File-backed persistence for [`Session`], one JSON document under the
/// user data directory.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("safar-backoffice")
            .join("session.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Restore the cached session. A missing or corrupt file yields an
    /// empty session rather than an error.
    pub fn load(&self) -> Session {
        match fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("Discarding corrupt session file: {}", e);
                Session::default()
            }),
            Err(_) => Session::default(),
        }
    }

    pub fn save(&self, session: &Session) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(session)?)?;
        Ok(())
    }

    pub fn clear(&self) -> ClientResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::new(dir.path().join("session.json"))
    }

    fn sample_session() -> Session {
        Session {
            token: Some("tok-123".into()),
            user: Some(UserProfile {
                id: "u-1".into(),
                name: "Desk Admin".into(),
                email: "desk@safar.example".into(),
                role: "admin".into(),
                agent_id: None,
                company_id: Some("co-9".into()),
            }),
            company_id: None,
        }
    }

    #[test]
    fn round_trips_through_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save(&sample_session()).unwrap();
        let restored = store.load();
        assert_eq!(restored.token.as_deref(), Some("tok-123"));
        assert_eq!(restored.user.unwrap().id, "u-1");
    }

    #[test]
    fn company_id_falls_back_to_the_cached_user() {
        let session = sample_session();
        assert_eq!(session.company_id(), Some("co-9"));

        let mut with_explicit = sample_session();
        with_explicit.company_id = Some("co-1".into());
        assert_eq!(with_explicit.company_id(), Some("co-1"));
    }

    #[test]
    fn missing_and_corrupt_files_degrade_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(!store.load().is_authenticated());

        fs::write(store.path(), "{ not json").unwrap();
        assert!(!store.load().is_authenticated());
    }

    #[test]
    fn clear_removes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&sample_session()).unwrap();
        store.clear().unwrap();
        assert!(!store.path().exists());
        // clearing again is fine
        store.clear().unwrap();
    }
}
