//! Persistence of the Matrix login.
//!
//! The data directory holds two entries:
//! - `session.json`: the access token of the bot device and the last sync token
//! - `store/`: the SQLite state store of the Matrix SDK

use std::path::{Path, PathBuf};

use log::{debug, trace};
use matrix_sdk::authentication::matrix::MatrixSession as UserSession;
use serde::{Deserialize, Serialize};
use tokio::{fs, sync::Mutex};

const SESSION_FILE: &str = "session.json";
const STORE_DIR: &str = "store";

/// Content of `session.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredSession {
    user_session: UserSession,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    sync_token: Option<String>,
}

/// Matrix session manager.
///
/// Loads the stored session when created and writes every change back to
/// `session.json`. The stored copy is kept in memory so the sync token can be
/// saved after each sync without reading the file again.
pub struct MatrixSession {
    session_path: PathBuf,
    store_path: PathBuf,
    stored: Mutex<Option<StoredSession>>,
}

impl MatrixSession {
    /// Opens the session stored in `data_dir`, creating the directory if needed.
    ///
    /// A missing or unreadable `session.json` is not an error, the bot will
    /// log in again.
    pub async fn new(data_dir: &Path) -> Result<Self, anyhow::Error> {
        fs::create_dir_all(data_dir).await?;

        let session_path = data_dir.join(SESSION_FILE);
        let store_path = data_dir.join(STORE_DIR);

        let stored = match read_session(&session_path).await {
            Ok(stored) => {
                debug!("found stored session at {}", session_path.display());
                Some(stored)
            }
            Err(e) => {
                debug!("no usable session at {}: {}", session_path.display(), e);
                None
            }
        };

        Ok(MatrixSession {
            session_path,
            store_path,
            stored: Mutex::new(stored),
        })
    }

    /// Path of the SQLite store of the Matrix SDK.
    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// Login to restore, if one was stored.
    pub async fn user_session(&self) -> Option<UserSession> {
        self.stored
            .lock()
            .await
            .as_ref()
            .map(|stored| stored.user_session.clone())
    }

    /// Position to resume syncing from, if one was stored.
    pub async fn sync_token(&self) -> Option<String> {
        self.stored
            .lock()
            .await
            .as_ref()
            .and_then(|stored| stored.sync_token.clone())
    }

    /// Stores a fresh login. Any previous sync token is dropped.
    pub async fn persist_user_session(&self, user_session: UserSession) -> anyhow::Result<()> {
        trace!("persist user session");

        let mut stored = self.stored.lock().await;
        let session = StoredSession {
            user_session,
            sync_token: None,
        };
        fs::write(&self.session_path, serde_json::to_string(&session)?).await?;
        *stored = Some(session);

        Ok(())
    }

    /// Stores the sync token of the last sync.
    ///
    /// # Errors
    ///
    /// Fails if no user session was stored first or the file can't be written.
    pub async fn persist_sync_token(&self, sync_token: String) -> anyhow::Result<()> {
        trace!("persist sync token {}", sync_token);

        let mut stored = self.stored.lock().await;
        let Some(session) = stored.as_mut() else {
            anyhow::bail!("no user session to attach the sync token to");
        };
        session.sync_token = Some(sync_token);
        fs::write(&self.session_path, serde_json::to_string(&*session)?).await?;

        Ok(())
    }
}

async fn read_session(session_path: &Path) -> anyhow::Result<StoredSession> {
    let content = fs::read_to_string(session_path).await?;
    Ok(serde_json::from_str(&content)?)
}
