//! Local session gate.
//!
//! Holds the signed-in identity in a `tokio::sync::watch` channel and,
//! optionally, persists it to `session.toml` so a CLI invocation can pick
//! up where the previous one left off.

use crate::storage::AtomicTomlFile;
use adcraft_core::Result;
use adcraft_core::session::{SessionGate, UserIdentity};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::sync::watch;

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<UserIdentity>,
}

/// A [`SessionGate`] driven by explicit `sign_in` / `sign_out` calls.
#[derive(Debug)]
pub struct LocalSessionGate {
    sender: watch::Sender<Option<UserIdentity>>,
    file: Option<AtomicTomlFile<SessionFile>>,
}

impl LocalSessionGate {
    /// A gate that starts signed out and keeps nothing on disk.
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self { sender, file: None }
    }

    /// A gate backed by `path`, starting with whatever identity it holds.
    pub fn with_persistence(path: PathBuf) -> Result<Self> {
        let file = AtomicTomlFile::new(path);
        let current = file.load()?.and_then(|stored: SessionFile| stored.user);
        if let Some(user) = &current {
            tracing::debug!(target: "session", user = %user.id, "Restored session");
        }

        let (sender, _) = watch::channel(current);
        Ok(Self {
            sender,
            file: Some(file),
        })
    }

    /// Signs `user` in, replacing any current identity.
    pub fn sign_in(&self, user: UserIdentity) -> Result<()> {
        if let Some(file) = &self.file {
            file.save(&SessionFile {
                user: Some(user.clone()),
            })?;
        }
        tracing::info!(target: "session", user = %user.id, "Signed in");
        self.sender.send_replace(Some(user));
        Ok(())
    }

    /// Clears the current identity.
    pub fn sign_out(&self) -> Result<()> {
        if let Some(file) = &self.file {
            file.remove()?;
        }
        if let Some(previous) = self.sender.send_replace(None) {
            tracing::info!(target: "session", user = %previous.id, "Signed out");
        }
        Ok(())
    }
}

impl Default for LocalSessionGate {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionGate for LocalSessionGate {
    fn current(&self) -> Option<UserIdentity> {
        self.sender.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<UserIdentity>> {
        self.sender.subscribe()
    }
}
