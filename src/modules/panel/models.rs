use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of the managed server as reported by the panel.
///
/// `Error` is never sent by the panel; it stands for "state unknown".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    Running,
    Starting,
    Stopping,
    Offline,
    Error,
}

impl From<&str> for ServerState {
    fn from(state: &str) -> Self {
        match state {
            "running" => Self::Running,
            "starting" => Self::Starting,
            "stopping" => Self::Stopping,
            "offline" => Self::Offline,
            _ => Self::Error,
        }
    }
}

impl fmt::Display for ServerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self {
            Self::Running => "running",
            Self::Starting => "starting",
            Self::Stopping => "stopping",
            Self::Offline => "offline",
            Self::Error => "error",
        };
        f.write_str(state)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerSignal {
    Start,
    Stop,
    Restart,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BackupRecord {
    pub uuid: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupCreation {
    Created,
    AlreadyExists,
    Failed,
    /// Existing backups could not be listed, so nothing was created.
    ListFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupDeletion {
    Deleted,
    None,
    Failed,
    ListFailed,
}

#[derive(Deserialize)]
pub(super) struct BackupList {
    #[serde(default)]
    pub data: Vec<BackupObject>,
}

#[derive(Deserialize)]
pub(super) struct BackupObject {
    pub attributes: BackupRecord,
}

#[derive(Serialize)]
pub(super) struct PowerRequest {
    pub signal: PowerSignal,
}

#[derive(Serialize)]
pub(super) struct CommandRequest<'a> {
    pub command: &'a str,
}

#[derive(Serialize)]
pub(super) struct BackupRequest<'a> {
    pub name: &'a str,
}
