pub mod client;
pub mod models;

#[cfg(test)]
pub use client::MockPanel;
pub use client::{Panel, PanelClient, PanelError};
pub use models::{BackupCreation, BackupDeletion, BackupRecord, PowerSignal, ServerState};
