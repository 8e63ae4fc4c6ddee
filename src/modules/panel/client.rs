use super::models::{
    BackupCreation, BackupDeletion, BackupList, BackupRecord, BackupRequest, CommandRequest,
    PowerRequest, PowerSignal, ServerState,
};
use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

const BACKUP_NAME: &str = "DiscordBot Backup";

#[derive(Error, Debug)]
pub enum PanelError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Unexpected status: {0}")]
    Status(StatusCode),
    #[error("Invalid API key: {0}")]
    ApiKey(#[from] header::InvalidHeaderValue),
}

/// Operations the bot performs against the panel's client API.
///
/// None of these fail towards the caller except [`Panel::uptime_seconds`],
/// which separates "panel unreachable" from "uptime missing".
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Panel: Send + Sync {
    async fn server_status(&self) -> ServerState;
    async fn send_power_signal(&self, signal: PowerSignal) -> bool;
    async fn send_console_command(&self, command: &str) -> bool;
    async fn list_backups(&self) -> Vec<BackupRecord>;
    /// At most one backup is kept; creation is refused while any exists.
    async fn create_backup(&self) -> BackupCreation;
    /// Deletes the first backup in the panel's own listing order.
    async fn delete_latest_backup(&self) -> BackupDeletion;
    async fn uptime_seconds(&self) -> Result<Option<u64>, PanelError>;
}

#[derive(Debug, Clone)]
pub struct PanelClient {
    client: reqwest::Client,
    base_url: String,
}

impl PanelClient {
    pub fn new(
        panel_url: &str,
        server_id: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self, PanelError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: format!(
                "{}/api/client/servers/{}",
                panel_url.trim_end_matches('/'),
                server_id
            ),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_ok(&self, path: &str) -> Result<Response, PanelError> {
        let url = self.url(path);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        if response.status() != StatusCode::OK {
            warn!("GET {} returned {}", url, response.status());
            return Err(PanelError::Status(response.status()));
        }
        Ok(response)
    }

    async fn post_expecting(
        &self,
        path: &str,
        body: &impl Serialize,
        expected: &[StatusCode],
    ) -> bool {
        let url = self.url(path);
        debug!("POST {}", url);

        match self.client.post(&url).json(body).send().await {
            Ok(response) if expected.contains(&response.status()) => true,
            Ok(response) => {
                warn!("POST {} returned {}", url, response.status());
                false
            }
            Err(e) => {
                warn!("POST {} failed: {}", url, e);
                false
            }
        }
    }

    /// Lists backups, keeping a failed listing distinct from an empty one.
    pub async fn fetch_backups(&self) -> Result<Vec<BackupRecord>, PanelError> {
        let list = self.get_ok("backups").await?.json::<BackupList>().await?;
        Ok(list.data.into_iter().map(|b| b.attributes).collect())
    }
}

#[async_trait]
impl Panel for PanelClient {
    async fn server_status(&self) -> ServerState {
        let body = match self.get_ok("resources").await {
            Ok(response) => response.json::<Value>().await.ok(),
            Err(e) => {
                warn!("Failed to fetch server status: {}", e);
                return ServerState::Error;
            }
        };

        body.as_ref()
            .and_then(|b| b.pointer("/attributes/current_state"))
            .and_then(Value::as_str)
            .map_or(ServerState::Error, ServerState::from)
    }

    async fn send_power_signal(&self, signal: PowerSignal) -> bool {
        info!("Sending power signal {:?}", signal);
        self.post_expecting("power", &PowerRequest { signal }, &[StatusCode::NO_CONTENT])
            .await
    }

    async fn send_console_command(&self, command: &str) -> bool {
        info!("Sending console command `{}`", command);
        self.post_expecting(
            "command",
            &CommandRequest { command },
            &[StatusCode::NO_CONTENT],
        )
        .await
    }

    async fn list_backups(&self) -> Vec<BackupRecord> {
        self.fetch_backups().await.unwrap_or_else(|e| {
            warn!("Failed to list backups: {}", e);
            Vec::new()
        })
    }

    async fn create_backup(&self) -> BackupCreation {
        let backups = match self.fetch_backups().await {
            Ok(backups) => backups,
            Err(e) => {
                warn!("Failed to check existing backups: {}", e);
                return BackupCreation::ListFailed;
            }
        };

        if !backups.is_empty() {
            debug!("{} backup(s) already present", backups.len());
            return BackupCreation::AlreadyExists;
        }

        let created = self
            .post_expecting(
                "backups",
                &BackupRequest { name: BACKUP_NAME },
                &[StatusCode::OK, StatusCode::CREATED],
            )
            .await;

        if created {
            BackupCreation::Created
        } else {
            BackupCreation::Failed
        }
    }

    async fn delete_latest_backup(&self) -> BackupDeletion {
        let backups = match self.fetch_backups().await {
            Ok(backups) => backups,
            Err(e) => {
                warn!("Failed to list backups: {}", e);
                return BackupDeletion::ListFailed;
            }
        };

        let Some(latest) = backups.first() else {
            return BackupDeletion::None;
        };

        let url = self.url(&format!("backups/{}", latest.uuid));
        info!(
            "Deleting backup {} ({})",
            latest.uuid,
            latest.name.as_deref().unwrap_or("unnamed")
        );

        match self.client.delete(&url).send().await {
            Ok(response) if response.status() == StatusCode::NO_CONTENT => BackupDeletion::Deleted,
            Ok(response) => {
                warn!("DELETE {} returned {}", url, response.status());
                BackupDeletion::Failed
            }
            Err(e) => {
                warn!("DELETE {} failed: {}", url, e);
                BackupDeletion::Failed
            }
        }
    }

    async fn uptime_seconds(&self) -> Result<Option<u64>, PanelError> {
        let body = self.get_ok("resources").await?.json::<Value>().await.ok();

        Ok(body
            .as_ref()
            .and_then(|b| b.pointer("/attributes/resources/uptime"))
            .and_then(Value::as_u64)
            .map(|ms| ms / 1000))
    }
}
