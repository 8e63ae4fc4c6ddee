//! Reply logic behind the server slash commands.
//!
//! Every method returns the text to send back to the caller. Panel failures
//! end up in that text; nothing here returns an error.

use super::auth::AdminList;
use crate::modules::panel::{BackupCreation, BackupDeletion, Panel, PowerSignal, ServerState};
use tracing::info;

pub const IP_REPLY: &str = "📡 Server IP: `paid-1.guardxhosting.in`";
pub const WEBSITE_REPLY: &str = "🌍 Visit our official website to explore everything about the server:\nhttps://mcdeltasmp.vercel.app/";
pub const VOTE_REPLY: &str = "**🗳 Vote for McDelta SMP!**\n\
    1. https://discordservers.com/bump/1354330313240871022\n\
    2. https://discords.com/servers/1354330313240871022/upvote\n\
    3. https://discadia.com/vote/mcdeltasmp/";

const NOT_ALLOWED: &str = "❌ You’re not allowed to use this.";
const NOT_AUTHORIZED: &str = "❌ You are not authorized.";
const NOT_AUTHORIZED_WHITELIST: &str = "❌ You’re not authorized to manage whitelist.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
pub enum WhitelistAction {
    #[name = "add"]
    Add,
    #[name = "remove"]
    Remove,
    #[name = "list"]
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
pub enum BackupAction {
    #[name = "create"]
    Create,
    #[name = "delete"]
    Delete,
}

/// Formats an uptime as whole hours and minutes, dropping leftover seconds.
pub fn format_uptime(secs: u64) -> String {
    let (hours, minutes) = (secs / 60 / 60, secs / 60 % 60);
    format!("{}h {}m", hours, minutes)
}

#[derive(Debug)]
pub struct Commander<P> {
    panel: P,
    admins: AdminList,
}

impl<P: Panel> Commander<P> {
    pub fn new(panel: P, admins: AdminList) -> Self {
        Self { panel, admins }
    }

    fn denied(&self, user_id: u64, command: &str) -> bool {
        if self.admins.is_admin(user_id) {
            return false;
        }
        info!("Denied /{} for non-admin {}", command, user_id);
        true
    }

    pub async fn start(&self) -> String {
        match self.panel.server_status().await {
            ServerState::Running => "✅ Server is already online.".into(),
            ServerState::Starting => "⏳ Server is already starting.".into(),
            ServerState::Offline => {
                if self.panel.send_power_signal(PowerSignal::Start).await {
                    "🚀 Server is starting!".into()
                } else {
                    "❌ Failed to start the server.".into()
                }
            }
            _ => "⚠️ Error checking server status.".into(),
        }
    }

    pub async fn stop(&self, user_id: u64) -> String {
        if self.denied(user_id, "stop") {
            return NOT_ALLOWED.into();
        }

        if self.panel.send_power_signal(PowerSignal::Stop).await {
            "🛑 Stopping…".into()
        } else {
            "❌ Failed to stop.".into()
        }
    }

    pub async fn restart(&self, user_id: u64) -> String {
        if self.denied(user_id, "restart") {
            return NOT_ALLOWED.into();
        }

        if self.panel.send_power_signal(PowerSignal::Restart).await {
            "🔁 Restarting…".into()
        } else {
            "❌ Failed to restart.".into()
        }
    }

    pub async fn status(&self) -> String {
        let state = self.panel.server_status().await;
        format!("📊 Server status: **{}**", state.to_string().to_uppercase())
    }

    pub async fn uptime(&self) -> String {
        match self.panel.uptime_seconds().await {
            Ok(Some(secs)) => format!("🕒 Uptime: **{}**", format_uptime(secs)),
            Ok(None) => "⚠️ Uptime info not available.".into(),
            Err(_) => "❌ Could not fetch server status.".into(),
        }
    }

    /// Runs `command` in the server console as-is. Admins are trusted with
    /// arbitrary console input.
    pub async fn cmd(&self, user_id: u64, command: &str) -> String {
        if self.denied(user_id, "cmd") {
            return NOT_AUTHORIZED.into();
        }

        if self.panel.send_console_command(command).await {
            format!("✅ Command sent: `{}`", command)
        } else {
            "❌ Failed to send command.".into()
        }
    }

    pub async fn whitelist(
        &self,
        user_id: u64,
        action: WhitelistAction,
        player: Option<&str>,
    ) -> String {
        if self.denied(user_id, "whitelist") {
            return NOT_AUTHORIZED_WHITELIST.into();
        }

        let player = player.filter(|p| !p.trim().is_empty());
        let command = match (action, player) {
            (WhitelistAction::List, _) => "whitelist list".to_string(),
            (WhitelistAction::Add, Some(player)) => format!("whitelist add {}", player),
            (WhitelistAction::Remove, Some(player)) => format!("whitelist remove {}", player),
            (_, None) => return "❗ You must provide a player name.".into(),
        };

        if self.panel.send_console_command(&command).await {
            format!("✅ Sent command: `{}`", command)
        } else {
            "❌ Failed to send whitelist command.".into()
        }
    }

    pub async fn backup(&self, user_id: u64, action: BackupAction) -> String {
        if self.denied(user_id, "backup") {
            return NOT_AUTHORIZED.into();
        }

        let reply = match action {
            BackupAction::Create => match self.panel.create_backup().await {
                BackupCreation::Created => "✅ Backup is being created!",
                BackupCreation::AlreadyExists => {
                    "📦 Backup limit reached. Please delete an old backup first."
                }
                BackupCreation::Failed => {
                    "❌ Failed to create backup, but it might have been triggered."
                }
                BackupCreation::ListFailed => "⚠️ Failed to check existing backups.",
            },
            BackupAction::Delete => match self.panel.delete_latest_backup().await {
                BackupDeletion::Deleted => "🗑 Backup deleted successfully.",
                BackupDeletion::None => "🗑 No existing backups to delete.",
                BackupDeletion::Failed => "❌ Failed to delete backup.",
                BackupDeletion::ListFailed => "⚠️ Failed to list backups.",
            },
        };
        reply.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::panel::{MockPanel, PanelError};
    use mockall::predicate::eq;
    use reqwest::StatusCode;

    const ADMIN: u64 = 111;
    const STRANGER: u64 = 222;

    fn commander(panel: MockPanel) -> Commander<MockPanel> {
        Commander::new(panel, AdminList::new([ADMIN]))
    }

    fn with_status(state: ServerState) -> MockPanel {
        let mut panel = MockPanel::new();
        panel
            .expect_server_status()
            .times(1)
            .returning(move || state);
        panel
    }

    #[tokio::test]
    async fn test_privileged_commands_reject_strangers_without_panel_calls() {
        // MockPanel panics on any call without an expectation.
        let commander = commander(MockPanel::new());

        assert_eq!(commander.stop(STRANGER).await, NOT_ALLOWED);
        assert_eq!(commander.restart(STRANGER).await, NOT_ALLOWED);
        assert_eq!(commander.cmd(STRANGER, "op me").await, NOT_AUTHORIZED);
        assert_eq!(
            commander
                .whitelist(STRANGER, WhitelistAction::Add, Some("Steve"))
                .await,
            NOT_AUTHORIZED_WHITELIST
        );
        assert_eq!(
            commander.backup(STRANGER, BackupAction::Create).await,
            NOT_AUTHORIZED
        );
        assert_eq!(
            commander.backup(STRANGER, BackupAction::Delete).await,
            NOT_AUTHORIZED
        );
    }

    #[tokio::test]
    async fn test_start_when_running_sends_no_signal() {
        let commander = commander(with_status(ServerState::Running));
        assert_eq!(commander.start().await, "✅ Server is already online.");
    }

    #[tokio::test]
    async fn test_start_when_starting() {
        let commander = commander(with_status(ServerState::Starting));
        assert_eq!(commander.start().await, "⏳ Server is already starting.");
    }

    #[tokio::test]
    async fn test_start_when_offline() {
        let mut panel = with_status(ServerState::Offline);
        panel
            .expect_send_power_signal()
            .with(eq(PowerSignal::Start))
            .times(1)
            .returning(|_| true);

        assert_eq!(commander(panel).start().await, "🚀 Server is starting!");
    }

    #[tokio::test]
    async fn test_start_signal_rejected() {
        let mut panel = with_status(ServerState::Offline);
        panel
            .expect_send_power_signal()
            .times(1)
            .returning(|_| false);

        assert_eq!(
            commander(panel).start().await,
            "❌ Failed to start the server."
        );
    }

    #[tokio::test]
    async fn test_start_with_unknown_status() {
        let commander = commander(with_status(ServerState::Error));
        assert_eq!(commander.start().await, "⚠️ Error checking server status.");

        let commander = self::commander(with_status(ServerState::Stopping));
        assert_eq!(commander.start().await, "⚠️ Error checking server status.");
    }

    #[tokio::test]
    async fn test_stop_and_restart() {
        let mut panel = MockPanel::new();
        panel
            .expect_send_power_signal()
            .with(eq(PowerSignal::Stop))
            .times(1)
            .returning(|_| true);
        panel
            .expect_send_power_signal()
            .with(eq(PowerSignal::Restart))
            .times(1)
            .returning(|_| false);

        let commander = commander(panel);
        assert_eq!(commander.stop(ADMIN).await, "🛑 Stopping…");
        assert_eq!(commander.restart(ADMIN).await, "❌ Failed to restart.");
    }

    #[tokio::test]
    async fn test_status_is_uppercased() {
        let commander = commander(with_status(ServerState::Offline));
        assert_eq!(commander.status().await, "📊 Server status: **OFFLINE**");

        let commander = self::commander(with_status(ServerState::Error));
        assert_eq!(commander.status().await, "📊 Server status: **ERROR**");
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(3725), "1h 2m");
        assert_eq!(format_uptime(59), "0h 0m");
        assert_eq!(format_uptime(90_000), "25h 0m");
    }

    #[tokio::test]
    async fn test_uptime_replies() {
        let mut panel = MockPanel::new();
        panel
            .expect_uptime_seconds()
            .times(1)
            .returning(|| Ok(Some(3_725_000 / 1000)));
        assert_eq!(commander(panel).uptime().await, "🕒 Uptime: **1h 2m**");

        let mut panel = MockPanel::new();
        panel.expect_uptime_seconds().returning(|| Ok(None));
        assert_eq!(
            commander(panel).uptime().await,
            "⚠️ Uptime info not available."
        );

        let mut panel = MockPanel::new();
        panel
            .expect_uptime_seconds()
            .returning(|| Err(PanelError::Status(StatusCode::INTERNAL_SERVER_ERROR)));
        assert_eq!(
            commander(panel).uptime().await,
            "❌ Could not fetch server status."
        );
    }

    #[tokio::test]
    async fn test_cmd_forwards_command() {
        let mut panel = MockPanel::new();
        panel
            .expect_send_console_command()
            .withf(|command| command == "say hello")
            .times(1)
            .returning(|_| true);

        assert_eq!(
            commander(panel).cmd(ADMIN, "say hello").await,
            "✅ Command sent: `say hello`"
        );
    }

    #[tokio::test]
    async fn test_cmd_failure() {
        let mut panel = MockPanel::new();
        panel.expect_send_console_command().returning(|_| false);

        assert_eq!(
            commander(panel).cmd(ADMIN, "stop").await,
            "❌ Failed to send command."
        );
    }

    #[tokio::test]
    async fn test_whitelist_requires_player() {
        let commander = commander(MockPanel::new());
        let expected = "❗ You must provide a player name.";

        assert_eq!(
            commander.whitelist(ADMIN, WhitelistAction::Add, None).await,
            expected
        );
        assert_eq!(
            commander
                .whitelist(ADMIN, WhitelistAction::Add, Some(""))
                .await,
            expected
        );
        assert_eq!(
            commander
                .whitelist(ADMIN, WhitelistAction::Remove, Some("  "))
                .await,
            expected
        );
    }

    #[tokio::test]
    async fn test_whitelist_add() {
        let mut panel = MockPanel::new();
        panel
            .expect_send_console_command()
            .withf(|command| command == "whitelist add Steve")
            .times(1)
            .returning(|_| true);

        assert_eq!(
            commander(panel)
                .whitelist(ADMIN, WhitelistAction::Add, Some("Steve"))
                .await,
            "✅ Sent command: `whitelist add Steve`"
        );
    }

    #[tokio::test]
    async fn test_whitelist_list_ignores_player() {
        let mut panel = MockPanel::new();
        panel
            .expect_send_console_command()
            .withf(|command| command == "whitelist list")
            .times(1)
            .returning(|_| false);

        assert_eq!(
            commander(panel)
                .whitelist(ADMIN, WhitelistAction::List, Some("Alex"))
                .await,
            "❌ Failed to send whitelist command."
        );
    }

    #[tokio::test]
    async fn test_backup_create_replies() {
        let cases = [
            (BackupCreation::Created, "✅ Backup is being created!"),
            (
                BackupCreation::AlreadyExists,
                "📦 Backup limit reached. Please delete an old backup first.",
            ),
            (
                BackupCreation::Failed,
                "❌ Failed to create backup, but it might have been triggered.",
            ),
            (
                BackupCreation::ListFailed,
                "⚠️ Failed to check existing backups.",
            ),
        ];

        for (outcome, reply) in cases {
            let mut panel = MockPanel::new();
            panel
                .expect_create_backup()
                .times(1)
                .returning(move || outcome);
            assert_eq!(commander(panel).backup(ADMIN, BackupAction::Create).await, reply);
        }
    }

    #[tokio::test]
    async fn test_backup_delete_replies() {
        let cases = [
            (BackupDeletion::Deleted, "🗑 Backup deleted successfully."),
            (BackupDeletion::None, "🗑 No existing backups to delete."),
            (BackupDeletion::Failed, "❌ Failed to delete backup."),
            (BackupDeletion::ListFailed, "⚠️ Failed to list backups."),
        ];

        for (outcome, reply) in cases {
            let mut panel = MockPanel::new();
            panel
                .expect_delete_latest_backup()
                .times(1)
                .returning(move || outcome);
            assert_eq!(commander(panel).backup(ADMIN, BackupAction::Delete).await, reply);
        }
    }
}
