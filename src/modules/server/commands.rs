//! Slash command entry points. Anything touching the panel defers first so
//! Discord gets its acknowledgment before the HTTP round trip.

use super::commander::{BackupAction, WhitelistAction, IP_REPLY, VOTE_REPLY, WEBSITE_REPLY};
use crate::{Context, Error};
use poise::command;

/// Start the Minecraft server if it's offline
#[command(slash_command, guild_only)]
pub async fn start(ctx: Context<'_>) -> Result<(), Error> {
    ctx.defer().await?;

    let reply = ctx.data().commander.start().await;
    ctx.say(reply).await?;
    Ok(())
}

/// Stop the Minecraft server (admin only)
#[command(slash_command, guild_only)]
pub async fn stop(ctx: Context<'_>) -> Result<(), Error> {
    ctx.defer().await?;

    let reply = ctx.data().commander.stop(ctx.author().id.get()).await;
    ctx.say(reply).await?;
    Ok(())
}

/// Restart the Minecraft server (admin only)
#[command(slash_command, guild_only)]
pub async fn restart(ctx: Context<'_>) -> Result<(), Error> {
    ctx.defer().await?;

    let reply = ctx.data().commander.restart(ctx.author().id.get()).await;
    ctx.say(reply).await?;
    Ok(())
}

/// Check the current server status
#[command(slash_command, guild_only)]
pub async fn status(ctx: Context<'_>) -> Result<(), Error> {
    ctx.defer().await?;

    let reply = ctx.data().commander.status().await;
    ctx.say(reply).await?;
    Ok(())
}

/// Check how long the server has been online
#[command(slash_command, guild_only)]
pub async fn uptime(ctx: Context<'_>) -> Result<(), Error> {
    ctx.defer().await?;

    let reply = ctx.data().commander.uptime().await;
    ctx.say(reply).await?;
    Ok(())
}

/// Get the Minecraft server IP
#[command(slash_command, guild_only)]
pub async fn ip(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say(IP_REPLY).await?;
    Ok(())
}

/// View the SMP's official website
#[command(slash_command, guild_only)]
pub async fn website(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say(WEBSITE_REPLY).await?;
    Ok(())
}

/// Vote for the SMP to support us!
#[command(slash_command, guild_only)]
pub async fn vote(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say(VOTE_REPLY).await?;
    Ok(())
}

/// Execute a console command (admin only)
#[command(slash_command, guild_only)]
pub async fn cmd(
    ctx: Context<'_>,
    #[description = "The command to run in server console"] command: String,
) -> Result<(), Error> {
    ctx.defer().await?;

    let reply = ctx
        .data()
        .commander
        .cmd(ctx.author().id.get(), &command)
        .await;
    ctx.say(reply).await?;
    Ok(())
}

/// Manage whitelist (admin only)
#[command(slash_command, guild_only)]
pub async fn whitelist(
    ctx: Context<'_>,
    #[description = "Choose an action"] action: WhitelistAction,
    #[description = "Minecraft username"] player: Option<String>,
) -> Result<(), Error> {
    ctx.defer().await?;

    let reply = ctx
        .data()
        .commander
        .whitelist(ctx.author().id.get(), action, player.as_deref())
        .await;
    ctx.say(reply).await?;
    Ok(())
}

/// Manage server backups (admin only)
#[command(slash_command, guild_only)]
pub async fn backup(
    ctx: Context<'_>,
    #[description = "Action to perform: create or delete"] action: BackupAction,
) -> Result<(), Error> {
    ctx.defer().await?;

    let reply = ctx
        .data()
        .commander
        .backup(ctx.author().id.get(), action)
        .await;
    ctx.say(reply).await?;
    Ok(())
}
