use crate::events::EventHandler;
use crate::Error;
use async_trait::async_trait;
use poise::serenity_prelude::{ActivityData, Context, FullEvent, OnlineStatus};
use tracing::info;

/// Logs the bot identity and sets its presence once the gateway is ready.
#[derive(Debug, Clone)]
pub struct ReadyHandler;

#[async_trait]
impl EventHandler for ReadyHandler {
    fn name(&self) -> &str {
        "Ready"
    }

    async fn handle(&self, ctx: &Context, event: &FullEvent) -> Result<(), Error> {
        if let FullEvent::Ready { data_about_bot } = event {
            info!("Ready as {}", data_about_bot.user.name);
            ctx.set_presence(
                Some(ActivityData::watching("over the server")),
                OnlineStatus::Online,
            )
        }
        Ok(())
    }
}
