use config::Config;
use modules::{
    panel::PanelClient,
    server::{self, commander::Commander},
    system::{events::ReadyHandler, keepalive},
};
use poise::serenity_prelude::{self as serenity, CreateAllowedMentions, GuildId};
use std::sync::Arc;
use tracing::{error, info, trace, warn};

mod config;
mod events;
mod modules;

use crate::events::EventManager;

#[derive(Clone, Debug)]
pub struct Data {
    pub commander: Arc<Commander<PanelClient>>,
    pub event_manager: Arc<EventManager>,
}

type Error = Box<dyn std::error::Error + Send + Sync>;
type Context<'a> = poise::Context<'a, Data, Error>;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();
    info!("starting panelbot");

    let config = Config::from_env().expect("invalid configuration");
    if config.admins.is_empty() {
        warn!("ADMIN_IDS is empty, privileged commands will be refused for everyone");
    } else {
        info!("loaded {} admin(s)", config.admins.len());
    }

    let panel = PanelClient::new(
        &config.panel_url,
        &config.server_id,
        &config.api_key,
        config.panel_timeout,
    )
    .expect("failed to build panel client");
    let commander = Arc::new(Commander::new(panel, config.admins.clone()));

    let (bind, port) = (config.bind.clone(), config.port);
    tokio::spawn(async move {
        if let Err(e) = keepalive::serve(&bind, port).await {
            error!("Keep-alive listener stopped: {}", e);
        }
    });

    let guild_id = GuildId::new(config.guild_id);
    let intents = serenity::GatewayIntents::non_privileged();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions::<Data, Error> {
            allowed_mentions: Some(CreateAllowedMentions::new().empty_roles().empty_users()),
            commands: server::commands(),
            pre_command: |ctx| {
                Box::pin(async move {
                    trace!(
                        "Command {} used by {} in {}",
                        ctx.command().qualified_name,
                        ctx.author().tag(),
                        ctx.guild_id()
                            .map_or_else(|| "DM".to_string(), |id| id.to_string())
                    );
                })
            },
            post_command: |ctx| {
                Box::pin(async move {
                    info!(
                        "Command {} completed for {} in {}",
                        ctx.command().qualified_name,
                        ctx.author().tag(),
                        ctx.guild_id()
                            .map_or_else(|| "DM".to_string(), |id| id.to_string())
                    );
                })
            },
            on_error: |error| {
                Box::pin(async move {
                    match error {
                        poise::FrameworkError::Command { error, ctx, .. } => {
                            error!(
                                "Command {} failed for {} in {}: {:?}",
                                ctx.command().qualified_name,
                                ctx.author().tag(),
                                ctx.guild_id()
                                    .map_or_else(|| "DM".to_string(), |id| id.to_string()),
                                error
                            );
                        }
                        err => error!("Other framework error: {:?}", err),
                    }
                })
            },
            event_handler: |ctx, event, _framework, data| {
                Box::pin(async move {
                    data.event_manager.handle_event(ctx, event).await;
                    Ok(())
                })
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                info!("registering commands in guild {}", guild_id);
                poise::builtins::register_in_guild(ctx, &framework.options().commands, guild_id)
                    .await?;

                let event_manager = Arc::new(EventManager::new().with_handler(ReadyHandler));

                Ok(Data {
                    commander,
                    event_manager,
                })
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(&config.bot_token, intents)
        .framework(framework)
        .await
        .expect("failed to create Discord client");

    if let Err(e) = client.start().await {
        error!("Discord client error: {:?}", e);
    }
}
