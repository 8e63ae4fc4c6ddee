//! Fan-out of gateway events to the handlers registered at startup.

use crate::Error;
use async_trait::async_trait;
use futures::stream::{FuturesUnordered, StreamExt};
use poise::serenity_prelude::{Context, FullEvent};
use std::fmt::Debug;
use std::sync::Arc;
use tracing::{error, trace};

#[async_trait]
pub trait EventHandler: Send + Sync + Debug {
    fn name(&self) -> &str;
    async fn handle(&self, ctx: &Context, event: &FullEvent) -> Result<(), Error>;
}

#[derive(Debug, Default, Clone)]
pub struct EventManager {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_handler(mut self, handler: impl EventHandler + 'static) -> Self {
        self.handlers.push(Arc::new(handler));
        self
    }

    /// Runs every handler on its own task; a failing handler only logs.
    pub async fn handle_event(&self, ctx: &Context, event: &FullEvent) {
        trace!("Dispatching event to {} handler(s)", self.handlers.len());

        let mut futures: FuturesUnordered<_> = self
            .handlers
            .iter()
            .map(|handler| {
                let handler = Arc::clone(handler);
                let ctx = ctx.clone();
                let event = event.clone();

                tokio::spawn(async move {
                    if let Err(e) = handler.handle(&ctx, &event).await {
                        error!("Error in event handler {}: {}", handler.name(), e);
                    }
                })
            })
            .collect();

        while futures.next().await.is_some() {}
    }
}
