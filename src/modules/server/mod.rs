pub mod auth;
pub mod commander;
pub mod commands;

use crate::{Data, Error};
use commands::*;

/// Every slash command managing the game server, registered at the top level.
pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        start(),
        stop(),
        restart(),
        status(),
        uptime(),
        ip(),
        website(),
        vote(),
        cmd(),
        whitelist(),
        backup(),
    ]
}
