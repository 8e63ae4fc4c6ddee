//! Always-200 HTTP endpoint so hosting platforms see the process as alive.

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tracing::info;

pub fn router() -> Router {
    Router::new().route("/", get(alive))
}

async fn alive() -> &'static str {
    "I'm alive"
}

pub async fn serve(bind: &str, port: u16) -> std::io::Result<()> {
    let listener = TcpListener::bind(format!("{}:{}", bind, port)).await?;
    info!("Keep-alive listening on {}", listener.local_addr()?);

    axum::serve(listener, router()).await
}
