//! Fake third party APIs for local development and integration tests.

use std::net::{IpAddr, Ipv4Addr};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use url::Url;

pub mod cdn;
pub mod content;
pub mod email;

/// Serves `router` on an ephemeral localhost port in the background and
/// returns its base url.
pub async fn spawn(router: Router) -> anyhow::Result<Url> {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
        .await
        .context("Failed to bind to an ephemeral port")?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move { axum::serve(listener, router).await });

    format!("http://{addr}/")
        .parse()
        .context("Failed to build server url")
}

async fn serve(router: Router, host: IpAddr, port: u16) -> anyhow::Result<()> {
    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router)
        .await
        .context("Failed to start HTTP server")
}
