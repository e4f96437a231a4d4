//! chineurd — deal-proxy daemon.
//!
//! Serves the deals endpoint over HTTP. Upstream credentials come from
//! the environment (or flags) and are required: the process refuses to
//! start without them.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::info;

use chineur::{Chineur, Credentials, server};

/// Chineur — discount-deal proxy daemon.
#[derive(Parser)]
#[command(name = "chineurd")]
#[command(version)]
#[command(about = "Discount-deal proxy for the Amazon Product Advertising API")]
struct Args {
    /// Address to bind.
    #[arg(long, env = "CHINEUR_ADDR", default_value = "127.0.0.1:3000")]
    addr: SocketAddr,

    /// Marketplace to search.
    #[arg(long, env = "AMAZON_MARKETPLACE", default_value = "www.amazon.fr")]
    marketplace: String,

    /// Partner access key.
    #[arg(long, env = "AMAZON_ACCESS_KEY", hide_env_values = true)]
    access_key: String,

    /// Partner secret key.
    #[arg(long, env = "AMAZON_SECRET_KEY", hide_env_values = true)]
    secret_key: String,

    /// Partner tag (associate tag).
    #[arg(long, env = "AMAZON_PARTNER_TAG")]
    partner_tag: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let gateway = Chineur::builder()
        .credentials(Credentials {
            access_key: args.access_key,
            secret_key: args.secret_key,
            partner_tag: args.partner_tag,
        })
        .marketplace(args.marketplace)
        .build()?;

    // A CancellationToken propagates the shutdown signal to the accept loop.
    let shutdown = CancellationToken::new();
    let shutdown_signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
            shutdown_signal.cancel();
        }
    });

    server::serve(args.addr, Arc::new(gateway), shutdown).await?;

    Ok(())
}
