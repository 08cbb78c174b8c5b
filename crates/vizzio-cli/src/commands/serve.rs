//! Relay server command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tracing::{info, warn};
use vizzio_core::hub::Hub;
use vizzio_core::responder::{Responder, Vocabulary};

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "VIZZIO_PORT", default_value = "3001")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "VIZZIO_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Delay before the bot answers a chat message, in milliseconds
    #[arg(long, env = "VIZZIO_REPLY_DELAY_MS", default_value = "1000")]
    pub reply_delay_ms: u64,

    /// TOML file overriding the bot's reply templates
    #[arg(long, env = "VIZZIO_VOCABULARY")]
    pub vocabulary: Option<PathBuf>,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file used with --log
    #[arg(long, default_value = "vizzio-serve.log")]
    pub log_file: PathBuf,
}

pub async fn execute(args: ServeArgs) -> Result<()> {
    let vocabulary = match &args.vocabulary {
        Some(path) => {
            let vocabulary = Vocabulary::load(path)
                .with_context(|| format!("failed to load vocabulary from {}", path.display()))?;
            info!(path = %path.display(), "Loaded responder vocabulary");
            vocabulary
        }
        None => Vocabulary::default(),
    };
    let hub = Hub::new(
        Responder::new(vocabulary),
        Duration::from_millis(args.reply_delay_ms),
    );

    println!();
    println!("  {} {}", "VIZZIO".cyan().bold(), "Relay".bold());
    println!();
    println!("  {}     http://{}:{}", "Status".green(), args.host, args.port);
    println!("  {}        http://{}:{}/api/chat", "API".green(), args.host, args.port);
    println!("  {}  ws://{}:{}/ws", "WebSocket".green(), args.host, args.port);
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    vizzio_web::run_server(hub, &args.host, args.port, shutdown_signal()).await?;

    Ok(())
}

/// Resolves on SIGINT (Ctrl+C) or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => info!("Received SIGINT (Ctrl+C), shutting down"),
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down"),
                }
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                ctrl_c.await;
                info!("Received SIGINT (Ctrl+C), shutting down");
            }
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c.await;
        info!("Received Ctrl+C, shutting down");
    }
}
