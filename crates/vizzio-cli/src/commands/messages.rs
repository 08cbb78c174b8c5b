//! Show recent chat messages.

use anyhow::Result;
use clap::Args;
use vizzio_core::notifier::{RelayNotifier, DEFAULT_RELAY_URL};

use crate::output;

#[derive(Args)]
pub struct MessagesArgs {
    /// Number of messages to show
    #[arg(long, default_value = "20")]
    pub limit: usize,

    /// Relay base URL
    #[arg(long, env = "VIZZIO_URL", default_value = DEFAULT_RELAY_URL)]
    pub url: String,
}

pub async fn execute(args: MessagesArgs) -> Result<()> {
    let notifier = RelayNotifier::with_url(&args.url);
    let entries = notifier.recent_messages(args.limit).await?;
    let unread = notifier.unread_count().await?;

    output::print_entries(&entries);
    println!();
    output::print_unread(unread);
    Ok(())
}
