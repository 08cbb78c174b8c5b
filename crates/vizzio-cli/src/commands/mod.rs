//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod messages;
pub mod notify;
pub mod serve;

/// VIZZIO - build notifications and live chat over WebSocket
#[derive(Parser)]
#[command(name = "vizzio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the relay server
    Serve(serve::ServeArgs),

    /// Post a build notification to a running relay
    Notify(notify::NotifyArgs),

    /// Show recent messages from a running relay
    Messages(messages::MessagesArgs),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Serve(args) => serve::execute(args).await,
            Commands::Notify(args) => notify::execute(args).await,
            Commands::Messages(args) => messages::execute(args).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::try_parse_from(["vizzio", "serve"]).unwrap();
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.port, 3001);
        assert_eq!(args.host, "127.0.0.1");
        assert_eq!(args.reply_delay_ms, 1000);
        assert!(args.vocabulary.is_none());
        assert!(!args.log);
    }

    #[test]
    fn test_notify_details() {
        let cli = Cli::try_parse_from([
            "vizzio", "notify", "--build-id", "42", "--workflow", "CI", "--status", "failure",
            "--detail", "coverage=85", "--detail", "testsRun=10",
        ])
        .unwrap();
        let Commands::Notify(args) = cli.command else {
            panic!("expected notify");
        };
        let notification = args.to_notification().unwrap();
        assert_eq!(notification.build_id, "42");
        assert_eq!(notification.details["coverage"], 85);
        assert_eq!(notification.details["testsRun"], 10);
    }
}
