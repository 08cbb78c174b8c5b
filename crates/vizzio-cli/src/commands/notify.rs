//! Post a build notification to a running relay.

use std::collections::HashMap;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde_json::Value;
use vizzio_core::intake::BuildNotification;
use vizzio_core::notifier::{RelayNotifier, DEFAULT_RELAY_URL};
use vizzio_core::{RelayError, RelayResult};

#[derive(Args)]
pub struct NotifyArgs {
    /// Build identifier
    #[arg(long)]
    pub build_id: String,

    /// Workflow name
    #[arg(long)]
    pub workflow: String,

    /// Build status (success, failure, running, cancelled, ...)
    #[arg(long)]
    pub status: String,

    /// Detail as key=value, e.g. --detail coverage=85 (repeatable)
    #[arg(long = "detail")]
    pub details: Vec<String>,

    /// Relay base URL
    #[arg(long, env = "VIZZIO_URL", default_value = DEFAULT_RELAY_URL)]
    pub url: String,
}

impl NotifyArgs {
    pub fn to_notification(&self) -> RelayResult<BuildNotification> {
        let mut details = HashMap::new();
        for pair in &self.details {
            let (key, raw) = pair
                .split_once('=')
                .ok_or_else(|| RelayError::config(format!("detail '{}' is not key=value", pair)))?;
            // numbers stay numbers, everything else is text
            let value = serde_json::from_str::<serde_json::Number>(raw)
                .map(Value::Number)
                .unwrap_or_else(|_| Value::String(raw.to_string()));
            details.insert(key.to_string(), value);
        }

        Ok(BuildNotification {
            build_id: self.build_id.clone(),
            workflow: self.workflow.clone(),
            status: self.status.clone(),
            details,
        })
    }
}

pub async fn execute(args: NotifyArgs) -> Result<()> {
    let notification = args.to_notification()?;
    let notifier = RelayNotifier::with_url(&args.url);
    notifier.notify_build(&notification).await?;

    println!(
        "{} {} {} {}",
        "✓".green(),
        notification.workflow.bold(),
        notification.status.to_uppercase(),
        format!("(build {})", notification.build_id).dimmed()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(details: &[&str]) -> NotifyArgs {
        NotifyArgs {
            build_id: "1".to_string(),
            workflow: "CI".to_string(),
            status: "success".to_string(),
            details: details.iter().map(|s| s.to_string()).collect(),
            url: DEFAULT_RELAY_URL.to_string(),
        }
    }

    #[test]
    fn test_detail_values_keep_numbers() {
        let n = args(&["duration=12.5", "branch=main"]).to_notification().unwrap();
        assert!(n.details["duration"].is_number());
        assert_eq!(n.details["branch"], "main");
    }

    #[test]
    fn test_detail_without_equals_is_rejected() {
        let err = args(&["coverage"]).to_notification().unwrap_err();
        assert!(matches!(err, RelayError::Config(_)));
    }
}
