//! Keyword-driven auto-responder.
//!
//! The bot answers every chat message with one of five templates. The branch
//! is picked by lower-cased substring matching, first match wins:
//!
//! | keywords                  | template   | kind           |
//! |---------------------------|------------|----------------|
//! | `build`, `status`         | status     | `notification` |
//! | `erro`, `fail`            | failure    | `alert`        |
//! | `sucesso`, `success`      | success    | `success`      |
//! | `help`, `ajuda`, `?`      | help       | `text`         |
//! | anything else             | greeting   | `text`         |

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RelayResult;
use crate::model::EntryKind;

/// The text of each responder template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    pub status: String,
    pub failure: String,
    pub success: String,
    pub help: String,
    pub greeting: String,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            status: "📊 **Build Status**\n\n\
                ✅ CI/CD Pipeline (main): SUCCESS\n\
                ⏱️ Duration: 2m 15s\n\
                🧪 Tests: 50/50 passed\n\
                📈 Coverage: 85%\n\n\
                ✅ Release (v1.0.0): SUCCESS\n\
                ⏱️ Published to crates.io\n\n\
                ⚠️ Deploy (develop): RUNNING...\n\
                ⏳ Elapsed: 1m 30s"
                .to_string(),
            failure: "❌ **Errors Detected**\n\n\
                🔴 Deploy (feature/new-api): FAILED\n\n\
                Error:\n```\nTest failed: authentication_test\nTimeout after 5000ms\n```\n\n\
                File: src/auth.rs:145\n\n\
                Suggested fix:\nRaise the timeout or review the authentication logic."
                .to_string(),
            success: "✅ **All Builds Passed!**\n\n\
                🏆 Success rate: 96.67%\n\
                📈 Trend: +2.3% since yesterday\n\n\
                🚀 Latest releases:\n\
                • v2.1.0 - Released 2h ago\n\
                • v2.0.9 - Released 1d ago\n\
                • v2.0.8 - Released 2d ago\n\n\
                Congratulations! 🎉"
                .to_string(),
            help: "📚 Available commands:\n\n\
                • **build status** - Show build status\n\
                • **errors** - List recent errors\n\
                • **success** - Show successful builds\n\
                • **deploy** - Deployment status\n\
                • **metrics** - General metrics"
                .to_string(),
            greeting: "👋 Hi! I'm the VIZZIO Bot. I can help with:\n\n\
                🔍 **build status** - Show build status\n\
                ⚠️ **errors** - List recent errors\n\
                ✅ **success** - Show successful builds\n\
                📊 **metrics** - General metrics\n\
                🚀 **deploy** - Deployment status\n\n\
                Try: \"build status\", \"errors\", \"success\""
                .to_string(),
        }
    }
}

impl Vocabulary {
    /// Parse a vocabulary from TOML. Missing keys keep their default text.
    pub fn from_toml_str(s: &str) -> RelayResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Load a vocabulary from a TOML file.
    pub fn load(path: &Path) -> RelayResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }
}

/// Which template answered a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Status,
    Failure,
    Success,
    Help,
    Greeting,
}

impl Intent {
    /// Classify a message. Order matters: first match wins.
    pub fn classify(text: &str) -> Self {
        let lower = text.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| lower.contains(w));

        if has(&["build", "status"]) {
            Self::Status
        } else if has(&["erro", "fail"]) {
            Self::Failure
        } else if has(&["sucesso", "success"]) {
            Self::Success
        } else if has(&["help", "ajuda", "?"]) {
            Self::Help
        } else {
            Self::Greeting
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Status => EntryKind::Notification,
            Self::Failure => EntryKind::Alert,
            Self::Success => EntryKind::Success,
            Self::Help | Self::Greeting => EntryKind::Text,
        }
    }
}

/// A reply produced by the responder.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub content: String,
    pub kind: EntryKind,
}

/// Stateless classifier from user text to a bot reply.
#[derive(Debug, Clone, Default)]
pub struct Responder {
    vocabulary: Vocabulary,
}

impl Responder {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn respond(&self, text: &str) -> Reply {
        let intent = Intent::classify(text);
        let content = match intent {
            Intent::Status => &self.vocabulary.status,
            Intent::Failure => &self.vocabulary.failure,
            Intent::Success => &self.vocabulary.success,
            Intent::Help => &self.vocabulary.help,
            Intent::Greeting => &self.vocabulary.greeting,
        };
        Reply {
            content: content.clone(),
            kind: intent.kind(),
        }
    }
}
