//! Build notification intake.
//!
//! Turns a CI event into a formatted bot entry. The payload is schema-loose:
//! every field has a default, unknown detail keys are ignored and missing or
//! unusable detail values are replaced by placeholders.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::model::{ChatEntry, EntryKind};

/// A build/CI event posted by an external system.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildNotification {
    #[serde(rename = "buildId")]
    pub build_id: String,
    pub workflow: String,
    pub status: String,
    #[serde(deserialize_with = "lenient_details")]
    pub details: HashMap<String, Value>,
}

/// Build outcome parsed from the free-form status string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStatus {
    Success,
    Failure,
    Running,
    Cancelled,
    Other,
}

impl BuildStatus {
    /// Parse from string. Unknown values map to `Other`.
    pub fn from_str(s: &str) -> Self {
        match s {
            "success" => Self::Success,
            "failure" => Self::Failure,
            "running" => Self::Running,
            "cancelled" => Self::Cancelled,
            _ => Self::Other,
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Failure => EntryKind::Alert,
            Self::Success => EntryKind::Success,
            _ => EntryKind::Notification,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Success => "✅",
            Self::Failure => "❌",
            Self::Running => "🔄",
            Self::Cancelled => "⚠️",
            Self::Other => "📢",
        }
    }
}

impl BuildNotification {
    pub fn build_status(&self) -> BuildStatus {
        BuildStatus::from_str(&self.status)
    }

    /// Human-readable summary shown in the chat.
    pub fn summary(&self) -> String {
        let status = self.build_status();
        format!(
            "{} **{}** - {}\n\n\
             📋 Build ID: {}\n\
             ⏱️ Duration: {}s\n\
             🧪 Tests: {}/{} passed\n\
             📈 Coverage: {}%",
            status.emoji(),
            self.workflow,
            self.status.to_uppercase(),
            self.build_id,
            self.detail("duration", "N/A"),
            self.detail("testsPassed", "0"),
            self.detail("testsRun", "0"),
            self.detail("coverage", "0"),
        )
    }

    /// Convert into the bot entry that gets appended to the log.
    pub fn into_entry(self) -> ChatEntry {
        let kind = self.build_status().kind();
        let content = self.summary();
        let mut metadata = BTreeMap::new();
        metadata.insert("buildId".to_string(), self.build_id);
        metadata.insert("workflow".to_string(), self.workflow);
        ChatEntry::notification(content, kind, metadata)
    }

    fn detail(&self, key: &str, placeholder: &str) -> String {
        match self.details.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => placeholder.to_string(),
        }
    }
}

// Anything other than a JSON object (null, a list, a number) is treated as no
// details at all.
fn lenient_details<'de, D>(deserializer: D) -> Result<HashMap<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => map.into_iter().collect(),
        _ => HashMap::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Sender;
    use serde_json::json;

    fn parse(value: Value) -> BuildNotification {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_failure_with_empty_details() {
        let n = parse(json!({"buildId": "42", "workflow": "CI", "status": "failure", "details": {}}));
        let entry = n.into_entry();

        assert_eq!(entry.kind, EntryKind::Alert);
        assert_eq!(entry.sender, Sender::Bot);
        assert!(!entry.read);
        let meta = entry.metadata.unwrap();
        assert_eq!(meta.len(), 2);
        assert_eq!(meta["buildId"], "42");
        assert_eq!(meta["workflow"], "CI");
        assert!(entry.content.starts_with("❌ **CI** - FAILURE"));
        assert!(entry.content.contains("Duration: N/As"));
        assert!(entry.content.contains("Tests: 0/0 passed"));
        assert!(entry.content.contains("Coverage: 0%"));
    }

    #[test]
    fn test_status_kind_table() {
        assert_eq!(BuildStatus::from_str("success").kind(), EntryKind::Success);
        assert_eq!(BuildStatus::from_str("failure").kind(), EntryKind::Alert);
        assert_eq!(BuildStatus::from_str("running").kind(), EntryKind::Notification);
        assert_eq!(BuildStatus::from_str("cancelled").kind(), EntryKind::Notification);
        assert_eq!(BuildStatus::from_str("exploded").kind(), EntryKind::Notification);
        assert_eq!(BuildStatus::from_str("exploded").emoji(), "📢");
    }

    #[test]
    fn test_details_rendered() {
        let n = parse(json!({
            "buildId": "7",
            "workflow": "Release",
            "status": "success",
            "details": {"duration": 135, "testsPassed": 50, "testsRun": "50", "coverage": 85.5, "extra": true}
        }));
        let summary = n.summary();
        assert!(summary.starts_with("✅ **Release** - SUCCESS"));
        assert!(summary.contains("Build ID: 7"));
        assert!(summary.contains("Duration: 135s"));
        assert!(summary.contains("Tests: 50/50 passed"));
        assert!(summary.contains("Coverage: 85.5%"));
    }

    #[test]
    fn test_malformed_details_degrade() {
        let n = parse(json!({"buildId": "1", "workflow": "CI", "status": "running", "details": null}));
        assert!(n.details.is_empty());

        let n = parse(json!({"status": "running", "details": {"coverage": null, "testsRun": [1, 2]}}));
        let summary = n.summary();
        assert!(summary.contains("Coverage: 0%"));
        assert!(summary.contains("Tests: 0/0 passed"));
    }

    #[test]
    fn test_missing_fields_default() {
        let n = parse(json!({}));
        assert_eq!(n.build_status(), BuildStatus::Other);
        let entry = n.into_entry();
        assert_eq!(entry.kind, EntryKind::Notification);
        assert_eq!(entry.metadata.unwrap()["buildId"], "");
    }
}
