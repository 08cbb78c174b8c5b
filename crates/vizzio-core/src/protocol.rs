//! WebSocket frame types.
//!
//! Client -> Server:
//! ```json
//! {"type": "send-message", "content": "build status"}
//! ```
//!
//! Server -> Client:
//! ```json
//! {"type": "new-message", "message": { ...ChatEntry... }}
//! ```

use serde::{Deserialize, Serialize};

use crate::error::RelayResult;
use crate::model::ChatEntry;

/// A frame received from a client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum InboundFrame {
    #[serde(rename = "send-message")]
    SendMessage { content: String },
    /// Any other frame type. Ignored.
    #[serde(other)]
    Unknown,
}

impl InboundFrame {
    pub fn parse(text: &str) -> RelayResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// A frame pushed to every client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum OutboundFrame<'a> {
    #[serde(rename = "new-message")]
    NewMessage { message: &'a ChatEntry },
}

impl OutboundFrame<'_> {
    pub fn to_json(&self) -> RelayResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntryKind;

    #[test]
    fn test_parse_send_message() {
        let frame = InboundFrame::parse(r#"{"type":"send-message","content":"hi"}"#).unwrap();
        assert_eq!(
            frame,
            InboundFrame::SendMessage {
                content: "hi".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_type_is_not_an_error() {
        let frame = InboundFrame::parse(r#"{"type":"mark-read","id":"msg-1"}"#).unwrap();
        assert_eq!(frame, InboundFrame::Unknown);
    }

    #[test]
    fn test_malformed_frames_fail_to_parse() {
        assert!(InboundFrame::parse("not json").is_err());
        assert!(InboundFrame::parse(r#"{"content":"no type"}"#).is_err());
        assert!(InboundFrame::parse(r#"{"type":"send-message"}"#).is_err());
        assert!(InboundFrame::parse(r#"{"type":"send-message","content":5}"#).is_err());
    }

    #[test]
    fn test_outbound_shape() {
        let entry = ChatEntry::bot("hi", EntryKind::Text);
        let json = OutboundFrame::NewMessage { message: &entry }.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "new-message");
        assert_eq!(value["message"]["id"], entry.id.as_str());
        assert_eq!(value["message"]["content"], "hi");
    }
}
