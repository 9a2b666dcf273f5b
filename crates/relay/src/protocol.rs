use serde::{Deserialize, Serialize};

use crate::submission::Submission;

/// Outbound payload for the chat-bot `sendMessage` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessage {
    pub chat_id: String,
    pub text: String,
}

/// Chat-bot API reply: a success flag plus a human-readable description on
/// failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessageReply {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Browser → relay server request body for `POST /api/contact`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub project: String,
    pub message: String,
}

impl From<ContactRequest> for Submission {
    fn from(req: ContactRequest) -> Self {
        Submission {
            name: req.name,
            email: req.email,
            project: req.project,
            message: req.message,
        }
    }
}

/// Relay server → browser reply, mirroring the upstream shape so the client
/// has one failure path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactReply {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ContactReply {
    pub fn success() -> Self {
        Self {
            ok: true,
            description: None,
        }
    }

    pub fn failure(description: impl Into<String>) -> Self {
        Self {
            ok: false,
            description: Some(description.into()),
        }
    }
}

/// `sendMessage` endpoint for a given bot token.
pub fn send_message_url(api_base: &str, token: &str) -> String {
    format!("{}/bot{}/sendMessage", api_base.trim_end_matches('/'), token)
}

#[cfg(test)]
mod tests {
    use super::{ContactReply, ContactRequest, SendMessage, SendMessageReply, send_message_url};

    #[test]
    fn send_message_url_joins_cleanly() {
        assert_eq!(
            send_message_url("https://api.telegram.org/", "abc123"),
            "https://api.telegram.org/botabc123/sendMessage"
        );
    }

    #[test]
    fn send_message_serializes_expected_shape() {
        let msg = SendMessage {
            chat_id: "42".to_string(),
            text: "hello".to_string(),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["chat_id"], "42");
        assert_eq!(json["text"], "hello");
    }

    #[test]
    fn reply_parses_with_and_without_description() {
        let ok: SendMessageReply = serde_json::from_str(r#"{"ok":true}"#).unwrap();
        assert!(ok.ok);
        assert!(ok.description.is_none());

        let err: SendMessageReply =
            serde_json::from_str(r#"{"ok":false,"description":"chat not found"}"#).unwrap();
        assert!(!err.ok);
        assert_eq!(err.description.as_deref(), Some("chat not found"));
    }

    #[test]
    fn contact_request_project_defaults_to_empty() {
        let req: ContactRequest = serde_json::from_str(
            r#"{"name":"Ada","email":"ada@example.com","message":"hi"}"#,
        )
        .unwrap();
        assert_eq!(req.project, "");
    }

    #[test]
    fn contact_reply_failure_carries_description() {
        let reply = ContactReply::failure("upstream rejected");
        assert!(!reply.ok);
        assert_eq!(reply.description.as_deref(), Some("upstream rejected"));
    }
}
