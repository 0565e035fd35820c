use serde::{Deserialize, Serialize};

use super::{ChatId, WebAppInfo};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BotCommand {
    pub command: String,
    pub description: String,
}

impl BotCommand {
    pub fn new(command: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            description: description.into(),
        }
    }
}

/// Which users a command list applies to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BotCommandScope {
    Default,
    AllPrivateChats,
    AllGroupChats,
    AllChatAdministrators,
    Chat { chat_id: ChatId },
    ChatAdministrators { chat_id: ChatId },
    ChatMember { chat_id: ChatId, user_id: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BotName {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BotDescription {
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BotShortDescription {
    pub short_description: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MenuButton {
    Commands,
    WebApp { text: String, web_app: WebAppInfo },
    Default,
}

/// Current webhook status, returned by `getWebhookInfo`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WebhookInfo {
    /// Empty when no webhook is set.
    pub url: String,
    pub has_custom_certificate: bool,
    pub pending_update_count: i64,
    pub ip_address: Option<String>,
    pub last_error_date: Option<i64>,
    pub last_error_message: Option<String>,
    pub last_synchronization_error_date: Option<i64>,
    pub max_connections: Option<i64>,
    pub allowed_updates: Option<Vec<String>>,
}

/// Extra hints attached to a failed call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct ResponseParameters {
    /// The group moved to a supergroup with this id.
    pub migrate_to_chat_id: Option<i64>,
    /// Seconds to wait before repeating a flood-limited request.
    pub retry_after: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_scope_wire_shape() {
        let scope = BotCommandScope::ChatMember {
            chat_id: ChatId::from(-100),
            user_id: 5,
        };
        assert_eq!(
            serde_json::to_value(&scope).unwrap(),
            serde_json::json!({"type": "chat_member", "chat_id": -100, "user_id": 5})
        );
        assert_eq!(
            serde_json::to_value(BotCommandScope::AllPrivateChats).unwrap(),
            serde_json::json!({"type": "all_private_chats"})
        );
    }
}
