use serde::{Deserialize, Serialize};

use super::{Chat, User};

/// The bot was connected to or disconnected from a business account.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BusinessConnection {
    pub id: String,
    pub user: User,
    pub user_chat_id: i64,
    pub date: i64,
    pub can_reply: bool,
    pub is_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BusinessMessagesDeleted {
    pub business_connection_id: String,
    pub chat: Chat,
    pub message_ids: Vec<i64>,
}
