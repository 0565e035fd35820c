use serde::{Deserialize, Serialize};

use super::{Chat, MessageEntity, User};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Poll {
    pub id: String,
    pub question: String,
    pub question_entities: Option<Vec<MessageEntity>>,
    pub options: Vec<PollOption>,
    pub total_voter_count: i64,
    pub is_closed: bool,
    pub is_anonymous: bool,
    #[serde(rename = "type")]
    pub poll_type: PollType,
    pub allows_multiple_answers: bool,
    pub correct_option_id: Option<i64>,
    pub explanation: Option<String>,
    pub explanation_entities: Option<Vec<MessageEntity>>,
    pub open_period: Option<i64>,
    pub close_date: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PollType {
    Regular,
    Quiz,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PollOption {
    pub text: String,
    pub text_entities: Option<Vec<MessageEntity>>,
    pub voter_count: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PollAnswer {
    pub poll_id: String,
    /// Set when the vote came from an anonymous chat.
    pub voter_chat: Option<Chat>,
    pub user: Option<User>,
    pub option_ids: Vec<i64>,
}

/// A poll option as sent to `sendPoll`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InputPollOption {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_parse_mode: Option<String>,
}

impl From<&str> for InputPollOption {
    fn from(text: &str) -> Self {
        Self {
            text: text.to_string(),
            text_parse_mode: None,
        }
    }
}
