use serde::{Deserialize, Serialize};

use super::{Chat, User};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReactionType {
    Emoji { emoji: String },
    CustomEmoji { custom_emoji_id: String },
    Paid,
}

impl ReactionType {
    pub fn emoji(emoji: impl Into<String>) -> Self {
        ReactionType::Emoji {
            emoji: emoji.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReactionCount {
    #[serde(rename = "type")]
    pub reaction_type: ReactionType,
    pub total_count: i64,
}

/// A user changed their reactions on a message.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MessageReactionUpdated {
    pub chat: Chat,
    pub message_id: i64,
    pub user: Option<User>,
    pub actor_chat: Option<Chat>,
    pub date: i64,
    pub old_reaction: Vec<ReactionType>,
    pub new_reaction: Vec<ReactionType>,
}

/// Anonymous reaction totals on a message changed.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MessageReactionCountUpdated {
    pub chat: Chat,
    pub message_id: i64,
    pub date: i64,
    pub reactions: Vec<ReactionCount>,
}
