use serde::{Deserialize, Serialize};

use super::{Chat, User};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ChatBoostSource {
    Premium {
        user: User,
    },
    GiftCode {
        user: User,
    },
    Giveaway {
        giveaway_message_id: i64,
        user: Option<User>,
        prize_star_count: Option<i64>,
        is_unclaimed: Option<bool>,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChatBoost {
    pub boost_id: String,
    pub add_date: i64,
    pub expiration_date: i64,
    pub source: ChatBoostSource,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChatBoostUpdated {
    pub chat: Chat,
    pub boost: ChatBoost,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChatBoostRemoved {
    pub chat: Chat,
    pub boost_id: String,
    pub remove_date: i64,
    pub source: ChatBoostSource,
}
