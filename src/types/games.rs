use serde::{Deserialize, Serialize};

use super::{Animation, MessageEntity, PhotoSize, User};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Game {
    pub title: String,
    pub description: String,
    pub photo: Vec<PhotoSize>,
    pub text: Option<String>,
    pub text_entities: Option<Vec<MessageEntity>>,
    pub animation: Option<Animation>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GameHighScore {
    pub position: i64,
    pub user: User,
    pub score: i64,
}
