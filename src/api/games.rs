use crate::types::{GameHighScore, InlineKeyboardMarkup, Message, ReplyParameters};

use super::EditResult;

params! {
    SendGame {
        chat_id: i64,
        game_short_name: String,
    } optional {
        message_thread_id: i64,
        disable_notification: bool,
        protect_content: bool,
        reply_parameters: ReplyParameters,
        reply_markup: InlineKeyboardMarkup,
    }
}

params! {
    /// Fails with "BOT_SCORE_NOT_MODIFIED" when the score would go down
    /// unless `force` is set.
    SetGameScore {
        user_id: i64,
        score: i64,
    } optional {
        force: bool,
        disable_edit_message: bool,
        chat_id: i64,
        message_id: i64,
        inline_message_id: String,
    }
}

params! {
    GetGameHighScores {
        user_id: i64,
    } optional {
        chat_id: i64,
        message_id: i64,
        inline_message_id: String,
    }
}

api_methods! {
    fn send_game("sendGame", SendGame) -> Message;
    fn set_game_score("setGameScore", SetGameScore) -> EditResult;
    fn get_game_high_scores("getGameHighScores", GetGameHighScores) -> Vec<GameHighScore>;
}
