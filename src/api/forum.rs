use crate::types::{ChatId, ForumTopic, Sticker};

params! {
    CreateForumTopic {
        chat_id: ChatId,
        name: String,
    } optional {
        /// One of the six RGB colors Telegram allows, e.g. `0x6FB9F0`.
        icon_color: i64,
        icon_custom_emoji_id: String,
    }
}

params! {
    EditForumTopic {
        chat_id: ChatId,
        message_thread_id: i64,
    } optional {
        name: String,
        icon_custom_emoji_id: String,
    }
}

params! {
    CloseForumTopic {
        chat_id: ChatId,
        message_thread_id: i64,
    }
}

params! {
    ReopenForumTopic {
        chat_id: ChatId,
        message_thread_id: i64,
    }
}

params! {
    DeleteForumTopic {
        chat_id: ChatId,
        message_thread_id: i64,
    }
}

api_methods! {
    fn get_forum_topic_icon_stickers("getForumTopicIconStickers") -> Vec<Sticker>;
    fn create_forum_topic("createForumTopic", CreateForumTopic) -> ForumTopic;
    fn edit_forum_topic("editForumTopic", EditForumTopic) -> bool;
    fn close_forum_topic("closeForumTopic", CloseForumTopic) -> bool;
    fn reopen_forum_topic("reopenForumTopic", ReopenForumTopic) -> bool;
    /// Deletes the topic along with all its messages.
    fn delete_forum_topic("deleteForumTopic", DeleteForumTopic) -> bool;
}
