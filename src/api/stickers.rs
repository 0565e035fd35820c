use crate::types::{ChatId, Message, ReplyMarkup, ReplyParameters, StickerSet};

params! {
    SendSticker {
        chat_id: ChatId,
        sticker: String,
    } optional {
        message_thread_id: i64,
        emoji: String,
        disable_notification: bool,
        protect_content: bool,
        reply_parameters: ReplyParameters,
        reply_markup: ReplyMarkup,
    }
}

params! {
    GetStickerSet {
        name: String,
    }
}

params! {
    SetStickerSetTitle {
        name: String,
        title: String,
    }
}

params! {
    /// Only sets created by the bot can be deleted.
    DeleteStickerSet {
        name: String,
    }
}

api_methods! {
    fn send_sticker("sendSticker", SendSticker) -> Message;
    fn get_sticker_set("getStickerSet", GetStickerSet) -> StickerSet;
    fn set_sticker_set_title("setStickerSetTitle", SetStickerSetTitle) -> bool;
    fn delete_sticker_set("deleteStickerSet", DeleteStickerSet) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeTelegram;
    use crate::types::StickerType;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_sticker_set() {
        let fake = FakeTelegram::start().await;
        fake.respond(
            "getStickerSet",
            json!({"ok": true, "result": {
                "name": "cats_by_hook_bot",
                "title": "Cats",
                "sticker_type": "regular",
                "stickers": [{
                    "file_id": "f1", "file_unique_id": "u1", "type": "regular",
                    "width": 512, "height": 512, "is_animated": false, "is_video": false,
                    "emoji": "🐱"
                }]
            }}),
        );

        let set = fake
            .api("TOKEN")
            .get_sticker_set(&GetStickerSet::new("cats_by_hook_bot"))
            .await
            .unwrap();

        assert_eq!(set.sticker_type, StickerType::Regular);
        assert_eq!(set.stickers[0].emoji.as_deref(), Some("🐱"));
    }
}
