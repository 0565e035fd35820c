use serde::{Deserialize, Serialize};

use crate::types::{
    ChatAction, ChatId, File, InlineKeyboardMarkup, InputMedia, InputPollOption, LinkPreviewOptions,
    Message, MessageEntity, MessageId, ParseMode, Poll, PollType, ReactionType, ReplyMarkup,
    ReplyParameters, UserProfilePhotos,
};

/// Edits of inline-mode messages return `true` instead of the message.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum EditResult {
    Message(Box<Message>),
    Inline(bool),
}

params! {
    SendMessage {
        chat_id: ChatId,
        text: String,
    } optional {
        business_connection_id: String,
        message_thread_id: i64,
        parse_mode: ParseMode,
        entities: Vec<MessageEntity>,
        link_preview_options: LinkPreviewOptions,
        disable_notification: bool,
        protect_content: bool,
        message_effect_id: String,
        reply_parameters: ReplyParameters,
        reply_markup: ReplyMarkup,
    }
}

params! {
    ForwardMessage {
        chat_id: ChatId,
        from_chat_id: ChatId,
        message_id: i64,
    } optional {
        message_thread_id: i64,
        disable_notification: bool,
        protect_content: bool,
    }
}

params! {
    /// Up to 100 messages; album grouping is kept.
    ForwardMessages {
        chat_id: ChatId,
        from_chat_id: ChatId,
        message_ids: Vec<i64>,
    } optional {
        message_thread_id: i64,
        disable_notification: bool,
        protect_content: bool,
    }
}

params! {
    CopyMessage {
        chat_id: ChatId,
        from_chat_id: ChatId,
        message_id: i64,
    } optional {
        message_thread_id: i64,
        caption: String,
        parse_mode: ParseMode,
        caption_entities: Vec<MessageEntity>,
        show_caption_above_media: bool,
        disable_notification: bool,
        protect_content: bool,
        reply_parameters: ReplyParameters,
        reply_markup: ReplyMarkup,
    }
}

params! {
    CopyMessages {
        chat_id: ChatId,
        from_chat_id: ChatId,
        message_ids: Vec<i64>,
    } optional {
        message_thread_id: i64,
        disable_notification: bool,
        protect_content: bool,
        remove_caption: bool,
    }
}

params! {
    /// `photo` is a `file_id` or an HTTP URL.
    SendPhoto {
        chat_id: ChatId,
        photo: String,
    } optional {
        business_connection_id: String,
        message_thread_id: i64,
        caption: String,
        parse_mode: ParseMode,
        caption_entities: Vec<MessageEntity>,
        show_caption_above_media: bool,
        has_spoiler: bool,
        disable_notification: bool,
        protect_content: bool,
        reply_parameters: ReplyParameters,
        reply_markup: ReplyMarkup,
    }
}

params! {
    SendAudio {
        chat_id: ChatId,
        audio: String,
    } optional {
        message_thread_id: i64,
        caption: String,
        parse_mode: ParseMode,
        duration: i64,
        performer: String,
        title: String,
        thumbnail: String,
        disable_notification: bool,
        protect_content: bool,
        reply_parameters: ReplyParameters,
        reply_markup: ReplyMarkup,
    }
}

params! {
    SendDocument {
        chat_id: ChatId,
        document: String,
    } optional {
        message_thread_id: i64,
        thumbnail: String,
        caption: String,
        parse_mode: ParseMode,
        disable_content_type_detection: bool,
        disable_notification: bool,
        protect_content: bool,
        reply_parameters: ReplyParameters,
        reply_markup: ReplyMarkup,
    }
}

params! {
    SendVideo {
        chat_id: ChatId,
        video: String,
    } optional {
        message_thread_id: i64,
        duration: i64,
        width: i64,
        height: i64,
        thumbnail: String,
        caption: String,
        parse_mode: ParseMode,
        has_spoiler: bool,
        supports_streaming: bool,
        disable_notification: bool,
        protect_content: bool,
        reply_parameters: ReplyParameters,
        reply_markup: ReplyMarkup,
    }
}

params! {
    SendAnimation {
        chat_id: ChatId,
        animation: String,
    } optional {
        message_thread_id: i64,
        duration: i64,
        width: i64,
        height: i64,
        thumbnail: String,
        caption: String,
        parse_mode: ParseMode,
        has_spoiler: bool,
        disable_notification: bool,
        protect_content: bool,
        reply_parameters: ReplyParameters,
        reply_markup: ReplyMarkup,
    }
}

params! {
    SendVoice {
        chat_id: ChatId,
        voice: String,
    } optional {
        message_thread_id: i64,
        caption: String,
        parse_mode: ParseMode,
        duration: i64,
        disable_notification: bool,
        protect_content: bool,
        reply_parameters: ReplyParameters,
        reply_markup: ReplyMarkup,
    }
}

params! {
    SendVideoNote {
        chat_id: ChatId,
        video_note: String,
    } optional {
        message_thread_id: i64,
        duration: i64,
        length: i64,
        thumbnail: String,
        disable_notification: bool,
        protect_content: bool,
        reply_parameters: ReplyParameters,
        reply_markup: ReplyMarkup,
    }
}

params! {
    /// Albums hold 2-10 items.
    SendMediaGroup {
        chat_id: ChatId,
        media: Vec<InputMedia>,
    } optional {
        message_thread_id: i64,
        disable_notification: bool,
        protect_content: bool,
        reply_parameters: ReplyParameters,
    }
}

params! {
    SendLocation {
        chat_id: ChatId,
        latitude: f64,
        longitude: f64,
    } optional {
        message_thread_id: i64,
        horizontal_accuracy: f64,
        live_period: i64,
        heading: i64,
        proximity_alert_radius: i64,
        disable_notification: bool,
        protect_content: bool,
        reply_parameters: ReplyParameters,
        reply_markup: ReplyMarkup,
    }
}

params! {
    SendVenue {
        chat_id: ChatId,
        latitude: f64,
        longitude: f64,
        title: String,
        address: String,
    } optional {
        message_thread_id: i64,
        foursquare_id: String,
        foursquare_type: String,
        google_place_id: String,
        google_place_type: String,
        disable_notification: bool,
        protect_content: bool,
        reply_parameters: ReplyParameters,
        reply_markup: ReplyMarkup,
    }
}

params! {
    SendContact {
        chat_id: ChatId,
        phone_number: String,
        first_name: String,
    } optional {
        message_thread_id: i64,
        last_name: String,
        vcard: String,
        disable_notification: bool,
        protect_content: bool,
        reply_parameters: ReplyParameters,
        reply_markup: ReplyMarkup,
    }
}

params! {
    SendPoll {
        chat_id: ChatId,
        question: String,
        options: Vec<InputPollOption>,
    } optional {
        message_thread_id: i64,
        is_anonymous: bool,
        #[serde(rename = "type")]
        poll_type: PollType,
        allows_multiple_answers: bool,
        correct_option_id: i64,
        explanation: String,
        explanation_parse_mode: ParseMode,
        open_period: i64,
        close_date: i64,
        is_closed: bool,
        disable_notification: bool,
        protect_content: bool,
        reply_parameters: ReplyParameters,
        reply_markup: ReplyMarkup,
    }
}

params! {
    /// `emoji` picks the animation: 🎲 (default), 🎯, 🏀, ⚽, 🎳 or 🎰.
    SendDice {
        chat_id: ChatId,
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
    /// The status lasts 5 seconds or until the next message arrives.
    SendChatAction {
        chat_id: ChatId,
        action: ChatAction,
    } optional {
        business_connection_id: String,
        message_thread_id: i64,
    }
}

params! {
    SetMessageReaction {
        chat_id: ChatId,
        message_id: i64,
    } optional {
        reaction: Vec<ReactionType>,
        is_big: bool,
    }
}

params! {
    /// Target either `chat_id` + `message_id` or `inline_message_id`.
    EditMessageText {
        text: String,
    } optional {
        chat_id: ChatId,
        message_id: i64,
        inline_message_id: String,
        parse_mode: ParseMode,
        entities: Vec<MessageEntity>,
        link_preview_options: LinkPreviewOptions,
        reply_markup: InlineKeyboardMarkup,
    }
}

params! {
    EditMessageCaption {} optional {
        chat_id: ChatId,
        message_id: i64,
        inline_message_id: String,
        caption: String,
        parse_mode: ParseMode,
        caption_entities: Vec<MessageEntity>,
        show_caption_above_media: bool,
        reply_markup: InlineKeyboardMarkup,
    }
}

params! {
    EditMessageReplyMarkup {} optional {
        chat_id: ChatId,
        message_id: i64,
        inline_message_id: String,
        reply_markup: InlineKeyboardMarkup,
    }
}

params! {
    StopPoll {
        chat_id: ChatId,
        message_id: i64,
    } optional {
        reply_markup: InlineKeyboardMarkup,
    }
}

params! {
    DeleteMessage {
        chat_id: ChatId,
        message_id: i64,
    }
}

params! {
    DeleteMessages {
        chat_id: ChatId,
        message_ids: Vec<i64>,
    }
}

params! {
    GetUserProfilePhotos {
        user_id: i64,
    } optional {
        offset: i64,
        limit: i64,
    }
}

params! {
    GetFile {
        file_id: String,
    }
}

api_methods! {
    fn send_message("sendMessage", SendMessage) -> Message;
    fn forward_message("forwardMessage", ForwardMessage) -> Message;
    fn forward_messages("forwardMessages", ForwardMessages) -> Vec<MessageId>;
    fn copy_message("copyMessage", CopyMessage) -> MessageId;
    fn copy_messages("copyMessages", CopyMessages) -> Vec<MessageId>;
    fn send_photo("sendPhoto", SendPhoto) -> Message;
    fn send_audio("sendAudio", SendAudio) -> Message;
    fn send_document("sendDocument", SendDocument) -> Message;
    fn send_video("sendVideo", SendVideo) -> Message;
    fn send_animation("sendAnimation", SendAnimation) -> Message;
    fn send_voice("sendVoice", SendVoice) -> Message;
    fn send_video_note("sendVideoNote", SendVideoNote) -> Message;
    fn send_media_group("sendMediaGroup", SendMediaGroup) -> Vec<Message>;
    fn send_location("sendLocation", SendLocation) -> Message;
    fn send_venue("sendVenue", SendVenue) -> Message;
    fn send_contact("sendContact", SendContact) -> Message;
    fn send_poll("sendPoll", SendPoll) -> Message;
    fn send_dice("sendDice", SendDice) -> Message;
    fn send_chat_action("sendChatAction", SendChatAction) -> bool;
    fn set_message_reaction("setMessageReaction", SetMessageReaction) -> bool;
    fn edit_message_text("editMessageText", EditMessageText) -> EditResult;
    fn edit_message_caption("editMessageCaption", EditMessageCaption) -> EditResult;
    fn edit_message_reply_markup("editMessageReplyMarkup", EditMessageReplyMarkup) -> EditResult;
    fn stop_poll("stopPoll", StopPoll) -> Poll;
    fn delete_message("deleteMessage", DeleteMessage) -> bool;
    fn delete_messages("deleteMessages", DeleteMessages) -> bool;
    fn get_user_profile_photos("getUserProfilePhotos", GetUserProfilePhotos) -> UserProfilePhotos;
    fn get_file("getFile", GetFile) -> File;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeTelegram;
    use crate::types::{InlineKeyboardButton, InlineKeyboardMarkup};
    use serde_json::{json, Value};

    fn sent_message(chat_id: i64, text: &str) -> Value {
        json!({"ok": true, "result": {
            "message_id": 100,
            "date": 1700000000,
            "chat": {"id": chat_id, "type": "private"},
            "text": text
        }})
    }

    #[tokio::test]
    async fn test_send_message_with_markup() {
        let fake = FakeTelegram::start().await;
        fake.respond("sendMessage", sent_message(7, "hello"));
        let api = fake.api("TOKEN");

        let markup = InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
            "Go", "go",
        )]]);
        let params = SendMessage::new(ChatId::Id(7), "hello")
            .parse_mode(ParseMode::Html)
            .reply_markup(markup);
        let message = api.send_message(&params).await.unwrap();
        assert_eq!(message.message_id, 100);

        let call = &fake.calls_to("sendMessage")[0];
        assert_eq!(call.query["chat_id"], "7");
        assert_eq!(call.query["text"], "hello");
        assert_eq!(call.query["parse_mode"], "HTML");
        let markup: Value = serde_json::from_str(&call.query["reply_markup"]).unwrap();
        assert_eq!(markup["inline_keyboard"][0][0]["callback_data"], "go");
        assert!(!call.query.contains_key("disable_notification"));
    }

    #[tokio::test]
    async fn test_send_chat_action_wire_values() {
        let fake = FakeTelegram::start().await;
        let api = fake.api("TOKEN");

        let ok = api
            .send_chat_action(&SendChatAction::new(ChatId::from("@news"), ChatAction::Typing))
            .await
            .unwrap();
        assert!(ok);

        let call = &fake.calls_to("sendChatAction")[0];
        assert_eq!(call.query["chat_id"], "@news");
        assert_eq!(call.query["action"], "typing");
    }

    #[tokio::test]
    async fn test_send_poll_renames_type_and_encodes_options() {
        let fake = FakeTelegram::start().await;
        fake.respond("sendPoll", sent_message(7, ""));
        let api = fake.api("TOKEN");

        let params = SendPoll::new(
            ChatId::Id(7),
            "Best crate?",
            vec![InputPollOption::from("serde"), InputPollOption::from("tokio")],
        )
        .poll_type(PollType::Quiz)
        .correct_option_id(1i64);
        api.send_poll(&params).await.unwrap();

        let call = &fake.calls_to("sendPoll")[0];
        assert_eq!(call.query["type"], "quiz");
        assert_eq!(call.query["correct_option_id"], "1");
        let options: Value = serde_json::from_str(&call.query["options"]).unwrap();
        assert_eq!(options, json!([{"text": "serde"}, {"text": "tokio"}]));
    }

    #[tokio::test]
    async fn test_edit_inline_message_returns_true() {
        let fake = FakeTelegram::start().await;
        let api = fake.api("TOKEN");

        let result = api
            .edit_message_text(&EditMessageText::new("updated").inline_message_id("abc"))
            .await
            .unwrap();
        assert_eq!(result, EditResult::Inline(true));
    }

    #[tokio::test]
    async fn test_delete_messages_sends_id_array() {
        let fake = FakeTelegram::start().await;
        let api = fake.api("TOKEN");

        api.delete_messages(&DeleteMessages::new(ChatId::Id(-100), vec![1i64, 2, 3]))
            .await
            .unwrap();

        let call = &fake.calls_to("deleteMessages")[0];
        assert_eq!(call.query["chat_id"], "-100");
        assert_eq!(call.query["message_ids"], "[1,2,3]");
    }
}
