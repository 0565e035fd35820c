use serde::{Deserialize, Serialize};

use super::{
    Animation, Audio, Chat, ChatId, Contact, Dice, Document, Game, InlineKeyboardMarkup, Invoice,
    Location, PhotoSize, Poll, Sticker, SuccessfulPayment, User, Venue, Video, VideoNote, Voice,
};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Message {
    pub message_id: i64,
    pub message_thread_id: Option<i64>,
    pub from: Option<User>,
    pub sender_chat: Option<Chat>,
    pub sender_boost_count: Option<i64>,
    pub business_connection_id: Option<String>,
    /// Zero when the message is no longer accessible to the bot.
    pub date: i64,
    pub chat: Chat,
    pub forward_origin: Option<MessageOrigin>,
    pub is_topic_message: Option<bool>,
    pub is_automatic_forward: Option<bool>,
    pub reply_to_message: Option<Box<Message>>,
    pub via_bot: Option<User>,
    pub edit_date: Option<i64>,
    pub has_protected_content: Option<bool>,
    pub is_from_offline: Option<bool>,
    pub media_group_id: Option<String>,
    pub author_signature: Option<String>,
    pub text: Option<String>,
    pub entities: Option<Vec<MessageEntity>>,
    pub link_preview_options: Option<LinkPreviewOptions>,
    pub effect_id: Option<String>,
    pub animation: Option<Animation>,
    pub audio: Option<Audio>,
    pub document: Option<Document>,
    pub photo: Option<Vec<PhotoSize>>,
    pub sticker: Option<Sticker>,
    pub video: Option<Video>,
    pub video_note: Option<VideoNote>,
    pub voice: Option<Voice>,
    pub caption: Option<String>,
    pub caption_entities: Option<Vec<MessageEntity>>,
    pub show_caption_above_media: Option<bool>,
    pub has_media_spoiler: Option<bool>,
    pub contact: Option<Contact>,
    pub dice: Option<Dice>,
    pub game: Option<Game>,
    pub poll: Option<Poll>,
    pub venue: Option<Venue>,
    pub location: Option<Location>,
    pub new_chat_members: Option<Vec<User>>,
    pub left_chat_member: Option<User>,
    pub new_chat_title: Option<String>,
    pub new_chat_photo: Option<Vec<PhotoSize>>,
    pub delete_chat_photo: Option<bool>,
    pub group_chat_created: Option<bool>,
    pub supergroup_chat_created: Option<bool>,
    pub channel_chat_created: Option<bool>,
    pub migrate_to_chat_id: Option<i64>,
    pub migrate_from_chat_id: Option<i64>,
    pub pinned_message: Option<Box<Message>>,
    pub invoice: Option<Invoice>,
    pub successful_payment: Option<SuccessfulPayment>,
    pub connected_website: Option<String>,
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl Message {
    /// Split a `/command@bot args` text into its parts.
    pub fn command(&self) -> Option<CommandText<'_>> {
        let text = self.text.as_deref()?.strip_prefix('/')?;
        let (head, args) = match text.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (text, ""),
        };
        let (name, bot) = match head.split_once('@') {
            Some((name, bot)) => (name, Some(bot)),
            None => (head, None),
        };
        if name.is_empty() {
            return None;
        }
        Some(CommandText { name, bot, args })
    }

    /// Messages delivered in callback queries may be inaccessible stubs.
    pub fn is_accessible(&self) -> bool {
        self.date != 0
    }

    pub fn reply_parameters(&self) -> ReplyParameters {
        ReplyParameters::to(self.message_id)
    }
}

/// A parsed `/name@bot args` message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandText<'a> {
    pub name: &'a str,
    /// Username the command was addressed to, without the `@`.
    pub bot: Option<&'a str>,
    pub args: &'a str,
}

impl CommandText<'_> {
    /// True unless the command names a different bot.
    pub fn is_for(&self, username: Option<&str>) -> bool {
        match (self.bot, username) {
            (None, _) => true,
            (Some(target), Some(me)) => target.eq_ignore_ascii_case(me),
            (Some(_), None) => false,
        }
    }
}

/// Identifier returned by `copyMessage` and friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct MessageId {
    pub message_id: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MessageEntity {
    #[serde(rename = "type")]
    pub entity_type: String,
    pub offset: i64,
    pub length: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_emoji_id: Option<String>,
}

/// Where a forwarded message came from.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageOrigin {
    User {
        date: i64,
        sender_user: User,
    },
    HiddenUser {
        date: i64,
        sender_user_name: String,
    },
    Chat {
        date: i64,
        sender_chat: Chat,
        author_signature: Option<String>,
    },
    Channel {
        date: i64,
        chat: Chat,
        message_id: i64,
        author_signature: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct ReplyParameters {
    pub message_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<ChatId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_sending_without_reply: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_position: Option<i64>,
}

impl ReplyParameters {
    pub fn to(message_id: i64) -> Self {
        Self {
            message_id,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct LinkPreviewOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefer_small_media: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefer_large_media: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_above_text: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum ParseMode {
    #[serde(rename = "HTML")]
    Html,
    MarkdownV2,
    Markdown,
}

/// Status shown by `sendChatAction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatAction {
    Typing,
    UploadPhoto,
    RecordVideo,
    UploadVideo,
    RecordVoice,
    UploadVoice,
    UploadDocument,
    ChooseSticker,
    FindLocation,
    RecordVideoNote,
    UploadVideoNote,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_message(text: &str) -> Message {
        serde_json::from_value(serde_json::json!({
            "message_id": 1,
            "date": 1700000000,
            "chat": {"id": 7, "type": "private"},
            "text": text,
        }))
        .unwrap()
    }

    #[test]
    fn test_command_parsing() {
        let start = text_message("/start");
        let start = start.command().unwrap();
        assert_eq!((start.name, start.bot, start.args), ("start", None, ""));

        let echo = text_message("/echo@my_bot hello world");
        let echo = echo.command().unwrap();
        assert_eq!(
            (echo.name, echo.bot, echo.args),
            ("echo", Some("my_bot"), "hello world")
        );

        assert_eq!(text_message("hello").command(), None);
        assert_eq!(text_message("/").command(), None);
    }

    #[test]
    fn test_command_addressee() {
        let plain = text_message("/ping");
        assert!(plain.command().unwrap().is_for(None));
        assert!(plain.command().unwrap().is_for(Some("demo_bot")));

        let addressed = text_message("/ping@Demo_Bot");
        assert!(addressed.command().unwrap().is_for(Some("demo_bot")));
        assert!(!addressed.command().unwrap().is_for(Some("other_bot")));
        assert!(!addressed.command().unwrap().is_for(None));
    }

    #[test]
    fn test_forward_origin_is_tagged() {
        let origin: MessageOrigin = serde_json::from_str(
            r#"{"type":"hidden_user","date":1,"sender_user_name":"anon"}"#,
        )
        .unwrap();
        assert!(matches!(origin, MessageOrigin::HiddenUser { .. }));
    }

    #[test]
    fn test_inaccessible_message_stub_parses() {
        let msg: Message = serde_json::from_str(
            r#"{"message_id":3,"date":0,"chat":{"id":1,"type":"private"}}"#,
        )
        .unwrap();
        assert!(!msg.is_accessible());
    }

    #[test]
    fn test_chat_action_and_parse_mode_wire_names() {
        assert_eq!(
            serde_json::to_value(ChatAction::UploadVideoNote).unwrap(),
            "upload_video_note"
        );
        assert_eq!(serde_json::to_value(ParseMode::Html).unwrap(), "HTML");
        assert_eq!(
            serde_json::to_value(ParseMode::MarkdownV2).unwrap(),
            "MarkdownV2"
        );
    }
}
