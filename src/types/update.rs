use serde::de::{Deserializer, Error as _};
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::{
    BusinessConnection, BusinessMessagesDeleted, CallbackQuery, ChatBoostRemoved, ChatBoostUpdated,
    ChatJoinRequest, ChatMemberUpdated, ChosenInlineResult, InlineQuery, Message,
    MessageReactionCountUpdated, MessageReactionUpdated, PaidMediaPurchased, Poll, PollAnswer,
    PreCheckoutQuery, ShippingQuery,
};

#[derive(Debug, Error, PartialEq)]
pub enum UpdateError {
    #[error("update carries more than one kind: {}", .0.join(", "))]
    MultipleKinds(Vec<&'static str>),
}

/// An incoming update: its id and the single payload it carries.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub update_id: i64,
    pub kind: UpdateKind,
}

impl Update {
    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }
}

macro_rules! update_kinds {
    ($( $field:ident => $variant:ident($payload:ty), )*) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum UpdateKind {
            $( $variant($payload), )*
            /// No known kind was present. Holds the raw update object.
            Unknown(Value),
        }

        impl UpdateKind {
            /// Wire name of the kind, as used in `allowed_updates`.
            pub fn name(&self) -> &'static str {
                match self {
                    $( UpdateKind::$variant(_) => stringify!($field), )*
                    UpdateKind::Unknown(_) => "unknown",
                }
            }
        }

        /// Every kind the dispatcher routes, in declaration order.
        pub const ALL_UPDATE_KINDS: &[&str] = &[ $( stringify!($field), )* ];

        #[derive(Deserialize)]
        struct RawUpdate {
            update_id: i64,
            $(
                #[serde(default)]
                $field: Option<$payload>,
            )*
            #[serde(flatten)]
            rest: Map<String, Value>,
        }

        impl RawUpdate {
            fn into_update(self) -> Result<Update, UpdateError> {
                let mut kinds = Vec::new();
                $(
                    if let Some(payload) = self.$field {
                        kinds.push(UpdateKind::$variant(payload));
                    }
                )*

                let kind = match kinds.len() {
                    0 => {
                        let mut raw = self.rest;
                        raw.insert("update_id".to_string(), Value::from(self.update_id));
                        UpdateKind::Unknown(Value::Object(raw))
                    }
                    1 => kinds.remove(0),
                    _ => {
                        return Err(UpdateError::MultipleKinds(
                            kinds.iter().map(UpdateKind::name).collect(),
                        ))
                    }
                };

                Ok(Update {
                    update_id: self.update_id,
                    kind,
                })
            }
        }
    };
}

update_kinds! {
    message => Message(Message),
    edited_message => EditedMessage(Message),
    channel_post => ChannelPost(Message),
    edited_channel_post => EditedChannelPost(Message),
    business_connection => BusinessConnection(BusinessConnection),
    business_message => BusinessMessage(Message),
    edited_business_message => EditedBusinessMessage(Message),
    deleted_business_messages => DeletedBusinessMessages(BusinessMessagesDeleted),
    message_reaction => MessageReaction(MessageReactionUpdated),
    message_reaction_count => MessageReactionCount(MessageReactionCountUpdated),
    inline_query => InlineQuery(InlineQuery),
    chosen_inline_result => ChosenInlineResult(ChosenInlineResult),
    callback_query => CallbackQuery(CallbackQuery),
    shipping_query => ShippingQuery(ShippingQuery),
    pre_checkout_query => PreCheckoutQuery(PreCheckoutQuery),
    purchased_paid_media => PurchasedPaidMedia(PaidMediaPurchased),
    poll => Poll(Poll),
    poll_answer => PollAnswer(PollAnswer),
    my_chat_member => MyChatMember(ChatMemberUpdated),
    chat_member => ChatMember(ChatMemberUpdated),
    chat_join_request => ChatJoinRequest(ChatJoinRequest),
    chat_boost => ChatBoost(ChatBoostUpdated),
    removed_chat_boost => RemovedChatBoost(ChatBoostRemoved),
}

impl<'de> Deserialize<'de> for Update {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawUpdate::deserialize(deserializer)?
            .into_update()
            .map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_update_classified() {
        let update: Update = serde_json::from_value(json!({
            "update_id": 1,
            "message": {
                "message_id": 42,
                "chat": {"id": 7, "type": "private"},
                "date": 1700000000,
                "text": "type"
            }
        }))
        .unwrap();

        assert_eq!(update.update_id, 1);
        match update.kind {
            UpdateKind::Message(message) => {
                assert_eq!(message.chat.id, 7);
                assert_eq!(message.text.as_deref(), Some("type"));
            }
            other => panic!("unexpected kind: {}", other.name()),
        }
    }

    #[test]
    fn test_unknown_kind_keeps_raw_json() {
        let update: Update =
            serde_json::from_value(json!({"update_id": 9, "some_future_kind": {"x": 1}})).unwrap();

        assert_eq!(update.kind_name(), "unknown");
        assert_eq!(
            update.kind,
            UpdateKind::Unknown(json!({"update_id": 9, "some_future_kind": {"x": 1}}))
        );
    }

    #[test]
    fn test_multiple_kinds_rejected() {
        let err = serde_json::from_value::<Update>(json!({
            "update_id": 2,
            "message": {"message_id": 1, "chat": {"id": 1, "type": "private"}, "date": 1},
            "poll_answer": {"poll_id": "p", "option_ids": [0]}
        }))
        .unwrap_err();

        let text = err.to_string();
        assert!(text.contains("message"), "{}", text);
        assert!(text.contains("poll_answer"), "{}", text);
    }

    #[test]
    fn test_wrong_payload_shape_rejected() {
        let result = serde_json::from_value::<Update>(json!({"update_id": 3, "message": 5}));
        assert!(result.is_err());

        let result = serde_json::from_value::<Update>(json!({"message": null}));
        assert!(result.is_err(), "update_id is required");
    }

    #[test]
    fn test_null_kind_counts_as_absent() {
        let update: Update = serde_json::from_value(json!({
            "update_id": 4,
            "message": null,
            "callback_query": {
                "id": "c1",
                "from": {"id": 3, "is_bot": false, "first_name": "Cy"},
                "chat_instance": "ci",
                "data": "go"
            }
        }))
        .unwrap();

        assert_eq!(update.kind_name(), "callback_query");
    }

    #[test]
    fn test_all_update_kinds_order() {
        assert_eq!(ALL_UPDATE_KINDS.len(), 23);
        assert_eq!(ALL_UPDATE_KINDS.first(), Some(&"message"));
        assert_eq!(ALL_UPDATE_KINDS.last(), Some(&"removed_chat_boost"));
        assert!(ALL_UPDATE_KINDS.contains(&"purchased_paid_media"));
    }
}
