//! Routing of parsed updates to per-kind handler hooks.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use futures::FutureExt;
use tracing::{debug, error};

use crate::api::Api;
use crate::env::Environment;
use crate::types::{
    BusinessConnection, BusinessMessagesDeleted, CallbackQuery, ChatBoostRemoved, ChatBoostUpdated,
    ChatJoinRequest, ChatMemberUpdated, ChosenInlineResult, InlineQuery, Message,
    MessageReactionCountUpdated, MessageReactionUpdated, PaidMediaPurchased, Poll, PollAnswer,
    PreCheckoutQuery, ShippingQuery, Update, UpdateKind,
};

/// Everything a handler needs to act on one update: the environment
/// snapshot taken when the request arrived and a client bound to its token.
#[derive(Debug, Clone)]
pub struct BotContext {
    pub env: Arc<Environment>,
    pub api: Api,
}

impl BotContext {
    pub fn new(env: Arc<Environment>, api: Api) -> Self {
        Self { env, api }
    }
}

/// One hook per update kind. Every hook defaults to doing nothing, so an
/// implementation only overrides the kinds it cares about.
#[async_trait]
pub trait UpdateHandler: Send + Sync {
    async fn on_message(&self, _ctx: &BotContext, _message: &Message) -> Result<()> {
        Ok(())
    }

    async fn on_edited_message(&self, _ctx: &BotContext, _message: &Message) -> Result<()> {
        Ok(())
    }

    async fn on_channel_post(&self, _ctx: &BotContext, _post: &Message) -> Result<()> {
        Ok(())
    }

    async fn on_edited_channel_post(&self, _ctx: &BotContext, _post: &Message) -> Result<()> {
        Ok(())
    }

    async fn on_business_connection(
        &self,
        _ctx: &BotContext,
        _connection: &BusinessConnection,
    ) -> Result<()> {
        Ok(())
    }

    async fn on_business_message(&self, _ctx: &BotContext, _message: &Message) -> Result<()> {
        Ok(())
    }

    async fn on_edited_business_message(
        &self,
        _ctx: &BotContext,
        _message: &Message,
    ) -> Result<()> {
        Ok(())
    }

    async fn on_deleted_business_messages(
        &self,
        _ctx: &BotContext,
        _deleted: &BusinessMessagesDeleted,
    ) -> Result<()> {
        Ok(())
    }

    async fn on_message_reaction(
        &self,
        _ctx: &BotContext,
        _reaction: &MessageReactionUpdated,
    ) -> Result<()> {
        Ok(())
    }

    async fn on_message_reaction_count(
        &self,
        _ctx: &BotContext,
        _counts: &MessageReactionCountUpdated,
    ) -> Result<()> {
        Ok(())
    }

    async fn on_inline_query(&self, _ctx: &BotContext, _query: &InlineQuery) -> Result<()> {
        Ok(())
    }

    async fn on_chosen_inline_result(
        &self,
        _ctx: &BotContext,
        _result: &ChosenInlineResult,
    ) -> Result<()> {
        Ok(())
    }

    async fn on_callback_query(&self, _ctx: &BotContext, _query: &CallbackQuery) -> Result<()> {
        Ok(())
    }

    async fn on_shipping_query(&self, _ctx: &BotContext, _query: &ShippingQuery) -> Result<()> {
        Ok(())
    }

    async fn on_pre_checkout_query(
        &self,
        _ctx: &BotContext,
        _query: &PreCheckoutQuery,
    ) -> Result<()> {
        Ok(())
    }

    async fn on_purchased_paid_media(
        &self,
        _ctx: &BotContext,
        _purchase: &PaidMediaPurchased,
    ) -> Result<()> {
        Ok(())
    }

    async fn on_poll(&self, _ctx: &BotContext, _poll: &Poll) -> Result<()> {
        Ok(())
    }

    async fn on_poll_answer(&self, _ctx: &BotContext, _answer: &PollAnswer) -> Result<()> {
        Ok(())
    }

    /// The bot's own membership changed.
    async fn on_my_chat_member(
        &self,
        _ctx: &BotContext,
        _update: &ChatMemberUpdated,
    ) -> Result<()> {
        Ok(())
    }

    async fn on_chat_member(&self, _ctx: &BotContext, _update: &ChatMemberUpdated) -> Result<()> {
        Ok(())
    }

    async fn on_chat_join_request(
        &self,
        _ctx: &BotContext,
        _request: &ChatJoinRequest,
    ) -> Result<()> {
        Ok(())
    }

    async fn on_chat_boost(&self, _ctx: &BotContext, _boost: &ChatBoostUpdated) -> Result<()> {
        Ok(())
    }

    async fn on_removed_chat_boost(
        &self,
        _ctx: &BotContext,
        _removed: &ChatBoostRemoved,
    ) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The hook for this kind ran and returned `Ok`.
    Handled(&'static str),
    /// The hook returned an error or panicked. Already logged.
    Failed(&'static str),
    /// The update carried no kind we know.
    Unrecognized,
}

/// Run the one hook matching the update's kind.
///
/// Errors and panics from the hook are caught and logged here so the
/// webhook can still acknowledge the update.
pub async fn dispatch<H>(handler: &H, ctx: &BotContext, update: &Update) -> DispatchOutcome
where
    H: UpdateHandler + ?Sized,
{
    let kind = update.kind_name();

    match AssertUnwindSafe(route(handler, ctx, &update.kind))
        .catch_unwind()
        .await
    {
        Ok(None) => {
            debug!("Update {} has no known kind, ignoring", update.update_id);
            DispatchOutcome::Unrecognized
        }
        Ok(Some(Ok(()))) => {
            debug!("Handled {} update {}", kind, update.update_id);
            DispatchOutcome::Handled(kind)
        }
        Ok(Some(Err(e))) => {
            error!(
                "Handler for {} update {} failed: {:#}",
                kind, update.update_id, e
            );
            DispatchOutcome::Failed(kind)
        }
        Err(panic) => {
            error!(
                "Handler for {} update {} panicked: {}",
                kind,
                update.update_id,
                panic_message(panic.as_ref())
            );
            DispatchOutcome::Failed(kind)
        }
    }
}

async fn route<H>(handler: &H, ctx: &BotContext, kind: &UpdateKind) -> Option<Result<()>>
where
    H: UpdateHandler + ?Sized,
{
    let result = match kind {
        UpdateKind::Message(m) => handler.on_message(ctx, m).await,
        UpdateKind::EditedMessage(m) => handler.on_edited_message(ctx, m).await,
        UpdateKind::ChannelPost(m) => handler.on_channel_post(ctx, m).await,
        UpdateKind::EditedChannelPost(m) => handler.on_edited_channel_post(ctx, m).await,
        UpdateKind::BusinessConnection(c) => handler.on_business_connection(ctx, c).await,
        UpdateKind::BusinessMessage(m) => handler.on_business_message(ctx, m).await,
        UpdateKind::EditedBusinessMessage(m) => handler.on_edited_business_message(ctx, m).await,
        UpdateKind::DeletedBusinessMessages(d) => {
            handler.on_deleted_business_messages(ctx, d).await
        }
        UpdateKind::MessageReaction(r) => handler.on_message_reaction(ctx, r).await,
        UpdateKind::MessageReactionCount(r) => handler.on_message_reaction_count(ctx, r).await,
        UpdateKind::InlineQuery(q) => handler.on_inline_query(ctx, q).await,
        UpdateKind::ChosenInlineResult(r) => handler.on_chosen_inline_result(ctx, r).await,
        UpdateKind::CallbackQuery(q) => handler.on_callback_query(ctx, q).await,
        UpdateKind::ShippingQuery(q) => handler.on_shipping_query(ctx, q).await,
        UpdateKind::PreCheckoutQuery(q) => handler.on_pre_checkout_query(ctx, q).await,
        UpdateKind::PurchasedPaidMedia(p) => handler.on_purchased_paid_media(ctx, p).await,
        UpdateKind::Poll(p) => handler.on_poll(ctx, p).await,
        UpdateKind::PollAnswer(a) => handler.on_poll_answer(ctx, a).await,
        UpdateKind::MyChatMember(u) => handler.on_my_chat_member(ctx, u).await,
        UpdateKind::ChatMember(u) => handler.on_chat_member(ctx, u).await,
        UpdateKind::ChatJoinRequest(r) => handler.on_chat_join_request(ctx, r).await,
        UpdateKind::ChatBoost(b) => handler.on_chat_boost(ctx, b).await,
        UpdateKind::RemovedChatBoost(b) => handler.on_removed_chat_boost(ctx, b).await,
        UpdateKind::Unknown(_) => return None,
    };
    Some(result)
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use serde_json::json;
    use url::Url;

    #[derive(Default)]
    struct Spy {
        seen: Mutex<Vec<&'static str>>,
    }

    impl Spy {
        fn record(&self, kind: &'static str) {
            self.seen.lock().unwrap().push(kind);
        }

        fn seen(&self) -> Vec<&'static str> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl UpdateHandler for Spy {
        async fn on_message(&self, _ctx: &BotContext, _message: &Message) -> Result<()> {
            self.record("message");
            Ok(())
        }

        async fn on_edited_message(&self, _ctx: &BotContext, _message: &Message) -> Result<()> {
            self.record("edited_message");
            Ok(())
        }

        async fn on_callback_query(&self, _ctx: &BotContext, _query: &CallbackQuery) -> Result<()> {
            self.record("callback_query");
            Ok(())
        }

        async fn on_poll_answer(&self, _ctx: &BotContext, _answer: &PollAnswer) -> Result<()> {
            self.record("poll_answer");
            anyhow::bail!("poll answers are not accepted")
        }

        async fn on_chat_join_request(
            &self,
            _ctx: &BotContext,
            _request: &ChatJoinRequest,
        ) -> Result<()> {
            self.record("chat_join_request");
            panic!("join request handler blew up");
        }
    }

    fn ctx() -> BotContext {
        BotContext::new(
            Arc::new(Environment {
                secret: "s".to_string(),
                token: "t".to_string(),
            }),
            Api::new(Url::parse("http://127.0.0.1:9").unwrap(), "t"),
        )
    }

    fn update(value: serde_json::Value) -> Update {
        serde_json::from_value(value).unwrap()
    }

    fn message_json() -> serde_json::Value {
        json!({"message_id": 1, "date": 1700000000, "chat": {"id": 7, "type": "private"}, "text": "hi"})
    }

    #[tokio::test]
    async fn test_each_kind_runs_only_its_hook_once() {
        let cases = vec![
            ("message", json!({"update_id": 1, "message": message_json()})),
            (
                "edited_message",
                json!({"update_id": 2, "edited_message": message_json()}),
            ),
            (
                "callback_query",
                json!({"update_id": 3, "callback_query": {
                    "id": "c", "from": {"id": 1, "is_bot": false, "first_name": "A"},
                    "chat_instance": "i", "data": "x"
                }}),
            ),
        ];

        for (expected, raw) in cases {
            let spy = Spy::default();
            let outcome = dispatch(&spy, &ctx(), &update(raw)).await;
            assert_eq!(outcome, DispatchOutcome::Handled(expected));
            assert_eq!(spy.seen(), vec![expected]);
        }
    }

    /// Overrides every hook and records which one ran.
    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<&'static str>>,
    }

    macro_rules! recording_hooks {
        ($( $hook:ident($payload:ty) => $kind:literal, )*) => {
            #[async_trait]
            impl UpdateHandler for Recorder {
                $(
                    async fn $hook(&self, _ctx: &BotContext, _payload: &$payload) -> Result<()> {
                        self.seen.lock().unwrap().push($kind);
                        Ok(())
                    }
                )*
            }
        };
    }

    recording_hooks! {
        on_message(Message) => "message",
        on_edited_message(Message) => "edited_message",
        on_channel_post(Message) => "channel_post",
        on_edited_channel_post(Message) => "edited_channel_post",
        on_business_connection(BusinessConnection) => "business_connection",
        on_business_message(Message) => "business_message",
        on_edited_business_message(Message) => "edited_business_message",
        on_deleted_business_messages(BusinessMessagesDeleted) => "deleted_business_messages",
        on_message_reaction(MessageReactionUpdated) => "message_reaction",
        on_message_reaction_count(MessageReactionCountUpdated) => "message_reaction_count",
        on_inline_query(InlineQuery) => "inline_query",
        on_chosen_inline_result(ChosenInlineResult) => "chosen_inline_result",
        on_callback_query(CallbackQuery) => "callback_query",
        on_shipping_query(ShippingQuery) => "shipping_query",
        on_pre_checkout_query(PreCheckoutQuery) => "pre_checkout_query",
        on_purchased_paid_media(PaidMediaPurchased) => "purchased_paid_media",
        on_poll(Poll) => "poll",
        on_poll_answer(PollAnswer) => "poll_answer",
        on_my_chat_member(ChatMemberUpdated) => "my_chat_member",
        on_chat_member(ChatMemberUpdated) => "chat_member",
        on_chat_join_request(ChatJoinRequest) => "chat_join_request",
        on_chat_boost(ChatBoostUpdated) => "chat_boost",
        on_removed_chat_boost(ChatBoostRemoved) => "removed_chat_boost",
    }

    /// Smallest valid payload for each update kind.
    fn payload(kind: &str) -> serde_json::Value {
        let user = json!({"id": 1, "is_bot": false, "first_name": "A"});
        let chat = json!({"id": -100, "type": "supergroup", "title": "Room"});
        let emoji = json!({"type": "emoji", "emoji": "\u{1F44D}"});
        let premium = json!({"source": "premium", "user": user});
        let membership = json!({
            "chat": chat, "from": user, "date": 1,
            "old_chat_member": {"status": "left", "user": user},
            "new_chat_member": {"status": "member", "user": user}
        });

        match kind {
            "message" | "edited_message" | "channel_post" | "edited_channel_post"
            | "business_message" | "edited_business_message" => message_json(),
            "business_connection" => json!({
                "id": "bc", "user": user, "user_chat_id": 1, "date": 1,
                "can_reply": true, "is_enabled": true
            }),
            "deleted_business_messages" => json!({
                "business_connection_id": "bc", "chat": chat, "message_ids": [1, 2]
            }),
            "message_reaction" => json!({
                "chat": chat, "message_id": 1, "user": user, "date": 1,
                "old_reaction": [], "new_reaction": [emoji]
            }),
            "message_reaction_count" => json!({
                "chat": chat, "message_id": 1, "date": 1,
                "reactions": [{"type": emoji, "total_count": 3}]
            }),
            "inline_query" => json!({"id": "q", "from": user, "query": "hi", "offset": ""}),
            "chosen_inline_result" => json!({"result_id": "r", "from": user, "query": "hi"}),
            "callback_query" => json!({"id": "c", "from": user, "chat_instance": "i", "data": "x"}),
            "shipping_query" => json!({
                "id": "s", "from": user, "invoice_payload": "p",
                "shipping_address": {
                    "country_code": "NL", "state": "", "city": "Utrecht",
                    "street_line1": "Main 1", "street_line2": "", "post_code": "3511"
                }
            }),
            "pre_checkout_query" => json!({
                "id": "pc", "from": user, "currency": "XTR",
                "total_amount": 10, "invoice_payload": "p"
            }),
            "purchased_paid_media" => json!({"from": user, "paid_media_payload": "p"}),
            "poll" => json!({
                "id": "p", "question": "?", "options": [{"text": "a", "voter_count": 0}],
                "total_voter_count": 0, "is_closed": false, "is_anonymous": true,
                "type": "regular", "allows_multiple_answers": false
            }),
            "poll_answer" => json!({"poll_id": "p", "user": user, "option_ids": [0]}),
            "my_chat_member" | "chat_member" => membership,
            "chat_join_request" => json!({"chat": chat, "from": user, "user_chat_id": 1, "date": 1}),
            "chat_boost" => json!({
                "chat": chat,
                "boost": {"boost_id": "b", "add_date": 1, "expiration_date": 2, "source": premium}
            }),
            "removed_chat_boost" => json!({
                "chat": chat, "boost_id": "b", "remove_date": 1, "source": premium
            }),
            other => panic!("no sample payload for {}", other),
        }
    }

    #[tokio::test]
    async fn test_every_kind_routes_to_its_own_hook() {
        for (id, kind) in crate::types::ALL_UPDATE_KINDS.iter().enumerate() {
            let mut raw = serde_json::Map::new();
            raw.insert("update_id".to_string(), json!(id));
            raw.insert(kind.to_string(), payload(kind));
            let update = update(serde_json::Value::Object(raw));
            assert_eq!(update.kind_name(), *kind);

            let recorder = Recorder::default();
            let outcome = dispatch(&recorder, &ctx(), &update).await;

            assert_eq!(outcome, DispatchOutcome::Handled(*kind));
            assert_eq!(*recorder.seen.lock().unwrap(), vec![*kind]);
        }
    }

    #[tokio::test]
    async fn test_kind_without_override_is_a_noop() {
        let spy = Spy::default();
        let raw = json!({"update_id": 4, "channel_post": {
            "message_id": 1, "date": 1, "chat": {"id": -100, "type": "channel", "title": "News"}
        }});

        let outcome = dispatch(&spy, &ctx(), &update(raw)).await;

        assert_eq!(outcome, DispatchOutcome::Handled("channel_post"));
        assert!(spy.seen().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_kind_runs_nothing() {
        let spy = Spy::default();
        let outcome = dispatch(
            &spy,
            &ctx(),
            &update(json!({"update_id": 5, "brand_new_kind": {}})),
        )
        .await;

        assert_eq!(outcome, DispatchOutcome::Unrecognized);
        assert!(spy.seen().is_empty());
    }

    #[tokio::test]
    async fn test_handler_error_is_contained() {
        let spy = Spy::default();
        let raw = json!({"update_id": 6, "poll_answer": {"poll_id": "p", "option_ids": [1]}});

        let outcome = dispatch(&spy, &ctx(), &update(raw)).await;

        assert_eq!(outcome, DispatchOutcome::Failed("poll_answer"));
        assert_eq!(spy.seen(), vec!["poll_answer"]);
    }

    #[tokio::test]
    async fn test_handler_panic_is_contained() {
        let spy = Spy::default();
        let raw = json!({"update_id": 7, "chat_join_request": {
            "chat": {"id": -100, "type": "supergroup", "title": "Room"},
            "from": {"id": 2, "is_bot": false, "first_name": "B"},
            "user_chat_id": 2,
            "date": 1700000000
        }});

        let outcome = dispatch(&spy, &ctx(), &update(raw)).await;

        assert_eq!(outcome, DispatchOutcome::Failed("chat_join_request"));
    }

    #[test]
    fn test_panic_message_extraction() {
        let boxed: Box<dyn Any + Send> = Box::new("static");
        assert_eq!(panic_message(boxed.as_ref()), "static");
        let boxed: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(boxed.as_ref()), "owned");
        let boxed: Box<dyn Any + Send> = Box::new(3);
        assert_eq!(panic_message(boxed.as_ref()), "non-string panic payload");
    }
}
