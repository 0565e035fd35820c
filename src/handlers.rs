//! A small demo bot showing how the per-kind hooks are used.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info};

use crate::api::{
    AnswerCallbackQuery, AnswerInlineQuery, AnswerPreCheckoutQuery, AnswerShippingQuery,
    SendChatAction, SendDice, SendMessage,
};
use crate::dispatch::{BotContext, UpdateHandler};
use crate::types::{
    CallbackQuery, ChatAction, ChatId, ChatJoinRequest, ChatMemberUpdated, InlineKeyboardButton,
    InlineKeyboardMarkup, InlineQuery, InlineQueryResult, InlineQueryResultArticle, LabeledPrice,
    Message, PreCheckoutQuery, ShippingOption, ShippingQuery,
};

/// Telegram rejects message texts longer than this many characters.
pub const MAX_MESSAGE_LEN: usize = 4096;

const GREETING: &str = "Hello! I'm a webhook demo bot.\n\n\
    Commands:\n\
    type - show the typing indicator\n\
    ping - get a pong back\n\
    dice - roll a die\n\
    menu - show an inline keyboard\n\
    echo <text> - repeat <text>";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Action<'a> {
    Start,
    Typing,
    Ping,
    Dice,
    Menu,
    Echo(&'a str),
}

impl<'a> Action<'a> {
    /// Accepts `/ping` style commands and bare words like `ping`. Only `echo`
    /// takes arguments; any other word must stand alone. Commands addressed
    /// to a different bot are ignored.
    fn parse(message: &'a Message, username: Option<&str>) -> Option<Self> {
        let (word, rest) = match message.command() {
            Some(command) if command.is_for(username) => (command.name, command.args),
            Some(_) => return None,
            None => {
                let text = message.text.as_deref()?.trim();
                match text.split_once(char::is_whitespace) {
                    Some((word, rest)) => (word, rest.trim()),
                    None => (text, ""),
                }
            }
        };

        match (word, rest) {
            ("echo", rest) => Some(Action::Echo(rest)),
            (_, rest) if !rest.is_empty() => None,
            ("start" | "help", _) => Some(Action::Start),
            ("type", _) => Some(Action::Typing),
            ("ping", _) => Some(Action::Ping),
            ("dice", _) => Some(Action::Dice),
            ("menu", _) => Some(Action::Menu),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DemoBot {
    /// The bot's own username, used to accept `/command@username`.
    username: Option<String>,
}

impl DemoBot {
    pub fn new(username: Option<String>) -> Self {
        Self { username }
    }

    async fn send_text(&self, ctx: &BotContext, chat_id: ChatId, text: &str) -> Result<()> {
        for chunk in split_message(text, MAX_MESSAGE_LEN) {
            ctx.api
                .send_message(&SendMessage::new(chat_id.clone(), chunk))
                .await
                .context("Failed to send message")?;
        }
        Ok(())
    }

    fn menu() -> InlineKeyboardMarkup {
        InlineKeyboardMarkup::new(vec![
            vec![
                InlineKeyboardButton::callback("Ping", "ping"),
                InlineKeyboardButton::callback("Roll", "dice"),
            ],
            vec![InlineKeyboardButton::url(
                "Bot API docs",
                "https://core.telegram.org/bots/api",
            )],
            vec![InlineKeyboardButton::switch_inline("Share", "")],
        ])
    }
}

#[async_trait]
impl UpdateHandler for DemoBot {
    async fn on_message(&self, ctx: &BotContext, message: &Message) -> Result<()> {
        let sender = message
            .from
            .as_ref()
            .map(|user| user.full_name())
            .unwrap_or_else(|| "unknown".to_string());
        let chat_id = ChatId::from(&message.chat);

        let action = match Action::parse(message, self.username.as_deref()) {
            Some(action) => action,
            None => {
                debug!("No action for message {} from {}", message.message_id, sender);
                return Ok(());
            }
        };

        info!("{:?} from {} in chat {}", action, sender, chat_id);

        match action {
            Action::Start => self.send_text(ctx, chat_id, GREETING).await,
            Action::Typing => {
                ctx.api
                    .send_chat_action(&SendChatAction::new(chat_id, ChatAction::Typing))
                    .await
                    .context("Failed to send chat action")?;
                Ok(())
            }
            Action::Ping => {
                ctx.api
                    .send_message(
                        &SendMessage::new(chat_id, "pong")
                            .reply_parameters(message.reply_parameters()),
                    )
                    .await
                    .context("Failed to reply to ping")?;
                Ok(())
            }
            Action::Dice => {
                ctx.api
                    .send_dice(&SendDice::new(chat_id))
                    .await
                    .context("Failed to send dice")?;
                Ok(())
            }
            Action::Menu => {
                ctx.api
                    .send_message(
                        &SendMessage::new(chat_id, "Pick one:").reply_markup(Self::menu()),
                    )
                    .await
                    .context("Failed to send menu")?;
                Ok(())
            }
            Action::Echo("") => self.send_text(ctx, chat_id, "Usage: echo <text>").await,
            Action::Echo(text) => self.send_text(ctx, chat_id, text).await,
        }
    }

    async fn on_callback_query(&self, ctx: &BotContext, query: &CallbackQuery) -> Result<()> {
        info!(
            "Callback from {}: {:?}",
            query.from.full_name(),
            query.data
        );

        let mut answer = AnswerCallbackQuery::new(query.id.clone());
        if let Some(data) = &query.data {
            answer = answer.text(format!("You picked: {}", data));
        }
        ctx.api
            .answer_callback_query(&answer)
            .await
            .context("Failed to answer callback query")?;
        Ok(())
    }

    async fn on_inline_query(&self, ctx: &BotContext, query: &InlineQuery) -> Result<()> {
        let text = query.query.trim();
        let results = if text.is_empty() {
            Vec::new()
        } else {
            vec![InlineQueryResult::Article(InlineQueryResultArticle::text(
                "echo",
                format!("Echo: {}", text),
                text,
            ))]
        };

        ctx.api
            .answer_inline_query(&AnswerInlineQuery::new(query.id.clone(), results).cache_time(0i64))
            .await
            .context("Failed to answer inline query")?;
        Ok(())
    }

    async fn on_shipping_query(&self, ctx: &BotContext, query: &ShippingQuery) -> Result<()> {
        info!(
            "Shipping query {} to {}",
            query.id, query.shipping_address.country_code
        );

        let standard = ShippingOption {
            id: "standard".to_string(),
            title: "Standard delivery".to_string(),
            prices: vec![LabeledPrice::new("Delivery", 500)],
        };
        ctx.api
            .answer_shipping_query(
                &AnswerShippingQuery::new(query.id.clone(), true).shipping_options(vec![standard]),
            )
            .await
            .context("Failed to answer shipping query")?;
        Ok(())
    }

    async fn on_pre_checkout_query(
        &self,
        ctx: &BotContext,
        query: &PreCheckoutQuery,
    ) -> Result<()> {
        info!(
            "Pre-checkout {} for {} {}",
            query.id, query.total_amount, query.currency
        );

        ctx.api
            .answer_pre_checkout_query(&AnswerPreCheckoutQuery::new(query.id.clone(), true))
            .await
            .context("Failed to answer pre-checkout query")?;
        Ok(())
    }

    async fn on_my_chat_member(&self, _ctx: &BotContext, update: &ChatMemberUpdated) -> Result<()> {
        if update.joined() {
            info!("Added to chat {} by {}", update.chat.id, update.from.full_name());
        } else if !update.new_chat_member.is_present() {
            info!("Removed from chat {}", update.chat.id);
        }
        Ok(())
    }

    async fn on_chat_join_request(
        &self,
        _ctx: &BotContext,
        request: &ChatJoinRequest,
    ) -> Result<()> {
        info!(
            "Join request from {} ({}) for chat {}",
            request.from.full_name(),
            request.from.id,
            request.chat.id
        );
        Ok(())
    }
}

/// Split `text` into chunks of at most `max_chars` characters, preferring to
/// break after a newline or space.
pub fn split_message(text: &str, max_chars: usize) -> Vec<String> {
    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let end = rest
            .char_indices()
            .nth(max_chars)
            .map(|(idx, _)| idx)
            .unwrap_or(rest.len());

        let cut = if end < rest.len() {
            rest[..end]
                .rfind('\n')
                .or_else(|| rest[..end].rfind(' '))
                .map(|pos| pos + 1)
                .unwrap_or(end)
        } else {
            end
        };

        chunks.push(rest[..cut].to_string());
        rest = &rest[cut..];
    }

    chunks
}
