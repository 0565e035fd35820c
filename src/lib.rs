//! Typed Telegram Bot API client and webhook dispatcher.
//!
//! [`api::Api`] wraps every Bot API method the bot uses, [`types`] holds the
//! wire objects, and [`server`] exposes the webhook endpoint that feeds
//! incoming updates to an [`dispatch::UpdateHandler`].

pub mod api;
pub mod config;
pub mod dispatch;
pub mod env;
pub mod handlers;
pub mod server;
pub mod types;

#[cfg(test)]
mod testing;
