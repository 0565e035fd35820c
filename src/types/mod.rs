//! Bot API object model: incoming updates and the records they carry, plus
//! the input objects sent with method calls.

mod boosts;
mod bot;
mod business;
mod chat;
mod chat_member;
mod games;
mod inline;
mod markup;
mod media;
mod message;
mod payments;
mod poll;
mod reactions;
mod stickers;
mod update;

pub use boosts::*;
pub use bot::*;
pub use business::*;
pub use chat::*;
pub use chat_member::*;
pub use games::*;
pub use inline::*;
pub use markup::*;
pub use media::*;
pub use message::*;
pub use payments::*;
pub use poll::*;
pub use reactions::*;
pub use stickers::*;
pub use update::*;
