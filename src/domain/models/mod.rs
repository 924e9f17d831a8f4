mod action;
mod author;
mod backend;
mod conversation;
mod event;
mod generation;
mod message;
mod slash_commands;
mod turn;

pub use action::*;
pub use author::*;
pub use backend::*;
pub use conversation::*;
pub use event::*;
pub use generation::*;
pub use message::*;
pub use slash_commands::*;
pub use turn::*;
