pub mod actions;
mod chat_session;
pub mod clipboard;
mod context_builder;
mod generator;
mod preview;
pub mod sanitizer;

pub use chat_session::*;
pub use context_builder::*;
pub use generator::*;
pub use preview::*;
