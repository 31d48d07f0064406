//! Chat-completion adapters.

mod openai;

pub use openai::{OpenAiChatClient, OpenAiConfig};
