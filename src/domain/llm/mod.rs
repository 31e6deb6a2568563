//! LLM domain - external endpoint contracts and the conversation model

mod conversation;
mod provider;

pub use conversation::{ChatExchange, ChatReply, Conversation};
pub use provider::{ChatProvider, NarrationProvider, SummaryProvider};

#[cfg(test)]
pub use provider::mock::{MockChatProvider, MockNarrationProvider, MockSummaryProvider};
