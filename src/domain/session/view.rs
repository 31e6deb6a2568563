//! Panel view contract
//!
//! Rendering is the host UI's concern; the session drives it through this
//! sink. Every method is fire-and-forget from the session's perspective.

use std::fmt::Debug;

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::llm::{ChatExchange, Conversation};

#[async_trait]
pub trait PanelView: Send + Sync + Debug {
    async fn set_loading(&self, message: &str);
    async fn clear_loading(&self);
    async fn render_summary(&self, html: &str);
    async fn render_conversation(&self, conversation: &Conversation);
    async fn append_exchange(&self, exchange: &ChatExchange);
    async fn play_audio(&self, audio: &Bytes);
    async fn render_error(&self, message: &str);
    /// Clears rendered summary and conversation, e.g. on navigation.
    async fn clear_content(&self);
    /// Terminal state for closed tabs and restricted pages.
    async fn show_unavailable(&self);
}
