//! Provider contracts for the summarization, narration and chat endpoints
//!
//! Request bodies and response parsing live outside this crate; the session
//! only depends on these signatures. Upstream failures and unparseable
//! responses both surface as `DomainError::Provider`.

use std::fmt::Debug;

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::DomainError;
use crate::domain::extract::ExtractedDocument;

use super::conversation::ChatReply;

/// Produces an HTML summary for a page
#[async_trait]
pub trait SummaryProvider: Send + Sync + Debug {
    async fn summarize(
        &self,
        url: &str,
        api_key: &str,
        document: &ExtractedDocument,
    ) -> Result<String, DomainError>;
}

/// Produces spoken audio for a piece of text
#[async_trait]
pub trait NarrationProvider: Send + Sync + Debug {
    async fn narrate(&self, text: &str, api_key: &str) -> Result<Bytes, DomainError>;
}

/// Answers a follow-up question about a page
#[async_trait]
pub trait ChatProvider: Send + Sync + Debug {
    async fn send(
        &self,
        prompt: &str,
        url: &str,
        prior_turn_id: Option<&str>,
        api_key: &str,
    ) -> Result<ChatReply, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    /// Mock summary provider with call counting and an optional gate so a
    /// test can hold the request in flight and release it explicitly.
    #[derive(Debug, Default)]
    pub struct MockSummaryProvider {
        response: Mutex<Option<String>>,
        error: Mutex<Option<String>>,
        gate: Mutex<Option<Arc<Notify>>>,
        calls: AtomicUsize,
    }

    impl MockSummaryProvider {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_response(self, response: impl Into<String>) -> Self {
            *self.response.lock().unwrap() = Some(response.into());
            self
        }

        pub fn with_error(self, error: impl Into<String>) -> Self {
            *self.error.lock().unwrap() = Some(error.into());
            self
        }

        /// The next calls block until the returned handle is notified.
        pub fn gated(self) -> (Self, Arc<Notify>) {
            let notify = Arc::new(Notify::new());
            *self.gate.lock().unwrap() = Some(notify.clone());
            (self, notify)
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SummaryProvider for MockSummaryProvider {
        async fn summarize(
            &self,
            url: &str,
            _api_key: &str,
            _document: &ExtractedDocument,
        ) -> Result<String, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            let gate = self.gate.lock().unwrap().clone();
            if let Some(gate) = gate {
                gate.notified().await;
            }

            if let Some(error) = self.error.lock().unwrap().clone() {
                return Err(DomainError::provider("summarizer", error));
            }

            let response = self.response.lock().unwrap().clone();
            Ok(response.unwrap_or_else(|| format!("<p>summary of {}</p>", url)))
        }
    }

    /// Mock narration provider
    #[derive(Debug, Default)]
    pub struct MockNarrationProvider {
        audio: Mutex<Option<Bytes>>,
        error: Mutex<Option<String>>,
        gate: Mutex<Option<Arc<Notify>>>,
        calls: AtomicUsize,
    }

    impl MockNarrationProvider {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_audio(self, audio: impl Into<Bytes>) -> Self {
            *self.audio.lock().unwrap() = Some(audio.into());
            self
        }

        pub fn with_error(self, error: impl Into<String>) -> Self {
            *self.error.lock().unwrap() = Some(error.into());
            self
        }

        pub fn gated(self) -> (Self, Arc<Notify>) {
            let notify = Arc::new(Notify::new());
            *self.gate.lock().unwrap() = Some(notify.clone());
            (self, notify)
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl NarrationProvider for MockNarrationProvider {
        async fn narrate(&self, _text: &str, _api_key: &str) -> Result<Bytes, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            let gate = self.gate.lock().unwrap().clone();
            if let Some(gate) = gate {
                gate.notified().await;
            }

            if let Some(error) = self.error.lock().unwrap().clone() {
                return Err(DomainError::provider("narrator", error));
            }

            let audio = self.audio.lock().unwrap().clone();
            Ok(audio.unwrap_or_else(|| Bytes::from_static(b"\x00audio")))
        }
    }

    /// Mock chat provider echoing the prompt, minting a fresh turn id per call
    #[derive(Debug, Default)]
    pub struct MockChatProvider {
        error: Mutex<Option<String>>,
        gate: Mutex<Option<Arc<Notify>>>,
        calls: AtomicUsize,
        seen_prior_turns: Mutex<Vec<Option<String>>>,
    }

    impl MockChatProvider {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_error(self, error: impl Into<String>) -> Self {
            *self.error.lock().unwrap() = Some(error.into());
            self
        }

        pub fn gated(self) -> (Self, Arc<Notify>) {
            let notify = Arc::new(Notify::new());
            *self.gate.lock().unwrap() = Some(notify.clone());
            (self, notify)
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        /// Prior-turn ids observed, in call order.
        pub fn seen_prior_turns(&self) -> Vec<Option<String>> {
            self.seen_prior_turns.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatProvider for MockChatProvider {
        async fn send(
            &self,
            prompt: &str,
            _url: &str,
            prior_turn_id: Option<&str>,
            _api_key: &str,
        ) -> Result<ChatReply, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen_prior_turns
                .lock()
                .unwrap()
                .push(prior_turn_id.map(str::to_string));

            let gate = self.gate.lock().unwrap().clone();
            if let Some(gate) = gate {
                gate.notified().await;
            }

            if let Some(error) = self.error.lock().unwrap().clone() {
                return Err(DomainError::provider("chat", error));
            }

            Ok(ChatReply {
                text: format!("answer to: {}", prompt),
                turn_id: uuid::Uuid::new_v4().to_string(),
            })
        }
    }
}
