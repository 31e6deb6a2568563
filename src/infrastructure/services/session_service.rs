//! Per-tab session controller
//!
//! One instance per open panel, bound to one tab id. Mediates between
//! user-triggered actions and the caches/providers, and guarantees the view
//! only ever reflects the result for the tab's current URL: every
//! long-running operation re-reads the live URL after its last suspension
//! point and discards its result on mismatch. Discarded results are still
//! written to their cache so a later visit benefits.

use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::Mutex;

use crate::domain::DomainError;
use crate::domain::credentials::CredentialProvider;
use crate::domain::extract::{ContentExtractor, PageMetadata};
use crate::domain::llm::{ChatExchange, ChatProvider, NarrationProvider, SummaryProvider};
use crate::domain::session::{BrowserTabs, LoadKind, PanelView, SessionState, TabId, TabUpdate};
use crate::infrastructure::cache::CacheSet;

/// Collaborators a session runs against
#[derive(Debug, Clone)]
pub struct SessionDeps {
    pub caches: CacheSet,
    pub tabs: Arc<dyn BrowserTabs>,
    pub extractor: Arc<dyn ContentExtractor>,
    pub summarizer: Arc<dyn SummaryProvider>,
    pub narrator: Arc<dyn NarrationProvider>,
    pub chat: Arc<dyn ChatProvider>,
    pub credentials: Arc<dyn CredentialProvider>,
    pub view: Arc<dyn PanelView>,
}

/// Controller for one open panel
#[derive(Debug)]
pub struct SessionService {
    tab_id: TabId,
    state: Mutex<SessionState>,
    deps: SessionDeps,
}

impl SessionService {
    pub fn new(tab_id: TabId, deps: SessionDeps) -> Self {
        Self {
            tab_id,
            state: Mutex::new(SessionState::new()),
            deps,
        }
    }

    pub fn tab_id(&self) -> TabId {
        self.tab_id
    }

    pub async fn current_url(&self) -> Option<String> {
        self.state.lock().await.url.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.lock().await.is_loading
    }

    /// Summarizes the current page, reading through the summary cache.
    ///
    /// Returns true when a summary is now displayed for the session's
    /// current URL. A result computed for a URL the session has since left
    /// is cached but not rendered, and reports false.
    pub async fn summarize(&self) -> bool {
        let Some(requested_url) = self.operable_url().await else {
            self.fail(DomainError::validation("no page to summarize"))
                .await;
            return false;
        };

        if !self.begin(LoadKind::Summary).await {
            return false;
        }
        let outcome = self.run_summarize(&requested_url).await;
        self.finish(LoadKind::Summary).await;

        match outcome {
            Ok(rendered) => rendered,
            Err(e) => {
                self.fail(e).await;
                false
            }
        }
    }

    async fn run_summarize(&self, requested_url: &str) -> Result<bool, DomainError> {
        if let Some(summary) = self.deps.caches.summaries.get(requested_url).await {
            return Ok(self.present_summary(requested_url, summary).await);
        }

        self.set_phase(LoadKind::Extraction).await;
        let html = self.deps.tabs.page_html(self.tab_id).await?;
        let meta = {
            let state = self.state.lock().await;
            PageMetadata {
                title: state.title.clone(),
                url: requested_url.to_string(),
                site_name: None,
            }
        };
        let document = self.deps.extractor.extract(&html, &meta).await;

        self.set_phase(LoadKind::Summary).await;
        let api_key = self.api_key().await?;
        let summary = self
            .deps
            .summarizer
            .summarize(requested_url, &api_key, &document)
            .await?;

        // Cache under the URL the request was issued for, whatever the
        // session looks like by now.
        self.deps.caches.summaries.set(requested_url, &summary).await;

        Ok(self.present_summary(requested_url, summary).await)
    }

    /// Narrates the displayed summary, reading through the audio cache.
    /// Triggers `summarize` first when nothing is displayed yet.
    pub async fn speechify(&self) -> bool {
        let has_summary = self.state.lock().await.current_summary.is_some();
        if !has_summary && !self.summarize().await {
            return false;
        }

        let (requested_url, summary_text) = {
            let state = self.state.lock().await;
            match (&state.url, &state.current_summary) {
                (Some(url), Some(summary)) => (url.clone(), summary.clone()),
                _ => return false,
            }
        };

        if !self.begin(LoadKind::Audio).await {
            return false;
        }
        let outcome = self.run_speechify(&requested_url, &summary_text).await;
        self.finish(LoadKind::Audio).await;

        match outcome {
            Ok(played) => played,
            Err(e) => {
                self.fail(e).await;
                false
            }
        }
    }

    async fn run_speechify(
        &self,
        requested_url: &str,
        summary_text: &str,
    ) -> Result<bool, DomainError> {
        if let Some(audio) = self.deps.caches.audio.get(requested_url).await {
            return Ok(self.present_audio(requested_url, audio).await);
        }

        let api_key = self.api_key().await?;
        let audio = self.deps.narrator.narrate(summary_text, &api_key).await?;

        self.deps.caches.audio.set(requested_url, &audio).await;

        Ok(self.present_audio(requested_url, audio).await)
    }

    /// Sends a follow-up question about the current page, appending the
    /// exchange to the page's cached conversation.
    pub async fn prompt(&self, input: &str) -> bool {
        let input = input.trim();
        if input.is_empty() {
            self.fail(DomainError::validation("prompt must not be empty"))
                .await;
            return false;
        }

        let Some(requested_url) = self.operable_url().await else {
            self.fail(DomainError::validation("no page to ask about")).await;
            return false;
        };

        if !self.begin(LoadKind::Prompt).await {
            return false;
        }
        let outcome = self.run_prompt(&requested_url, input).await;
        self.finish(LoadKind::Prompt).await;

        match outcome {
            Ok(appended) => appended,
            Err(e) => {
                self.fail(e).await;
                false
            }
        }
    }

    async fn run_prompt(&self, requested_url: &str, input: &str) -> Result<bool, DomainError> {
        let mut conversation = self
            .deps
            .caches
            .conversations
            .get(requested_url)
            .await
            .unwrap_or_default();
        let prior_turn = conversation.last_turn_id().map(str::to_string);

        let api_key = self.api_key().await?;
        let reply = self
            .deps
            .chat
            .send(input, requested_url, prior_turn.as_deref(), &api_key)
            .await?;

        let exchange = ChatExchange {
            user: input.to_string(),
            assistant: reply.text,
            turn_id: reply.turn_id,
        };
        conversation.push(exchange.clone());
        self.deps
            .caches
            .conversations
            .set(requested_url, &conversation)
            .await;

        let state = self.state.lock().await;
        if state.url.as_deref() != Some(requested_url) {
            tracing::debug!(
                "tab {}: discarding stale chat reply for {}",
                self.tab_id,
                requested_url
            );
            return Ok(false);
        }
        drop(state);

        self.deps.view.append_exchange(&exchange).await;
        Ok(true)
    }

    /// Reacts to a navigation-complete event for this session's tab.
    ///
    /// A changed URL clears the rendered content and re-populates it from
    /// the caches; an unavailable tab puts the session in its terminal
    /// display state.
    pub async fn handle_tab_change(&self, update: TabUpdate) {
        match update {
            TabUpdate::Unavailable => {
                let mut state = self.state.lock().await;
                state.unavailable = true;
                state.url = None;
                state.current_summary = None;
                drop(state);
                self.deps.view.show_unavailable().await;
            }
            TabUpdate::Navigated(snapshot) => {
                let (url_changed, auto_summarize) = {
                    let mut state = self.state.lock().await;
                    if state.unavailable {
                        return;
                    }
                    let changed = state.url.as_deref() != Some(snapshot.url.as_str());
                    if changed {
                        state.transition_to(&snapshot);
                    } else {
                        state.title = snapshot.title.clone();
                    }
                    let auto = std::mem::take(&mut state.auto_summarize_pending);
                    (changed, auto)
                };

                if url_changed {
                    self.deps.view.clear_content().await;
                    self.refresh(&snapshot.url).await;
                }
                if auto_summarize {
                    self.summarize().await;
                }
            }
        }
    }

    /// Arms the one-shot auto-summarize. With a tab that already finished
    /// loading the fetch starts immediately; otherwise the first
    /// navigation-complete event triggers it, and later ones do not.
    pub async fn summarize_on_open(&self, tab_already_complete: bool) {
        if tab_already_complete {
            self.summarize().await;
        } else {
            self.state.lock().await.auto_summarize_pending = true;
        }
    }

    /// Re-renders whatever the caches hold for `url`.
    async fn refresh(&self, url: &str) {
        if let Some(summary) = self.deps.caches.summaries.get(url).await {
            self.present_summary(url, summary).await;
        }
        if let Some(conversation) = self.deps.caches.conversations.get(url).await {
            let state = self.state.lock().await;
            if state.url.as_deref() != Some(url) {
                return;
            }
            drop(state);
            self.deps.view.render_conversation(&conversation).await;
        }
    }

    /// Renders `summary` unless the session has navigated away from
    /// `requested_url` in the meantime. Returns whether it rendered.
    async fn present_summary(&self, requested_url: &str, summary: String) -> bool {
        let mut state = self.state.lock().await;
        if state.url.as_deref() != Some(requested_url) {
            tracing::debug!(
                "tab {}: discarding stale summary for {}",
                self.tab_id,
                requested_url
            );
            return false;
        }
        state.current_summary = Some(summary.clone());
        drop(state);

        self.deps.view.render_summary(&summary).await;
        true
    }

    /// Same staleness gate as `present_summary`, for the audio path.
    async fn present_audio(&self, requested_url: &str, audio: Bytes) -> bool {
        let state = self.state.lock().await;
        if state.url.as_deref() != Some(requested_url) {
            tracing::debug!(
                "tab {}: discarding stale narration for {}",
                self.tab_id,
                requested_url
            );
            return false;
        }
        drop(state);

        self.deps.view.play_audio(&audio).await;
        true
    }

    /// URL the next operation should run against; None when the session is
    /// unavailable or has no page yet.
    async fn operable_url(&self) -> Option<String> {
        let state = self.state.lock().await;
        if state.unavailable {
            return None;
        }
        state.url.clone()
    }

    async fn api_key(&self) -> Result<String, DomainError> {
        self.deps
            .credentials
            .api_key()
            .await?
            .ok_or_else(|| DomainError::credential("no API key configured"))
    }

    async fn begin(&self, kind: LoadKind) -> bool {
        let message = {
            let mut state = self.state.lock().await;
            if state.unavailable || !state.begin(kind) {
                return false;
            }
            state.loading_message.clone()
        };
        self.deps.view.set_loading(&message).await;
        true
    }

    async fn finish(&self, kind: LoadKind) {
        let still_loading = {
            let mut state = self.state.lock().await;
            state.finish(kind);
            state.is_loading
        };
        if !still_loading {
            self.deps.view.clear_loading().await;
        }
    }

    async fn set_phase(&self, kind: LoadKind) {
        let message = kind.loading_message();
        self.state.lock().await.loading_message = message.to_string();
        self.deps.view.set_loading(message).await;
    }

    async fn fail(&self, error: DomainError) {
        tracing::warn!("tab {}: operation failed: {}", self.tab_id, error);
        self.deps.view.render_error(&error.to_string()).await;
    }
}
