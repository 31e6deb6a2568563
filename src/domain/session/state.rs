//! Per-tab session state

use std::collections::HashSet;

/// Browser tab identifier, handed in at panel-open time
pub type TabId = u32;

/// Kind of asynchronous load a session can have outstanding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadKind {
    Summary,
    Audio,
    Prompt,
    Extraction,
}

impl LoadKind {
    pub fn loading_message(&self) -> &'static str {
        match self {
            Self::Summary => "Summarizing page...",
            Self::Audio => "Generating narration...",
            Self::Prompt => "Thinking...",
            Self::Extraction => "Reading page...",
        }
    }
}

/// Snapshot of a tab delivered with a navigation-complete event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSnapshot {
    pub url: String,
    pub title: String,
}

/// Navigation-complete notification for a session's tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabUpdate {
    Navigated(TabSnapshot),
    /// Tab closed, or on a restricted scheme the panel cannot serve.
    Unavailable,
}

/// Mutable state of one open panel bound to one tab.
///
/// Lives behind the session's mutex; long-running operations must re-read
/// `url` after every suspension point before touching the view.
#[derive(Debug, Default)]
pub struct SessionState {
    pub url: Option<String>,
    pub title: String,
    pub is_loading: bool,
    pub loading_message: String,
    /// Summary currently displayed, if any. Cleared on navigation.
    pub current_summary: Option<String>,
    /// One-shot auto-summarize armed at panel open, consumed by the first
    /// navigation-complete event.
    pub auto_summarize_pending: bool,
    /// Terminal display state; no further operations are serviced.
    pub unavailable: bool,
    /// Outstanding operation kinds; duplicate concurrent loads of the same
    /// kind are rejected.
    in_flight: HashSet<LoadKind>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `kind` in flight. Returns false when one of the same kind is
    /// already outstanding.
    pub fn begin(&mut self, kind: LoadKind) -> bool {
        if !self.in_flight.insert(kind) {
            return false;
        }
        self.is_loading = true;
        self.loading_message = kind.loading_message().to_string();
        true
    }

    /// Clears the in-flight marker; drops the loading flag once nothing
    /// remains outstanding.
    pub fn finish(&mut self, kind: LoadKind) {
        self.in_flight.remove(&kind);
        if self.in_flight.is_empty() {
            self.is_loading = false;
            self.loading_message.clear();
        }
    }

    pub fn in_flight(&self, kind: LoadKind) -> bool {
        self.in_flight.contains(&kind)
    }

    /// Adopts a new URL and title, dropping content tied to the old URL.
    pub fn transition_to(&mut self, snapshot: &TabSnapshot) {
        self.url = Some(snapshot.url.clone());
        self.title = snapshot.title.clone();
        self.current_summary = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_rejects_duplicate_kind() {
        let mut state = SessionState::new();
        assert!(state.begin(LoadKind::Summary));
        assert!(!state.begin(LoadKind::Summary));
        // A different kind is not blocked.
        assert!(state.begin(LoadKind::Prompt));
    }

    #[test]
    fn test_loading_cleared_only_when_nothing_outstanding() {
        let mut state = SessionState::new();
        state.begin(LoadKind::Summary);
        state.begin(LoadKind::Audio);

        state.finish(LoadKind::Summary);
        assert!(state.is_loading);

        state.finish(LoadKind::Audio);
        assert!(!state.is_loading);
        assert!(state.loading_message.is_empty());
    }

    #[test]
    fn test_transition_drops_displayed_summary() {
        let mut state = SessionState::new();
        state.url = Some("https://a.example".to_string());
        state.current_summary = Some("old".to_string());

        state.transition_to(&TabSnapshot {
            url: "https://b.example".to_string(),
            title: "B".to_string(),
        });

        assert_eq!(state.url.as_deref(), Some("https://b.example"));
        assert_eq!(state.title, "B");
        assert!(state.current_summary.is_none());
    }
}
