//! Browser tab access contract

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::state::TabId;

/// Read access to a tab's live document
#[async_trait]
pub trait BrowserTabs: Send + Sync + Debug {
    /// Raw HTML of the tab's current document.
    async fn page_html(&self, tab_id: TabId) -> Result<String, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    pub struct MockBrowserTabs {
        html: Mutex<String>,
        error: Mutex<Option<String>>,
    }

    impl MockBrowserTabs {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_html(self, html: impl Into<String>) -> Self {
            *self.html.lock().unwrap() = html.into();
            self
        }

        pub fn with_error(self, error: impl Into<String>) -> Self {
            *self.error.lock().unwrap() = Some(error.into());
            self
        }
    }

    #[async_trait]
    impl BrowserTabs for MockBrowserTabs {
        async fn page_html(&self, _tab_id: TabId) -> Result<String, DomainError> {
            if let Some(error) = self.error.lock().unwrap().clone() {
                return Err(DomainError::storage(error));
            }
            Ok(self.html.lock().unwrap().clone())
        }
    }
}
