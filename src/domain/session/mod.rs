//! Session domain - per-tab panel state and host-facing contracts

mod browser;
mod state;
mod view;

pub use browser::BrowserTabs;
pub use state::{LoadKind, SessionState, TabId, TabSnapshot, TabUpdate};
pub use view::PanelView;

#[cfg(test)]
pub use browser::mock::MockBrowserTabs;
#[cfg(test)]
pub use view::mock::{RecordingView, ViewEvent};
