//! Service layer - session controller and background maintenance

mod session_service;
mod sweeper;

pub use session_service::{SessionDeps, SessionService};
pub use sweeper::CacheSweeper;
