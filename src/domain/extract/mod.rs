//! Page content extraction contract
//!
//! Extraction itself (DOM walking, markdown conversion) lives outside this
//! crate; the session only needs the contract and the extracted shape.

use std::fmt::Debug;

use async_trait::async_trait;

/// Hints passed alongside the raw document
#[derive(Debug, Clone, Default)]
pub struct PageMetadata {
    pub title: String,
    pub url: String,
    pub site_name: Option<String>,
}

/// Kind of content an extraction produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Article,
    /// Fallback when no article body could be located.
    RawText,
}

/// Result of extracting a page
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub title: String,
    pub content: String,
    pub kind: ContentKind,
}

/// Extracts summarizable content from a raw document.
///
/// Implementations never fail: when proper extraction is impossible they
/// fall back to a degraded result (`ContentKind::RawText`) and still return
/// a usable structure.
#[async_trait]
pub trait ContentExtractor: Send + Sync + Debug {
    async fn extract(&self, html: &str, meta: &PageMetadata) -> ExtractedDocument;
}
