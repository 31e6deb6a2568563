//! Domain layer - core contracts and cache logic

pub mod cache;
pub mod credentials;
pub mod error;
pub mod extract;
pub mod llm;
pub mod session;
pub mod storage;

pub use cache::{
    Base64Codec, CacheCodec, CacheConfig, Clock, ExpirySweep, HashedKeyGenerator, JsonCodec,
    StorageKeyGenerator, SystemClock, TtlCache,
};
pub use credentials::CredentialProvider;
pub use error::DomainError;
pub use extract::{ContentExtractor, ContentKind, ExtractedDocument, PageMetadata};
pub use llm::{ChatExchange, ChatProvider, ChatReply, Conversation, NarrationProvider, SummaryProvider};
pub use session::{BrowserTabs, LoadKind, PanelView, SessionState, TabId, TabSnapshot, TabUpdate};
pub use storage::{KeyValueStore, KeyValueStoreExt};
