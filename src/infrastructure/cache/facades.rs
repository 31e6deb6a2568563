//! Typed cache facades
//!
//! Three instantiations of the generic TTL cache, one per cached data kind.
//! Each facade fixes a namespace, a key prefix and a codec; none adds cache
//! semantics of its own.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::config::CacheSettings;
use crate::domain::DomainError;
use crate::domain::cache::{Base64Codec, CacheConfig, ExpirySweep, JsonCodec, TtlCache};
use crate::domain::llm::Conversation;
use crate::domain::storage::KeyValueStore;

/// Page summaries, keyed by URL
#[derive(Debug)]
pub struct SummaryCache {
    inner: TtlCache<String, JsonCodec<String>>,
}

impl SummaryCache {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        config: &CacheSettings,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            inner: TtlCache::json(
                store,
                CacheConfig::new("summaries")
                    .with_ttl(config.summary_ttl())
                    .with_key_prefix("summary"),
            )?,
        })
    }

    pub async fn get(&self, url: &str) -> Option<String> {
        self.inner.get(url).await
    }

    pub async fn set(&self, url: &str, summary: &str) {
        self.inner.set(url, &summary.to_string()).await;
    }

    pub async fn cache_size(&self) -> u64 {
        self.inner.cache_size().await
    }
}

/// Narration audio, keyed by URL, stored base64-encoded
#[derive(Debug)]
pub struct AudioCache {
    inner: TtlCache<Bytes, Base64Codec>,
}

impl AudioCache {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        config: &CacheSettings,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            inner: TtlCache::with_codec(
                store,
                CacheConfig::new("audio")
                    .with_ttl(config.audio_ttl())
                    .with_key_prefix("audio"),
                Base64Codec::new(),
            )?,
        })
    }

    pub async fn get(&self, url: &str) -> Option<Bytes> {
        self.inner.get(url).await
    }

    pub async fn set(&self, url: &str, audio: &Bytes) {
        self.inner.set(url, audio).await;
    }

    pub async fn cache_size(&self) -> u64 {
        self.inner.cache_size().await
    }
}

/// Conversation histories, keyed by URL
#[derive(Debug)]
pub struct ConversationCache {
    inner: TtlCache<Conversation, JsonCodec<Conversation>>,
}

impl ConversationCache {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        config: &CacheSettings,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            inner: TtlCache::json(
                store,
                CacheConfig::new("conversations")
                    .with_ttl(config.conversation_ttl())
                    .with_key_prefix("prompt"),
            )?,
        })
    }

    pub async fn get(&self, url: &str) -> Option<Conversation> {
        self.inner.get(url).await
    }

    pub async fn set(&self, url: &str, conversation: &Conversation) {
        self.inner.set(url, conversation).await;
    }

    pub async fn cache_size(&self) -> u64 {
        self.inner.cache_size().await
    }
}

#[async_trait]
impl ExpirySweep for SummaryCache {
    fn namespace(&self) -> &str {
        self.inner.namespace()
    }

    async fn clear_expired(&self) -> usize {
        self.inner.clear_expired().await
    }
}

#[async_trait]
impl ExpirySweep for AudioCache {
    fn namespace(&self) -> &str {
        self.inner.namespace()
    }

    async fn clear_expired(&self) -> usize {
        self.inner.clear_expired().await
    }
}

#[async_trait]
impl ExpirySweep for ConversationCache {
    fn namespace(&self) -> &str {
        self.inner.namespace()
    }

    async fn clear_expired(&self) -> usize {
        self.inner.clear_expired().await
    }
}

/// The three caches one panel process runs with
#[derive(Debug, Clone)]
pub struct CacheSet {
    pub summaries: Arc<SummaryCache>,
    pub audio: Arc<AudioCache>,
    pub conversations: Arc<ConversationCache>,
}

impl CacheSet {
    pub fn from_config(
        store: Arc<dyn KeyValueStore>,
        config: &CacheSettings,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            summaries: Arc::new(SummaryCache::new(store.clone(), config)?),
            audio: Arc::new(AudioCache::new(store.clone(), config)?),
            conversations: Arc::new(ConversationCache::new(store, config)?),
        })
    }

    /// Caches the periodic sweeper should cover.
    pub fn sweep_targets(&self) -> Vec<Arc<dyn ExpirySweep>> {
        vec![
            self.summaries.clone(),
            self.audio.clone(),
            self.conversations.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::ChatExchange;
    use crate::infrastructure::storage::InMemoryKeyValueStore;

    fn cache_set() -> (Arc<InMemoryKeyValueStore>, CacheSet) {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let set = CacheSet::from_config(store.clone(), &CacheSettings::default()).unwrap();
        (store, set)
    }

    #[tokio::test]
    async fn test_namespaces_are_disjoint() {
        let (_, set) = cache_set();
        let url = "https://example.com/page";

        set.summaries.set(url, "<p>summary</p>").await;
        set.audio.set(url, &Bytes::from_static(b"\x01\x02")).await;

        let mut conversation = Conversation::new();
        conversation.push(ChatExchange {
            user: "q".to_string(),
            assistant: "a".to_string(),
            turn_id: "t1".to_string(),
        });
        set.conversations.set(url, &conversation).await;

        assert_eq!(set.summaries.get(url).await.as_deref(), Some("<p>summary</p>"));
        assert_eq!(set.audio.get(url).await, Some(Bytes::from_static(b"\x01\x02")));
        assert_eq!(set.conversations.get(url).await, Some(conversation));
    }

    #[tokio::test]
    async fn test_audio_survives_binary_round_trip() {
        let (_, set) = cache_set();
        let audio = Bytes::from((0u8..=255).collect::<Vec<u8>>());

        set.audio.set("https://a.example", &audio).await;
        assert_eq!(set.audio.get("https://a.example").await, Some(audio));
    }

    #[tokio::test]
    async fn test_sweep_targets_cover_all_three() {
        let (_, set) = cache_set();

        let targets = set.sweep_targets();
        assert_eq!(targets.len(), 3);
        let names: Vec<String> = targets.iter().map(|c| c.namespace().to_string()).collect();
        assert!(names.contains(&"summaries".to_string()));
        assert!(names.contains(&"audio".to_string()));
        assert!(names.contains(&"conversations".to_string()));
    }
}
