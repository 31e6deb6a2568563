//! Cache domain - generic TTL caching over the key-value adapter

mod clock;
mod codec;
mod index;
mod key;
mod ttl_cache;

pub use clock::{Clock, SystemClock};
pub use codec::{Base64Codec, CacheCodec, JsonCodec};
pub use index::{CacheIndex, IndexEntry, SCHEMA_VERSION};
pub use key::{HashedKeyGenerator, StorageKeyGenerator};
pub use ttl_cache::{CacheConfig, ExpirySweep, TtlCache};

#[cfg(test)]
pub use clock::mock::ManualClock;
