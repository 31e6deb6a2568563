//! Credential source contract
//!
//! Key storage and encryption are external; the session only asks whether a
//! key is configured.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

#[async_trait]
pub trait CredentialProvider: Send + Sync + Debug {
    /// Returns the stored API key, or None when none is configured.
    async fn api_key(&self) -> Result<Option<String>, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;

    #[derive(Debug, Default)]
    pub struct MockCredentialProvider {
        key: Option<String>,
    }

    impl MockCredentialProvider {
        pub fn with_key(key: impl Into<String>) -> Self {
            Self {
                key: Some(key.into()),
            }
        }

        pub fn absent() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl CredentialProvider for MockCredentialProvider {
        async fn api_key(&self) -> Result<Option<String>, DomainError> {
            Ok(self.key.clone())
        }
    }
}
