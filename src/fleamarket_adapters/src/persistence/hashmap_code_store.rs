use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use fleamarket_core::{CodeKey, CodeMatch, CodeStore, CodeStoreError, VerificationCode};
use tokio::time::Instant;

/// In-process code store. Expired entries are unreachable immediately and
/// are dropped lazily on read or by `purge_expired`.
#[derive(Default, Clone)]
pub struct HashMapCodeStore {
    codes: Arc<DashMap<CodeKey, (VerificationCode, Instant)>>,
}

impl HashMapCodeStore {
    pub fn new() -> Self {
        Self {
            codes: Arc::new(DashMap::new()),
        }
    }

    /// Drops every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.codes.len();
        self.codes.retain(|_, (_, expires_at)| now < *expires_at);
        before.saturating_sub(self.codes.len())
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[async_trait::async_trait]
impl CodeStore for HashMapCodeStore {
    async fn put(
        &self,
        key: &CodeKey,
        code: VerificationCode,
        ttl: Duration,
    ) -> Result<(), CodeStoreError> {
        self.codes.insert(key.clone(), (code, Instant::now() + ttl));
        Ok(())
    }

    async fn get(&self, key: &CodeKey) -> Result<Option<VerificationCode>, CodeStoreError> {
        if let Some(entry) = self.codes.get(key) {
            let (code, expires_at) = entry.value();
            if Instant::now() < *expires_at {
                return Ok(Some(code.clone()));
            }
        }

        self.codes
            .remove_if(key, |_, (_, expires_at)| Instant::now() >= *expires_at);
        Ok(None)
    }

    async fn delete(&self, key: &CodeKey) -> Result<(), CodeStoreError> {
        self.codes.remove(key);
        Ok(())
    }

    async fn take_if_matches(
        &self,
        key: &CodeKey,
        submitted: &VerificationCode,
    ) -> Result<CodeMatch, CodeStoreError> {
        let now = Instant::now();
        // remove_if holds the shard write lock across the comparison
        let taken = self.codes.remove_if(key, |_, (code, expires_at)| {
            now < *expires_at && code == submitted
        });
        if taken.is_some() {
            return Ok(CodeMatch::Consumed);
        }

        match self.get(key).await? {
            Some(_) => Ok(CodeMatch::Mismatch),
            None => Ok(CodeMatch::Missing),
        }
    }
}
