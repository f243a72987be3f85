// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable cache of the last fetched account and billing.
//!
//! The cache never expires entries itself; callers compare
//! [`CachedSession::last_updated`] against [`FRESHNESS_WINDOW_MS`].

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use grindless_core::{Account, Billing, Clock, GrindlessError, KeyValueStore};

/// Storage key of the serialized account.
pub const PROFILE_KEY: &str = "@me";

/// Storage key of the serialized billing snapshot.
pub const BILLING_KEY: &str = "@me.billing";

/// Storage key of the last fetch time, epoch milliseconds as a decimal string.
pub const LAST_UPDATED_KEY: &str = "@me.last_updated";

/// How long a cached profile is trusted without asking the server (5 minutes).
pub const FRESHNESS_WINDOW_MS: i64 = 300_000;

/// Whatever the cache currently holds. Any part may be missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CachedSession {
    pub account: Option<Account>,
    pub billing: Option<Billing>,
    pub last_updated: Option<i64>,
}

impl CachedSession {
    /// True when both account and billing are present and were written less
    /// than [`FRESHNESS_WINDOW_MS`] before `now_millis`.
    ///
    /// A timestamp in the future is not trusted.
    pub fn is_fresh(&self, now_millis: i64) -> bool {
        if self.account.is_none() || self.billing.is_none() {
            return false;
        }
        match self.last_updated {
            Some(ts) => {
                let age = now_millis - ts;
                (0..FRESHNESS_WINDOW_MS).contains(&age)
            }
            None => false,
        }
    }
}

/// Session cache over a [`KeyValueStore`].
#[derive(Clone)]
pub struct SessionCache {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl SessionCache {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Reads all three entries. Missing or unparseable entries are `None`.
    pub async fn read(&self) -> Result<CachedSession, GrindlessError> {
        let account = self.read_json::<Account>(PROFILE_KEY).await?;
        let billing = self.read_json::<Billing>(BILLING_KEY).await?;
        let last_updated = match self.store.get(LAST_UPDATED_KEY).await? {
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(ts) => Some(ts),
                Err(e) => {
                    warn!(key = LAST_UPDATED_KEY, error = %e, "ignoring unparseable cache timestamp");
                    None
                }
            },
            None => None,
        };

        Ok(CachedSession {
            account,
            billing,
            last_updated,
        })
    }

    /// Stores both values and stamps the current time.
    pub async fn write(&self, account: &Account, billing: &Billing) -> Result<(), GrindlessError> {
        self.write_json(PROFILE_KEY, account).await?;
        self.write_json(BILLING_KEY, billing).await?;
        let now = self.clock.now_millis();
        self.store.set(LAST_UPDATED_KEY, &now.to_string()).await?;
        debug!(store = self.store.name(), account_id = account.id, "session cache written");
        Ok(())
    }

    /// Overwrites only the billing entry. The timestamp is left as is.
    pub async fn write_billing(&self, billing: &Billing) -> Result<(), GrindlessError> {
        self.write_json(BILLING_KEY, billing).await
    }

    /// Removes all three entries. Idempotent.
    pub async fn clear(&self) -> Result<(), GrindlessError> {
        for key in [PROFILE_KEY, BILLING_KEY, LAST_UPDATED_KEY] {
            self.store.remove(key).await?;
        }
        debug!(store = self.store.name(), "session cache cleared");
        Ok(())
    }

    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, GrindlessError> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key, error = %e, "ignoring unparseable cache entry");
                Ok(None)
            }
        }
    }

    async fn write_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), GrindlessError> {
        let raw = serde_json::to_string(value)
            .map_err(|e| GrindlessError::Internal(format!("failed to serialize `{key}`: {e}")))?;
        self.store.set(key, &raw).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grindless_storage::MemoryStore;
    use grindless_test_utils::ManualClock;
    use grindless_test_utils::fixtures::{sample_account, sample_billing};

    fn cache_with(store: Arc<MemoryStore>, clock: &ManualClock) -> SessionCache {
        SessionCache::new(store, Arc::new(clock.clone()))
    }

    #[tokio::test]
    async fn empty_store_reads_as_absent() {
        let cache = cache_with(Arc::new(MemoryStore::new()), &ManualClock::at(0));
        assert_eq!(cache.read().await.unwrap(), CachedSession::default());
    }

    #[tokio::test]
    async fn write_then_read_round_trips() {
        let store = Arc::new(MemoryStore::new());
        let clock = ManualClock::at(1_700_000_000_000);
        let cache = cache_with(store.clone(), &clock);

        let account = sample_account(9);
        let billing = sample_billing(120);
        cache.write(&account, &billing).await.unwrap();

        let read = cache.read().await.unwrap();
        assert_eq!(read.account, Some(account));
        assert_eq!(read.billing, Some(billing));
        assert_eq!(read.last_updated, Some(1_700_000_000_000));
        assert_eq!(
            store.snapshot().await.get(LAST_UPDATED_KEY).map(String::as_str),
            Some("1700000000000")
        );
    }

    #[tokio::test]
    async fn write_billing_keeps_timestamp() {
        let store = Arc::new(MemoryStore::new());
        let clock = ManualClock::at(5_000);
        let cache = cache_with(store, &clock);

        cache.write(&sample_account(1), &sample_billing(10)).await.unwrap();
        clock.advance(60_000);
        cache.write_billing(&sample_billing(7)).await.unwrap();

        let read = cache.read().await.unwrap();
        assert_eq!(read.billing.unwrap().credits, 7);
        assert_eq!(read.last_updated, Some(5_000));
    }

    #[tokio::test]
    async fn clear_is_idempotent() {
        let store = Arc::new(MemoryStore::new());
        let cache = cache_with(store.clone(), &ManualClock::at(1));
        cache.write(&sample_account(1), &sample_billing(1)).await.unwrap();

        cache.clear().await.unwrap();
        cache.clear().await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn garbage_entries_read_as_absent() {
        let store = Arc::new(MemoryStore::with_entries([
            (PROFILE_KEY, "{not json"),
            (BILLING_KEY, r#"{"credits": 3}"#),
            (LAST_UPDATED_KEY, "yesterday"),
        ]));
        let cache = cache_with(store, &ManualClock::at(0));

        let read = cache.read().await.unwrap();
        assert!(read.account.is_none());
        assert_eq!(read.billing.unwrap().credits, 3);
        assert!(read.last_updated.is_none());
    }

    #[test]
    fn freshness_window_bounds() {
        let cached = CachedSession {
            account: Some(sample_account(1)),
            billing: Some(sample_billing(1)),
            last_updated: Some(1_000_000),
        };
        assert!(cached.is_fresh(1_000_000));
        assert!(cached.is_fresh(1_000_000 + FRESHNESS_WINDOW_MS - 1));
        assert!(!cached.is_fresh(1_000_000 + FRESHNESS_WINDOW_MS));
        assert!(!cached.is_fresh(999_999));
    }

    #[test]
    fn partial_cache_is_never_fresh() {
        let cached = CachedSession {
            account: Some(sample_account(1)),
            billing: None,
            last_updated: Some(0),
        };
        assert!(!cached.is_fresh(1));
    }
}
