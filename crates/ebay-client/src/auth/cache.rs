//! Application token memoization
//!
//! One slot per `(app_id, scopes)` key. Each slot has its own async lock, so
//! concurrent callers for the same key coalesce into a single upstream fetch
//! while other keys proceed independently. Failed fetches are not cached.
//! Idle slots whose token has lapsed are pruned on the next lookup, so the map
//! only grows with the number of live scope sets.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use once_cell::sync::Lazy;
use tracing::debug;

use super::Token;
use crate::error::Result;

/// Memo window, shorter than the ~2h application token lifetime
pub const APP_TOKEN_TTL_MINUTES: i64 = 50;

static GLOBAL: Lazy<Arc<AppTokenCache>> = Lazy::new(|| Arc::new(AppTokenCache::default()));

type CacheKey = (String, Vec<String>);
type Slot = Arc<tokio::sync::Mutex<Option<CachedToken>>>;

struct CachedToken {
    token: Token,
    valid_until: DateTime<Utc>,
}

pub struct AppTokenCache {
    ttl: Duration,
    slots: Mutex<HashMap<CacheKey, Slot>>,
}

impl AppTokenCache {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, slots: Mutex::new(HashMap::new()) }
    }

    /// Process-wide instance shared by every [`super::Auth`] not given its own
    pub fn global() -> Arc<AppTokenCache> {
        GLOBAL.clone()
    }

    /// Return the cached token for the key, or run `fetch` once and cache it
    pub async fn get_or_fetch<F, Fut>(&self, app_id: &str, scopes: &[String], fetch: F) -> Result<Token>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Token>>,
    {
        let slot = self.slot((app_id.to_string(), scopes.to_vec()));
        let mut cached = slot.lock().await;

        if let Some(entry) = cached.as_ref() {
            if Utc::now() < entry.valid_until {
                debug!("Application token served from cache for {}", app_id);
                return Ok(entry.token.clone());
            }
        }

        let token = fetch().await?;
        // Never serve past the token's own expiry
        let valid_until = (Utc::now() + self.ttl).min(token.expires_at);
        *cached = Some(CachedToken { token: token.clone(), valid_until });

        Ok(token)
    }

    /// Drop every cached token
    pub fn clear(&self) {
        self.slots.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    fn slot(&self, key: CacheKey) -> Slot {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        let now = Utc::now();
        slots.retain(|_, slot| Arc::strong_count(slot) > 1 || slot_is_live(slot, now));
        slots.entry(key).or_default().clone()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.slots.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

/// Idle slot still holding an unexpired token. A slot whose lock is taken is in use.
fn slot_is_live(slot: &Slot, now: DateTime<Utc>) -> bool {
    match slot.try_lock() {
        Ok(cached) => cached.as_ref().is_some_and(|entry| now < entry.valid_until),
        Err(_) => true,
    }
}

impl Default for AppTokenCache {
    fn default() -> Self {
        Self::new(Duration::minutes(APP_TOKEN_TTL_MINUTES))
    }
}
