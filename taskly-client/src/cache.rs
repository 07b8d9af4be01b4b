//! Query-key addressed response cache.
//!
//! Keys are the sole isolation mechanism between tenants on the client.
//! There is no request cancellation: a late response for a stale tenant
//! lands under that tenant's key and is dropped with it, never served as
//! current data.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;
use taskly_core::{QueryKey, TenantId};
use tracing::debug;

#[derive(Debug, Default)]
pub struct QueryCache {
    entries: RwLock<HashMap<QueryKey, Value>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, key: QueryKey, value: Value) {
        self.entries.write().unwrap().insert(key, value);
    }

    pub fn get(&self, key: &QueryKey) -> Option<Value> {
        self.entries.read().unwrap().get(key).cloned()
    }

    /// Drop one entry.
    pub fn invalidate(&self, key: &QueryKey) {
        if self.entries.write().unwrap().remove(key).is_some() {
            debug!(tag = %key.tag(), "invalidated cache entry");
        }
    }

    /// Drop every entry scoped to `tenant`. Used on tenant switch and
    /// logout.
    pub fn invalidate_tenant(&self, tenant: &TenantId) {
        let mut entries = self.entries.write().unwrap();
        let before = entries.len();
        entries.retain(|key, _| key.tenant() != tenant);
        let dropped = before - entries.len();
        if dropped > 0 {
            debug!(tenant = %tenant, dropped, "invalidated tenant cache entries");
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }
}
