//! HTTP surface of the task API.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use taskly_core::config::TasklyConfigSnapshot;
use taskly_core::{Tenant, TenantId};

use crate::cache::QueryCache;

/// Client-side options for the task API.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientOptions {
    /// Base URL of the REST API.
    pub base_url: String,
    /// Optional pause before create requests. A UI-feedback affordance,
    /// not a correctness requirement; off by default.
    #[serde(default, with = "humantime_serde::option")]
    pub create_delay: Option<Duration>,
}

impl ClientOptions {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            create_delay: None,
        }
    }

    /// Read options from the config snapshot, falling back to the fixed
    /// test default for a missing base URL.
    pub fn from_config(config: &TasklyConfigSnapshot) -> Self {
        Self {
            base_url: config
                .get_string("api.base_url")
                .unwrap_or_else(|| "http://localhost:4000".to_string()),
            create_delay: None,
        }
    }

    pub fn with_create_delay(mut self, delay: Duration) -> Self {
        self.create_delay = Some(delay);
        self
    }
}

/// Tenant-scoped task resource client.
///
/// Reads land in the shared [`QueryCache`] under `(resource, tenant)`
/// keys; successful writes invalidate the affected keys.
pub struct TaskApi {
    http: reqwest::Client,
    options: ClientOptions,
    cache: Arc<QueryCache>,
}

impl TaskApi {
    pub fn new(options: ClientOptions) -> Self {
        Self {
            http: reqwest::Client::new(),
            options,
            cache: Arc::new(QueryCache::new()),
        }
    }

    /// Share an externally owned cache (e.g. with the tenant store).
    pub fn with_cache(mut self, cache: Arc<QueryCache>) -> Self {
        self.cache = cache;
        self
    }

    /// The cache backing this client.
    pub fn cache(&self) -> Arc<QueryCache> {
        Arc::clone(&self.cache)
    }

    pub(crate) fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.options.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub(crate) fn tasks_url(&self, tenant: &TenantId) -> String {
        self.url(&format!("tenants/{tenant}/tasks"))
    }

    pub(crate) fn task_url(&self, tenant: &TenantId, id: &str) -> String {
        self.url(&format!("tenants/{tenant}/tasks/{id}"))
    }

    /// Tenants the authenticated user belongs to.
    pub async fn tenants(&self) -> Result<Vec<Tenant>> {
        let tenants = self
            .http
            .get(self.url("tenants"))
            .send()
            .await?
            .json::<Vec<Tenant>>()
            .await?;
        Ok(tenants)
    }
}
