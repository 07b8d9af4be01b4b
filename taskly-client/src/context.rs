//! Session-scoped tenant context.
//!
//! The tenant list exists only after authentication. The current tenant
//! is picked by URL subdomain, falling back to the first entry; switching
//! tenants drops the prior tenant's cached reads so nothing stale is ever
//! served as current data.

use std::sync::{Arc, RwLock};

use anyhow::Result;
use taskly_auth::AuthSession;
use taskly_core::{resolve_tenant_slug, Tenant};
use thiserror::Error;
use tracing::{debug, warn};

use crate::api::TaskApi;
use crate::cache::QueryCache;

/// Raised when tenant context is read where none is in scope. Consumers
/// must see this instead of silently receiving an absent value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("tenant context accessed before it finished loading")]
    Loading,
    #[error("no tenant is selected for this session")]
    NoCurrentTenant,
}

#[derive(Debug, Clone)]
struct TenantState {
    loading: bool,
    tenants: Vec<Tenant>,
    current: Option<Tenant>,
}

impl Default for TenantState {
    fn default() -> Self {
        Self {
            loading: true,
            tenants: Vec::new(),
            current: None,
        }
    }
}

/// Read-only view of the store for consumers that render state.
#[derive(Debug, Clone, PartialEq)]
pub struct TenantSnapshot {
    pub loading: bool,
    pub tenants: Vec<Tenant>,
    pub current: Option<Tenant>,
}

/// Session-wide tenant state: the user's tenant list and the currently
/// selected tenant, shared with the task client through the cache.
pub struct TenantStore {
    state: RwLock<TenantState>,
    cache: Arc<QueryCache>,
}

impl TenantStore {
    pub fn new(cache: Arc<QueryCache>) -> Self {
        Self {
            state: RwLock::new(TenantState::default()),
            cache,
        }
    }

    /// Populate the store once authentication has settled.
    ///
    /// Unauthenticated sessions end with an empty list. A failed tenant
    /// fetch keeps the last-known list and is logged only; either way
    /// loading completes.
    pub async fn load(&self, session: &AuthSession, api: &TaskApi, hostname: &str) {
        if !session.is_authenticated() {
            self.state.write().unwrap().loading = false;
            return;
        }

        match api.tenants().await {
            Ok(tenants) => {
                let current = select_current(&tenants, resolve_tenant_slug(hostname));
                let mut state = self.state.write().unwrap();
                state.tenants = tenants;
                state.current = current;
                state.loading = false;
            }
            Err(err) => {
                warn!(error = %err, "failed to load tenant list");
                self.state.write().unwrap().loading = false;
            }
        }
    }

    /// Select an already-loaded tenant by slug.
    ///
    /// An unknown slug is a caller bug, not a runtime fault: it is logged
    /// at debug and ignored. A real switch invalidates everything cached
    /// for the prior tenant.
    pub fn switch_tenant(&self, slug: &str) {
        let previous = {
            let mut state = self.state.write().unwrap();
            let Some(next) = state.tenants.iter().find(|t| t.slug == slug).cloned() else {
                debug!(slug, "ignoring switch to unknown tenant slug");
                return;
            };
            let next_id = next.id.clone();
            state
                .current
                .replace(next)
                .filter(|previous| previous.id != next_id)
        };

        if let Some(previous) = previous {
            self.cache.invalidate_tenant(&previous.id);
        }
    }

    /// The selected tenant. Fails fast when no tenant context is in
    /// scope.
    pub fn current_tenant(&self) -> Result<Tenant> {
        let state = self.state.read().unwrap();
        if state.loading {
            return Err(ContextError::Loading.into());
        }
        state
            .current
            .clone()
            .ok_or_else(|| ContextError::NoCurrentTenant.into())
    }

    pub fn snapshot(&self) -> TenantSnapshot {
        let state = self.state.read().unwrap();
        TenantSnapshot {
            loading: state.loading,
            tenants: state.tenants.clone(),
            current: state.current.clone(),
        }
    }

    /// Forget the session's tenant context (logout).
    pub fn clear(&self) {
        let previous = {
            let mut state = self.state.write().unwrap();
            state.tenants.clear();
            state.loading = false;
            state.current.take()
        };
        if let Some(previous) = previous {
            self.cache.invalidate_tenant(&previous.id);
        }
    }

    #[cfg(test)]
    fn install(&self, tenants: Vec<Tenant>, current: Option<Tenant>) {
        let mut state = self.state.write().unwrap();
        state.tenants = tenants;
        state.current = current;
        state.loading = false;
    }
}

/// Slug match first, then the first loaded tenant.
fn select_current(tenants: &[Tenant], slug: Option<&str>) -> Option<Tenant> {
    slug.and_then(|s| tenants.iter().find(|t| t.slug == s))
        .or_else(|| tenants.first())
        .cloned()
}
