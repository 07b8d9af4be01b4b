//! Cache keys for tenant-scoped reads.

use crate::tenant::TenantId;

/// Composite cache key: resource kind + owning tenant (+ item id).
///
/// Two reads of the same resource for the same tenant must collapse to
/// the same key so the cache layer can dedupe and invalidate correctly.
/// Keys are the sole isolation mechanism between tenants on the client:
/// a switch drops every key scoped to the old tenant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// The tenant's task collection.
    TaskList { tenant: TenantId },
    /// A single task within the tenant's collection.
    Task { tenant: TenantId, id: String },
}

impl QueryKey {
    pub fn task_list(tenant: &TenantId) -> Self {
        Self::TaskList {
            tenant: tenant.clone(),
        }
    }

    pub fn task(tenant: &TenantId, id: impl Into<String>) -> Self {
        Self::Task {
            tenant: tenant.clone(),
            id: id.into(),
        }
    }

    /// The tenant this key is scoped to.
    pub fn tenant(&self) -> &TenantId {
        match self {
            Self::TaskList { tenant } | Self::Task { tenant, .. } => tenant,
        }
    }

    /// Semantic tag, mirroring the resource naming used on the wire.
    pub fn tag(&self) -> String {
        match self {
            Self::TaskList { .. } => "list-tasks".to_string(),
            Self::Task { id, .. } => format!("list-task-{id}"),
        }
    }
}
