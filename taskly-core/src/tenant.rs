//! Core multi-tenant types for Taskly.

use serde::{Deserialize, Serialize};

/// A tenant identifier.
///
/// Opaque to the client; the server decides what it looks like.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(pub String);

impl TenantId {
    /// Convenience constructor from a string.
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TenantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A tenant the authenticated user belongs to.
///
/// `slug` is the externally visible routing key (the URL subdomain) and
/// is unique within a user's tenant list. `id` is the identity used for
/// all API scoping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: TenantId,
    pub name: String,
    pub slug: String,
    pub plan: String,
    pub user_role: String,
}

/// Derive the candidate tenant slug from a request hostname.
///
/// Splits on `.`; with more than two labels the first label is the
/// subdomain and therefore the slug. A bare domain or `localhost` carries
/// no tenant context and yields `None`.
///
/// ```rust
/// use taskly_core::resolve_tenant_slug;
///
/// assert_eq!(resolve_tenant_slug("acme.tasks.example.com"), Some("acme"));
/// assert_eq!(resolve_tenant_slug("example.com"), None);
/// assert_eq!(resolve_tenant_slug("localhost"), None);
/// ```
pub fn resolve_tenant_slug(hostname: &str) -> Option<&str> {
    let mut labels = hostname.split('.');
    let first = labels.next()?;
    if labels.count() >= 2 {
        Some(first)
    } else {
        None
    }
}
