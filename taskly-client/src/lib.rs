//! taskly-client: tenant context and the tenant-scoped task API.
//!
//! The flow mirrors the application lifecycle: the auth session settles,
//! [`TenantStore`] loads the user's tenants and picks one from the URL
//! subdomain, then reads and writes go through [`TaskApi`] keyed by
//! `(resource, tenant)` so the cache layer can dedupe and invalidate.

pub mod api;
pub mod cache;
pub mod context;
pub mod mutations;
pub mod queries;

pub use api::{ClientOptions, TaskApi};
pub use cache::QueryCache;
pub use context::{ContextError, TenantSnapshot, TenantStore};
