//! taskly-core: framework-agnostic core for Taskly.
//!
//! Everything here is plain data and pure logic: the tenant and task
//! models, subdomain resolution, cache key construction, the two API
//! failure encodings, and the string-keyed configuration store. HTTP and
//! session plumbing live in the `taskly-auth` and `taskly-client` crates.

pub mod config;
pub mod errors;
pub mod keys;
pub mod task;
pub mod tenant;

pub use config::{TasklyConfig, TasklyConfigSnapshot};
pub use errors::{
    failure_from_bytes, format_failure, ApiBody, ApiError, ApiFailure, CreateBody, FailureDetail,
    FieldIssue, MessageFailure, ValidationFailure, FALLBACK_MESSAGE,
};
pub use keys::QueryKey;
pub use task::{Task, TaskCreate, TaskPatch};
pub use tenant::{resolve_tenant_slug, Tenant, TenantId};
