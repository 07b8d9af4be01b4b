//! taskly-auth: the shared authentication session for Taskly.
//!
//! One identity client exists per session lifetime, wrapped by
//! [`AuthSession`] which guarantees the provider handshake runs at most
//! once no matter how many times initialization is invoked.

pub mod client;
pub mod options;
pub mod session;

pub use client::{IdentityClient, OidcClient};
pub use options::{AuthOptions, InitOptions, SsoMode};
pub use session::AuthSession;
