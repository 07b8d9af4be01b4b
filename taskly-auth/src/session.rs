//! The session-scoped authentication wrapper.
//!
//! Framework remounts may invoke [`AuthSession::init`] any number of
//! times; only the first call reaches the identity provider. Every later
//! call resolves with the last observed authentication status without
//! re-running the handshake.

use std::sync::{Arc, RwLock};

use anyhow::Result;
use tracing::debug;

use crate::client::IdentityClient;
use crate::options::{AuthOptions, InitOptions};

#[derive(Debug, Clone, Default)]
struct SessionState {
    initialized: bool,
    authenticated: Option<bool>,
}

/// Owner of the single identity client for this session.
///
/// Constructed once by the application and shared via `Arc`; there is no
/// process-global instance.
pub struct AuthSession {
    options: AuthOptions,
    client: Arc<dyn IdentityClient>,
    state: RwLock<SessionState>,
}

impl AuthSession {
    pub fn new(options: AuthOptions, client: Arc<dyn IdentityClient>) -> Self {
        Self {
            options,
            client,
            state: RwLock::new(SessionState::default()),
        }
    }

    /// The shared identity client.
    pub fn client(&self) -> Arc<dyn IdentityClient> {
        Arc::clone(&self.client)
    }

    pub fn options(&self) -> &AuthOptions {
        &self.options
    }

    /// Run the provider handshake at most once.
    ///
    /// The first call flips the initialized flag before the handshake
    /// settles, then delegates to the client; handshake failures propagate
    /// unmodified and leave the authentication status unknown. Any later
    /// call returns the current status (`false` while unknown) without
    /// touching the provider.
    pub async fn init(&self, options: InitOptions) -> Result<bool> {
        {
            let mut state = self.state.write().unwrap();
            if state.initialized {
                debug!("auth session already initialized, skipping handshake");
                return Ok(state.authenticated.unwrap_or(false));
            }
            state.initialized = true;
        }

        let authenticated = self.client.check_sso(&options).await?;
        self.state.write().unwrap().authenticated = Some(authenticated);
        Ok(authenticated)
    }

    /// End the provider session, redirecting to the application origin.
    pub async fn logout(&self) -> Result<()> {
        self.client.end_session(&self.options.origin).await?;
        self.state.write().unwrap().authenticated = Some(false);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.state.read().unwrap().initialized
    }

    /// `false` until a handshake has observed an authenticated session.
    pub fn is_authenticated(&self) -> bool {
        self.state.read().unwrap().authenticated.unwrap_or(false)
    }
}
