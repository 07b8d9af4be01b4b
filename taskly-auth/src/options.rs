// Authentication options and configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use taskly_core::config::TasklyConfigSnapshot;

/// How the initial handshake engages the identity provider.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SsoMode {
    /// Silently adopt an existing provider session, never prompting the
    /// user (`prompt=none` on the authorization request).
    CheckSso,
    /// Force an interactive login.
    LoginRequired,
}

impl Default for SsoMode {
    fn default() -> Self {
        Self::CheckSso
    }
}

/// Identity-provider connection settings. Fixed for the process lifetime.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthOptions {
    /// Base URL of the provider, without the realm path.
    pub endpoint: String,
    /// Realm the application lives in.
    pub realm: String,
    /// Application (client) id registered with the provider.
    pub client_id: String,
    /// Application origin; logout redirects the session here.
    pub origin: String,
}

impl AuthOptions {
    /// Read options from the config snapshot, falling back to the fixed
    /// test defaults for any missing key.
    pub fn from_config(config: &TasklyConfigSnapshot) -> Self {
        Self {
            endpoint: config
                .get_string("auth.endpoint")
                .unwrap_or_else(|| "http://localhost:8080".to_string()),
            realm: config
                .get_string("auth.realm")
                .unwrap_or_else(|| "taskly".to_string()),
            client_id: config
                .get_string("auth.client_id")
                .unwrap_or_else(|| "taskly-web".to_string()),
            origin: config
                .get_string("app.origin")
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
        }
    }

    /// Validate the connection settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.trim().is_empty() {
            return Err("auth endpoint must not be empty".to_string());
        }
        if self.realm.trim().is_empty() {
            return Err("auth realm must not be empty".to_string());
        }
        if self.client_id.trim().is_empty() {
            return Err("auth client id must not be empty".to_string());
        }
        if self.origin.trim().is_empty() {
            return Err("application origin must not be empty".to_string());
        }
        Ok(())
    }
}

/// Options for the first initialization call. Later calls ignore them.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InitOptions {
    /// Handshake mode. PKCE with S256 is always applied.
    #[serde(default)]
    pub mode: SsoMode,
    /// Redirect target for the silent-check callback leg; defaults to the
    /// application origin when absent.
    #[serde(default)]
    pub redirect_uri: Option<String>,
    /// How long to wait for the provider before giving up.
    #[serde(default, with = "humantime_serde::option")]
    pub timeout: Option<Duration>,
}
