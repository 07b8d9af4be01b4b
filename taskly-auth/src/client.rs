//! Identity-provider client seam and the OIDC implementation.

use std::borrow::Cow;

use anyhow::Result;
use async_trait::async_trait;
use oauth2::basic::BasicClient;
use oauth2::reqwest::async_http_client;
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, CsrfToken, PkceCodeChallenge, PkceCodeVerifier,
    RedirectUrl, Scope, TokenResponse, TokenUrl,
};

use crate::options::{AuthOptions, InitOptions, SsoMode};

/// The identity provider as seen by the session wrapper.
///
/// The concrete SDK is an external collaborator: the session only needs
/// the handshake outcome and an end-session redirect, so those are the
/// whole contract.
#[async_trait]
pub trait IdentityClient: Send + Sync {
    /// Run the initial handshake. `Ok(true)` means an existing provider
    /// session was adopted; errors propagate unmodified and are never
    /// retried here.
    async fn check_sso(&self, options: &InitOptions) -> Result<bool>;

    /// Terminate the provider session, redirecting to `origin`.
    async fn end_session(&self, origin: &str) -> Result<()>;
}

/// OIDC client against a realm-scoped provider (Keycloak-style endpoint
/// layout). Authorization requests always carry a PKCE S256 challenge.
pub struct OidcClient {
    options: AuthOptions,
    client: BasicClient,
    http: reqwest::Client,
}

impl OidcClient {
    pub fn new(options: AuthOptions) -> Result<Self> {
        options.validate().map_err(|e| anyhow::anyhow!(e))?;

        let realm_base = format!(
            "{}/realms/{}/protocol/openid-connect",
            options.endpoint.trim_end_matches('/'),
            options.realm
        );
        let client = BasicClient::new(
            ClientId::new(options.client_id.clone()),
            None,
            AuthUrl::new(format!("{realm_base}/auth"))?,
            Some(TokenUrl::new(format!("{realm_base}/token"))?),
        )
        .set_redirect_uri(RedirectUrl::new(options.origin.clone())?);

        // The silent check inspects the provider's redirect instead of
        // following it.
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            options,
            client,
            http,
        })
    }

    /// Authorization URL for the handshake, with a fresh PKCE challenge.
    ///
    /// `init.redirect_uri` overrides the application-origin redirect when
    /// present. Returns the verifier so a callback leg can complete the
    /// code exchange.
    pub fn authorize_url(&self, init: &InitOptions) -> Result<(String, PkceCodeVerifier)> {
        let (challenge, verifier) = PkceCodeChallenge::new_random_sha256();
        let redirect = match &init.redirect_uri {
            Some(uri) => Some(RedirectUrl::new(uri.clone())?),
            None => None,
        };
        let mut request = self
            .client
            .authorize_url(CsrfToken::new_random)
            .set_pkce_challenge(challenge)
            .add_scope(Scope::new("openid".to_string()));
        if init.mode == SsoMode::CheckSso {
            request = request.add_extra_param("prompt", "none");
        }
        if let Some(redirect) = &redirect {
            request = request.set_redirect_uri(Cow::Borrowed(redirect));
        }
        let (url, _csrf) = request.url();
        Ok((url.to_string(), verifier))
    }

    /// Exchange a callback authorization code for an access token.
    pub async fn exchange_code(&self, code: &str, verifier: PkceCodeVerifier) -> Result<String> {
        let token = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_pkce_verifier(verifier)
            .request_async(async_http_client)
            .await?;
        Ok(token.access_token().secret().to_string())
    }

    fn end_session_url(&self, origin: &str) -> String {
        format!(
            "{}/realms/{}/protocol/openid-connect/logout?client_id={}&post_logout_redirect_uri={}",
            self.options.endpoint.trim_end_matches('/'),
            self.options.realm,
            self.options.client_id,
            origin
        )
    }
}

#[async_trait]
impl IdentityClient for OidcClient {
    async fn check_sso(&self, options: &InitOptions) -> Result<bool> {
        let (url, _verifier) = self.authorize_url(options)?;
        let mut request = self.http.get(&url);
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }
        let response = request.send().await?;

        // The provider answers the silent check with a redirect carrying
        // either `code=` (session exists) or `error=login_required`.
        let location = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok());
        match location {
            Some(target) => Ok(target.contains("code=") && !target.contains("error=")),
            None => Ok(false),
        }
    }

    async fn end_session(&self, origin: &str) -> Result<()> {
        self.http
            .get(self.end_session_url(origin))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
