//! OAuth login handler
//!
//! Validates provider callbacks and drives the code exchange

use std::sync::Arc;

use reqwest::Client;

use crate::model::config::Config;

use super::error::OAuthError;
use super::google::GoogleOAuthClient;
use super::types::CallbackParams;

/// Shared login handler, one per process
pub struct OAuthWebHandler {
    config: Arc<Config>,
    google: GoogleOAuthClient,
}

impl OAuthWebHandler {
    pub fn new(config: Arc<Config>, client: Client) -> Self {
        let google = GoogleOAuthClient::new(client, config.clone());
        Self { config, google }
    }

    /// Consent-screen URL for `/login`
    pub fn login_url(&self) -> String {
        self.google.authorization_url()
    }

    /// Whether the identity cookie is marked `Secure`
    pub fn cookie_secure(&self) -> bool {
        self.config.cookie_secure
    }

    /// Handle the provider redirect and return the identity token
    ///
    /// Both parameter checks run before any network call.
    pub async fn complete_login(&self, params: &CallbackParams) -> Result<String, OAuthError> {
        if let Some(error) = params.error.as_deref().filter(|e| !e.is_empty()) {
            tracing::warn!("OAuth callback: provider returned error: {}", error);
            return Err(OAuthError::provider_error(error));
        }

        let code = match params.code.as_deref() {
            Some(code) if !code.is_empty() => code,
            _ => {
                tracing::warn!("OAuth callback: missing code");
                return Err(OAuthError::missing_code());
            }
        };

        let tokens = self.google.exchange_code(code).await.inspect_err(|e| {
            tracing::error!("OAuth callback: token exchange failed: {}", e);
        })?;

        match tokens.id_token() {
            Some(id_token) => {
                tracing::info!("OAuth callback: login successful");
                Ok(id_token.to_string())
            }
            None => {
                tracing::error!("OAuth callback: token response has no id_token");
                Err(OAuthError::missing_id_token())
            }
        }
    }
}
