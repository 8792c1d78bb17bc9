//! OAuth login types

use serde::{Deserialize, Serialize};

/// Name of the cookie carrying the raw identity token
pub const ID_TOKEN_COOKIE: &str = "id_token";

/// Query parameters the provider appends when redirecting back to us
///
/// Google also sends `scope`, `authuser` and `prompt`; those are ignored.
#[derive(Debug, Default)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
}

impl CallbackParams {
    /// Collect from raw query pairs; a repeated key keeps its last value
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        pairs
            .into_iter()
            .fold(Self::default(), |mut params, (key, value)| {
                match key.as_str() {
                    "code" => params.code = Some(value),
                    "error" => params.error = Some(value),
                    _ => {}
                }
                params
            })
    }
}

/// Authorization code grant body, form-encoded for the token endpoint
#[derive(Debug, Serialize)]
pub struct TokenExchangeRequest<'a> {
    pub grant_type: &'static str,
    pub code: &'a str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub redirect_uri: &'a str,
}

/// Token endpoint response
///
/// Only `id_token` is kept; access and refresh tokens are discarded.
#[derive(Debug, Default, Deserialize)]
pub struct TokenExchangeResponse {
    #[serde(default)]
    pub id_token: Option<String>,
}

impl TokenExchangeResponse {
    /// The identity token, if present and non-empty
    pub fn id_token(&self) -> Option<&str> {
        self.id_token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Callback success body
#[derive(Debug, Serialize)]
pub struct LoginStatusResponse {
    pub status: &'static str,
}

impl LoginStatusResponse {
    pub fn logged_in() -> Self {
        Self { status: "logged_in" }
    }
}

/// Token reader body
#[derive(Debug, Serialize)]
pub struct IdTokenResponse {
    pub id_token: String,
}

/// Error envelope returned by every failing handler
#[derive(Debug, Serialize)]
pub struct OAuthErrorResponse {
    pub error: OAuthErrorBody,
}

#[derive(Debug, Serialize)]
pub struct OAuthErrorBody {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
}

impl OAuthErrorResponse {
    pub fn new(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: OAuthErrorBody {
                error_type: error_type.into(),
                message: message.into(),
            },
        }
    }
}
