//! Google OAuth2 client
//!
//! Builds the consent-screen URL and exchanges authorization codes at the token endpoint

use std::sync::Arc;

use reqwest::Client;

use crate::model::config::Config;

use super::error::OAuthError;
use super::types::{TokenExchangeRequest, TokenExchangeResponse};

const GRANT_TYPE_AUTHORIZATION_CODE: &str = "authorization_code";

/// OAuth2 authorization code client for a single provider
pub struct GoogleOAuthClient {
    client: Client,
    config: Arc<Config>,
}

impl GoogleOAuthClient {
    pub fn new(client: Client, config: Arc<Config>) -> Self {
        Self { client, config }
    }

    /// Consent-screen URL with every query value percent-encoded
    pub fn authorization_url(&self) -> String {
        let scope = self.config.scope_param();
        let params = [
            ("client_id", self.config.client_id.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("response_type", "code"),
            ("scope", scope.as_str()),
            ("access_type", "offline"),
            ("prompt", "consent"),
        ];

        let query = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        let endpoint = &self.config.authorization_endpoint;
        let separator = if endpoint.contains('?') { '&' } else { '?' };
        format!("{}{}{}", endpoint, separator, query)
    }

    /// Exchange an authorization code for tokens
    ///
    /// Exactly one POST is made; codes are single-use so nothing is retried.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenExchangeResponse, OAuthError> {
        let form = TokenExchangeRequest {
            grant_type: GRANT_TYPE_AUTHORIZATION_CODE,
            code,
            client_id: &self.config.client_id,
            client_secret: &self.config.client_secret,
            redirect_uri: &self.config.redirect_uri,
        };

        let response = self
            .client
            .post(&self.config.token_endpoint)
            .header("Accept", "application/json")
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OAuthError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<TokenExchangeResponse>().await.map_err(|e| {
            if e.is_decode() {
                OAuthError::InternalError(format!("Invalid token response: {}", e))
            } else {
                OAuthError::UpstreamTransport(e)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use reqwest::Url;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(config: Config) -> GoogleOAuthClient {
        let http = Client::builder().no_proxy().build().unwrap();
        GoogleOAuthClient::new(http, Arc::new(config))
    }

    fn test_config(token_endpoint: String) -> Config {
        Config {
            client_id: "test-client.apps.googleusercontent.com".to_string(),
            client_secret: "test-secret".to_string(),
            token_endpoint,
            ..Default::default()
        }
    }

    #[test]
    fn test_authorization_url_round_trips_config() {
        let config = Config {
            client_id: "id with spaces&symbols=1".to_string(),
            redirect_uri: "https://app.example.com/auth/callback?x=1".to_string(),
            scopes: vec!["openid".to_string(), "email".to_string(), "profile".to_string()],
            ..Default::default()
        };
        let url = Url::parse(&client_for(config).authorization_url()).unwrap();

        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("accounts.google.com"));
        assert_eq!(url.path(), "/o/oauth2/v2/auth");

        let query: HashMap<String, String> = url.query_pairs().into_owned().collect();
        assert_eq!(query.len(), 6);
        assert_eq!(query["client_id"], "id with spaces&symbols=1");
        assert_eq!(query["redirect_uri"], "https://app.example.com/auth/callback?x=1");
        assert_eq!(query["response_type"], "code");
        assert_eq!(query["scope"], "openid email profile");
        assert_eq!(query["access_type"], "offline");
        assert_eq!(query["prompt"], "consent");
    }

    #[test]
    fn test_authorization_url_with_empty_client_id() {
        let url = client_for(Config::default()).authorization_url();
        assert!(url.contains("client_id=&"));
    }

    #[test]
    fn test_authorization_url_respects_existing_query() {
        let config = Config {
            authorization_endpoint: "https://idp.example.com/auth?tenant=a".to_string(),
            ..Default::default()
        };
        let url = Url::parse(&client_for(config).authorization_url()).unwrap();
        let query: HashMap<String, String> = url.query_pairs().into_owned().collect();
        assert_eq!(query["tenant"], "a");
        assert_eq!(query["response_type"], "code");
    }

    #[tokio::test]
    async fn test_exchange_code_posts_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("grant_type=authorization_code"))
            .and(body_string_contains("code=ABC123"))
            .and(body_string_contains("client_secret=test-secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "ya29.token",
                "id_token": "XYZ",
                "token_type": "Bearer"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(test_config(format!("{}/token", server.uri())));
        let tokens = client.exchange_code("ABC123").await.unwrap();
        assert_eq!(tokens.id_token(), Some("XYZ"));
    }

    #[tokio::test]
    async fn test_exchange_code_upstream_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string(r#"{"error":"invalid_grant"}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(test_config(format!("{}/token", server.uri())));
        match client.exchange_code("used-code").await {
            Err(OAuthError::UpstreamStatus { status, body }) => {
                assert_eq!(status, 400);
                assert!(body.contains("invalid_grant"));
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_exchange_code_invalid_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = client_for(test_config(format!("{}/token", server.uri())));
        let err = client.exchange_code("ABC123").await.err().unwrap();
        assert!(matches!(err, OAuthError::InternalError(_)));
    }

    #[tokio::test]
    async fn test_exchange_code_unreachable_endpoint() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = client_for(test_config(format!("http://127.0.0.1:{}/token", port)));
        let err = client.exchange_code("ABC123").await.err().unwrap();
        assert!(matches!(err, OAuthError::UpstreamTransport(_)));
    }
}
