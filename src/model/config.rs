use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::arg::Args;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TlsBackend {
    #[default]
    Rustls,
    NativeTls,
}

/// Login service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// OAuth client ID issued by the provider
    #[serde(default)]
    pub client_id: String,

    /// OAuth client secret (never logged in full)
    #[serde(default)]
    pub client_secret: String,

    /// Must match the redirect URI registered with the provider exactly
    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,

    /// Requested scopes, space-joined on the wire
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,

    #[serde(default = "default_authorization_endpoint")]
    pub authorization_endpoint: String,

    #[serde(default = "default_token_endpoint")]
    pub token_endpoint: String,

    /// Marks the identity cookie `Secure`. Only disable for plain-HTTP local development.
    #[serde(default = "default_cookie_secure")]
    pub cookie_secure: bool,

    /// Timeout for the token exchange call (None = no explicit timeout)
    #[serde(default)]
    pub token_timeout_secs: Option<u64>,

    #[serde(default)]
    pub tls_backend: TlsBackend,

    /// HTTP proxy URL (optional)
    /// Supported formats: http://host:port, https://host:port, socks5://host:port
    #[serde(default)]
    pub proxy_url: Option<String>,

    /// Proxy authentication username (optional)
    #[serde(default)]
    pub proxy_username: Option<String>,

    /// Proxy authentication password (optional)
    #[serde(default)]
    pub proxy_password: Option<String>,

    /// Config file path (runtime metadata, not read from JSON)
    #[serde(skip)]
    pub(crate) config_path: Option<PathBuf>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_redirect_uri() -> String {
    "http://localhost:8000/auth/callback".to_string()
}

fn default_scopes() -> Vec<String> {
    vec!["openid".to_string(), "email".to_string()]
}

fn default_authorization_endpoint() -> String {
    "https://accounts.google.com/o/oauth2/v2/auth".to_string()
}

fn default_token_endpoint() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

fn default_cookie_secure() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: default_redirect_uri(),
            scopes: default_scopes(),
            authorization_endpoint: default_authorization_endpoint(),
            token_endpoint: default_token_endpoint(),
            cookie_secure: default_cookie_secure(),
            token_timeout_secs: None,
            tls_backend: TlsBackend::default(),
            proxy_url: None,
            proxy_username: None,
            proxy_password: None,
            config_path: None,
        }
    }
}

impl Config {
    /// Get default config file path
    pub fn default_config_path() -> &'static str {
        "config.json"
    }

    /// Load configuration from file, falling back to defaults when it doesn't exist
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            let mut config = Self::default();
            config.config_path = Some(path.to_path_buf());
            return Ok(config);
        }

        let content = fs::read_to_string(path)?;
        let mut config: Config = serde_json::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Apply command line / environment overrides on top of the file values
    pub fn with_args(mut self, args: &Args) -> Self {
        if let Some(host) = &args.host {
            self.host = host.clone();
        }
        if let Some(port) = args.port {
            self.port = port;
        }
        if let Some(client_id) = &args.client_id {
            self.client_id = client_id.clone();
        }
        if let Some(client_secret) = &args.client_secret {
            self.client_secret = client_secret.clone();
        }
        if let Some(redirect_uri) = &args.redirect_uri {
            self.redirect_uri = redirect_uri.clone();
        }
        self
    }

    /// Get config file path (if available)
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Scopes as transmitted to the provider
    pub fn scope_param(&self) -> String {
        self.scopes.join(" ")
    }

    /// Client secret redacted for logging; only its length is shown
    pub fn masked_client_secret(&self) -> String {
        format!("***({} chars)", self.client_secret.chars().count())
    }
}
