mod http_client;
mod model;
mod oauth;

use std::sync::Arc;

use clap::Parser;
use model::arg::Args;
use model::config::Config;

#[tokio::main]
async fn main() {
    // Parse command line arguments (client credentials may also come from the environment)
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| Config::default_config_path().to_string());
    let config = Config::load(&config_path)
        .unwrap_or_else(|e| {
            tracing::error!("Failed to load config: {}", e);
            std::process::exit(1);
        })
        .with_args(&args);
    if let Some(path) = config.config_path().filter(|p| p.exists()) {
        tracing::info!("Loaded config file: {}", path.display());
    }

    if config.client_id.trim().is_empty() {
        tracing::warn!("clientId not set (GOOGLE_CLIENT_ID), consent URLs will be rejected by the provider");
    }
    if config.client_secret.is_empty() {
        tracing::warn!("clientSecret not set (GOOGLE_CLIENT_SECRET), token exchange will fail");
    }
    if !config.cookie_secure {
        tracing::warn!("cookieSecure is false, id_token cookie will be sent over plain HTTP");
    }
    tracing::warn!("OAuth state parameter is not used, callback has no CSRF protection");

    let proxy_config = http_client::ProxyConfig::from_config(&config);
    if let Some(proxy) = &proxy_config {
        tracing::info!("HTTP proxy configured: {}", proxy.url);
    }

    let client = http_client::build_client(
        proxy_config.as_ref(),
        config.token_timeout_secs,
        config.tls_backend,
    )
    .unwrap_or_else(|e| {
        tracing::error!("Failed to create HTTP client: {}", e);
        std::process::exit(1);
    });

    let config = Arc::new(config);
    let oauth_handler = Arc::new(oauth::OAuthWebHandler::new(config.clone(), client));
    let app = oauth::create_oauth_router(oauth_handler);

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting OAuth login endpoint: {}", addr);
    tracing::info!("Client ID: {}", config.client_id);
    tracing::info!("Client Secret: {}", config.masked_client_secret());
    tracing::info!("Redirect URI: {}", config.redirect_uri);
    match config.token_timeout_secs {
        Some(secs) => tracing::info!("Token exchange timeout: {}s", secs),
        None => tracing::info!("Token exchange timeout: none"),
    }
    tracing::info!("Available routes:");
    tracing::info!("  GET  /login");
    tracing::info!("  GET  /auth/callback");
    tracing::info!("  GET  /id_token");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        });
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
