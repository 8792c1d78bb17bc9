use clap::Parser;

/// Google OAuth2 authorization code login service
#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Listen host (overrides config file)
    #[arg(long)]
    pub host: Option<String>,

    /// Listen port (overrides config file)
    #[arg(long)]
    pub port: Option<u16>,

    /// OAuth client ID
    #[arg(long, env = "GOOGLE_CLIENT_ID")]
    pub client_id: Option<String>,

    /// OAuth client secret
    #[arg(long, env = "GOOGLE_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Redirect URI registered with the provider
    #[arg(long, env = "GOOGLE_REDIRECT_URI")]
    pub redirect_uri: Option<String>,
}
