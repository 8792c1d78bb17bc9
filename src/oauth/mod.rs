//! OAuth Web Login Module
//!
//! Authorization code flow against Google:
//! - `/login` redirects to the consent screen
//! - `/auth/callback` exchanges the code and stores the identity token in a cookie
//! - `/id_token` reads the identity token back
//!
//! No `state` parameter is generated or checked, so the callback is open to
//! login CSRF. Tokens are not verified.

mod error;
mod google;
mod handler;
mod router;
mod types;

pub use handler::OAuthWebHandler;
pub use router::create_oauth_router;
