//! OAuth login router
//!
//! Defines the three routes of the authorization code flow

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tower_http::trace::TraceLayer;

use super::error::OAuthError;
use super::handler::OAuthWebHandler;
use super::types::{CallbackParams, ID_TOKEN_COOKIE, IdTokenResponse, LoginStatusResponse};

/// OAuth state for handlers
#[derive(Clone)]
pub struct OAuthState {
    pub handler: Arc<OAuthWebHandler>,
}

/// Create OAuth router
///
/// # Endpoints
/// - `GET /login` - Redirect to the provider consent screen
/// - `GET /auth/callback` - Exchange the authorization code and set the identity cookie
/// - `GET /id_token` - Echo the identity cookie, or redirect to `/login`
pub fn create_oauth_router(handler: Arc<OAuthWebHandler>) -> Router {
    let state = OAuthState { handler };

    Router::new()
        .route("/login", get(handle_login))
        .route("/auth/callback", get(handle_callback))
        .route("/id_token", get(handle_id_token))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handle login (GET /login)
async fn handle_login(State(state): State<OAuthState>) -> Redirect {
    Redirect::temporary(&state.handler.login_url())
}

/// Handle provider redirect (GET /auth/callback)
async fn handle_callback(
    State(state): State<OAuthState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<LoginStatusResponse>), OAuthError> {
    let Query(pairs) = query.map_err(|e| OAuthError::invalid_query(e.body_text()))?;
    let params = CallbackParams::from_pairs(pairs);
    let id_token = state.handler.complete_login(&params).await?;

    // Session cookie: no Max-Age/Expires
    let cookie = Cookie::build((ID_TOKEN_COOKIE, id_token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.handler.cookie_secure())
        .build();

    Ok((jar.add(cookie), Json(LoginStatusResponse::logged_in())))
}

/// Handle token read (GET /id_token)
async fn handle_id_token(jar: CookieJar) -> Response {
    match jar
        .get(ID_TOKEN_COOKIE)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
    {
        Some(id_token) => Json(IdTokenResponse {
            id_token: id_token.to_string(),
        })
        .into_response(),
        None => Redirect::temporary("/login").into_response(),
    }
}
