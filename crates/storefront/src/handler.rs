//! Route table and request handlers.
//!
//! Each handler is a thin translation between HTTP and the session layer:
//!   1. Decode the body or find the cookie
//!   2. Call the credential store or the gate
//!   3. Map the outcome to a status code, body, and `Set-Cookie`

use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum_extra::extract::CookieJar;
use storefront_protocol::{Codec, Credentials, catalog, render_catalog};
use storefront_session::Clock;

use crate::cookies;
use crate::server::ServerState;
use crate::ApiError;

/// Every route lives under this prefix.
pub const API_PREFIX: &str = "/api/v1";

type AppState<C> = State<Arc<ServerState<C>>>;

/// Builds the router over shared server state.
pub(crate) fn router<C: Clock>(state: Arc<ServerState<C>>) -> Router {
    Router::new()
        .route(&format!("{API_PREFIX}/signUp"), post(sign_up::<C>))
        .route(&format!("{API_PREFIX}/signIn"), post(sign_in::<C>))
        .route(&format!("{API_PREFIX}/products"), get(products::<C>))
        .route(&format!("{API_PREFIX}/logout"), post(logout::<C>))
        .with_state(state)
}

// ── Sign up ────────────────────────────────────────────────────────

async fn sign_up<C: Clock>(
    State(state): AppState<C>,
    body: Bytes,
) -> Result<String, ApiError> {
    let creds: Credentials = state.codec.decode(&body)?;
    let identity = creds.identity();

    state
        .credentials
        .lock()
        .await
        .register(identity.clone(), creds.password)?;

    Ok(format!(
        "user with email {identity} was successfully registered, please sign in"
    ))
}

// ── Sign in ────────────────────────────────────────────────────────

async fn sign_in<C: Clock>(
    State(state): AppState<C>,
    body: Bytes,
) -> Result<(CookieJar, StatusCode), ApiError> {
    let creds: Credentials = state.codec.decode(&body)?;
    let identity = creds.identity();

    let verified = state
        .credentials
        .lock()
        .await
        .verify(&identity, &creds.password);
    if !verified {
        tracing::debug!(%identity, "sign-in rejected: bad credentials");
        return Err(ApiError::Unauthenticated);
    }

    let session = state.gate.open(identity).await?;
    let cookie = cookies::session_cookie(
        &state.gate.config().cookie_name,
        &session.token,
        session.expires_at,
    );

    Ok((CookieJar::new().add(cookie), StatusCode::OK))
}

// ── Products ───────────────────────────────────────────────────────

async fn products<C: Clock>(
    State(state): AppState<C>,
    headers: HeaderMap,
) -> Result<String, ApiError> {
    let cookie = cookies::session_token(&headers, &state.gate.config().cookie_name);
    let owner = state.gate.authenticate(cookie).await?;

    let listing = render_catalog(catalog())?;
    tracing::debug!(%owner, "served product listing");
    Ok(listing)
}

// ── Logout ─────────────────────────────────────────────────────────

/// Always answers with a clearing cookie, even when the request is
/// rejected for a missing or unreadable cookie.
async fn logout<C: Clock>(
    State(state): AppState<C>,
    headers: HeaderMap,
) -> (CookieJar, Result<StatusCode, ApiError>) {
    let name = &state.gate.config().cookie_name;
    let cookie = cookies::session_token(&headers, name);

    let outcome = state
        .gate
        .logout(cookie)
        .await
        .map(|()| StatusCode::OK)
        .map_err(ApiError::from);

    let clear = cookies::clear_session_cookie(name, state.gate.clock().now());
    (CookieJar::new().add(clear), outcome)
}
