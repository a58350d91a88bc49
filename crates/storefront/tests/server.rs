//! Integration tests for the Storefront server: real listener, real HTTP.
//!
//! The server runs on a [`ManualClock`], so "wait two minutes" is a call to
//! `clock.advance` instead of a sleep.

use std::time::Duration;

use axum_extra::extract::cookie::Cookie;
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use storefront::prelude::*;

// =========================================================================
// Helpers
// =========================================================================

struct TestServer {
    base: String,
    clock: ManualClock,
    sessions: SharedSessions,
    client: reqwest::Client,
}

/// Starts a server on a random port with a manual clock.
async fn start_server() -> TestServer {
    start_server_with(SessionConfig::default()).await
}

async fn start_server_with(config: SessionConfig) -> TestServer {
    let clock = ManualClock::starting_now();
    let server = StorefrontServerBuilder::new()
        .bind("127.0.0.1:0")
        .session_config(config)
        .build_with_clock(clock.clone())
        .await
        .expect("server should build");

    let addr = server.local_addr().expect("should have local addr");
    let sessions = server.sessions().clone();

    tokio::spawn(async move {
        let _ = server.run().await;
    });

    TestServer {
        base: format!("http://{addr}{}", storefront::API_PREFIX),
        clock,
        sessions,
        client: reqwest::Client::new(),
    }
}

impl TestServer {
    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base)
    }

    async fn post_credentials(
        &self,
        path: &str,
        email: &str,
        password: &str,
    ) -> reqwest::Response {
        let body = JsonCodec
            .encode(&Credentials::new(email, password))
            .expect("should encode");
        self.client
            .post(self.url(path))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .expect("request should complete")
    }

    async fn sign_up(&self, email: &str, password: &str) -> reqwest::Response {
        self.post_credentials("signUp", email, password).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> reqwest::Response {
        self.post_credentials("signIn", email, password).await
    }

    /// Signs up and in, returning the session token.
    async fn session_for(&self, email: &str, password: &str) -> String {
        self.sign_up(email, password).await;
        let resp = self.sign_in(email, password).await;
        assert_eq!(resp.status(), StatusCode::OK);
        session_cookie(&resp).value().to_string()
    }

    async fn products(&self, token: Option<&str>) -> reqwest::Response {
        let mut req = self.client.get(self.url("products"));
        if let Some(token) = token {
            req = req.header(COOKIE, format!("session_token={token}"));
        }
        req.send().await.expect("request should complete")
    }

    async fn logout(&self, token: Option<&str>) -> reqwest::Response {
        let mut req = self.client.post(self.url("logout"));
        if let Some(token) = token {
            req = req.header(COOKIE, format!("session_token={token}"));
        }
        req.send().await.expect("request should complete")
    }
}

/// Parses the `session_token` Set-Cookie from a response.
fn session_cookie(resp: &reqwest::Response) -> Cookie<'static> {
    resp.headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|s| Cookie::parse(s.to_string()).ok())
        .find(|c| c.name() == "session_token")
        .expect("response should set session_token")
}

// =========================================================================
// signUp
// =========================================================================

#[tokio::test]
async fn test_sign_up_new_user_returns_ok_with_confirmation() {
    let server = start_server().await;

    let resp = server.sign_up("alice@example.com", "pw1").await;

    assert_eq!(resp.status(), StatusCode::OK);
    let text = resp.text().await.unwrap();
    assert!(text.contains("alice@example.com"), "got {text:?}");
}

#[tokio::test]
async fn test_sign_up_duplicate_returns_conflict() {
    let server = start_server().await;
    server.sign_up("alice@example.com", "pw1").await;

    let resp = server.sign_up("alice@example.com", "other").await;

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(
        resp.text().await.unwrap(),
        "sorry, but user with the same email already exists"
    );
    // The original password still works.
    let resp = server.sign_in("alice@example.com", "pw1").await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_sign_up_malformed_body_returns_bad_request() {
    let server = start_server().await;

    let resp = server
        .client
        .post(server.url("signUp"))
        .body("not json")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// =========================================================================
// signIn
// =========================================================================

#[tokio::test]
async fn test_sign_in_sets_cookie_expiring_in_two_minutes() {
    let server = start_server().await;
    server.sign_up("alice@example.com", "pw1").await;

    let resp = server.sign_in("alice@example.com", "pw1").await;

    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = session_cookie(&resp);
    assert_eq!(cookie.value().len(), 32);
    assert_eq!(cookie.http_only(), Some(true));

    let expires = cookie.expires_datetime().expect("cookie has Expires");
    let expected = server.clock.now() + Duration::from_secs(120);
    let drift = (expires - expected).abs();
    assert!(
        drift <= time::Duration::seconds(1),
        "expires {expires} not within 1s of {expected}"
    );
}

#[tokio::test]
async fn test_sign_in_wrong_password_returns_unauthorized() {
    let server = start_server().await;
    server.sign_up("alice@example.com", "pw1").await;

    let resp = server.sign_in("alice@example.com", "wrong").await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().get(SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_sign_in_unknown_user_returns_unauthorized() {
    let server = start_server().await;

    let resp = server.sign_in("ghost@example.com", "pw").await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_sign_in_malformed_body_returns_bad_request() {
    let server = start_server().await;

    let resp = server
        .client
        .post(server.url("signIn"))
        .header(CONTENT_TYPE, "application/json")
        .body(r#"{"email":"alice@example.com"}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_sign_in_twice_issues_distinct_live_tokens() {
    let server = start_server().await;
    server.sign_up("alice@example.com", "pw1").await;

    let first = session_cookie(&server.sign_in("alice@example.com", "pw1").await);
    let second = session_cookie(&server.sign_in("alice@example.com", "pw1").await);

    assert_ne!(first.value(), second.value());
    assert_eq!(server.products(Some(first.value())).await.status(), StatusCode::OK);
    assert_eq!(server.products(Some(second.value())).await.status(), StatusCode::OK);
}

// =========================================================================
// products
// =========================================================================

#[tokio::test]
async fn test_products_with_session_returns_catalog() {
    let server = start_server().await;
    let token = server.session_for("alice@example.com", "pw1").await;

    let resp = server.products(Some(&token)).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.text().await.unwrap(),
        "Products: [{Kayak 279} {Life-Jacket 49.95} {Soccer Ball 19.5} \
         {Hockey stick 34.95} {Hockey puck 12}]"
    );
}

#[tokio::test]
async fn test_products_without_cookie_returns_unauthorized() {
    let server = start_server().await;

    let resp = server.products(None).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_products_unknown_token_returns_unauthorized() {
    let server = start_server().await;

    let resp = server.products(Some("0123456789abcdef0123456789abcdef")).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_products_unreadable_cookie_returns_bad_request() {
    let server = start_server().await;

    let resp = server
        .client
        .get(server.url("products"))
        .header(
            COOKIE,
            reqwest::header::HeaderValue::from_bytes(b"session_token=\xff")
                .unwrap(),
        )
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_products_just_before_expiry_still_ok() {
    let server = start_server().await;
    let token = server.session_for("alice@example.com", "pw1").await;

    server.clock.advance(Duration::from_secs(119));

    assert_eq!(server.products(Some(&token)).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_products_after_expiry_rejects_and_evicts() {
    let server = start_server().await;
    let token = server.session_for("alice@example.com", "pw1").await;
    assert_eq!(server.sessions.lock().await.len(), 1);

    server.clock.advance(Duration::from_secs(121));
    let resp = server.products(Some(&token)).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(
        server.sessions.lock().await.get(&token).is_none(),
        "expired session should be gone from the store"
    );
}

// =========================================================================
// logout
// =========================================================================

#[tokio::test]
async fn test_logout_clears_cookie_and_ends_session() {
    let server = start_server().await;
    let token = server.session_for("alice@example.com", "pw1").await;

    let resp = server.logout(Some(&token)).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let cleared = session_cookie(&resp);
    assert_eq!(cleared.value(), "");
    assert_eq!(cleared.max_age(), Some(time::Duration::ZERO));

    assert_eq!(
        server.products(Some(&token)).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn test_logout_unknown_token_still_clears_cookie() {
    let server = start_server().await;

    let resp = server.logout(Some("not-a-session")).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(session_cookie(&resp).value(), "");
}

#[tokio::test]
async fn test_logout_without_cookie_returns_unauthorized() {
    let server = start_server().await;

    let resp = server.logout(None).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(session_cookie(&resp).value(), "");
}

#[tokio::test]
async fn test_logout_get_is_method_not_allowed() {
    let server = start_server().await;

    let resp = server.client.get(server.url("logout")).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// =========================================================================
// Full scenario
// =========================================================================

#[tokio::test]
async fn test_full_scenario_register_sign_in_expire_logout() {
    let server = start_server().await;

    // 1. Register, then register again.
    assert_eq!(
        server.sign_up("alice@example.com", "pw1").await.status(),
        StatusCode::OK
    );
    assert_eq!(
        server.sign_up("alice@example.com", "pw1").await.status(),
        StatusCode::CONFLICT
    );

    // 2. Sign in and browse.
    let resp = server.sign_in("alice@example.com", "pw1").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let token = session_cookie(&resp).value().to_string();
    assert_eq!(server.products(Some(&token)).await.status(), StatusCode::OK);

    // 3. Two minutes and a second later the session is gone.
    server.clock.advance(Duration::from_secs(121));
    assert_eq!(
        server.products(Some(&token)).await.status(),
        StatusCode::UNAUTHORIZED
    );
    assert!(server.sessions.lock().await.is_empty());

    // 4. Fresh session, log out, and it no longer works.
    let resp = server.sign_in("alice@example.com", "pw1").await;
    let fresh = session_cookie(&resp).value().to_string();
    assert_eq!(server.products(Some(&fresh)).await.status(), StatusCode::OK);

    let resp = server.logout(Some(&fresh)).await;
    assert_eq!(session_cookie(&resp).value(), "");
    assert_eq!(
        server.products(Some(&fresh)).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

// =========================================================================
// Sweeper
// =========================================================================

#[tokio::test]
async fn test_sweeper_reclaims_abandoned_sessions() {
    let server = start_server_with(SessionConfig {
        sweep_interval: Some(Duration::from_millis(20)),
        ..SessionConfig::default()
    })
    .await;
    server.session_for("alice@example.com", "pw1").await;
    assert_eq!(server.sessions.lock().await.len(), 1);

    server.clock.advance(Duration::from_secs(121));
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert!(
        server.sessions.lock().await.is_empty(),
        "sweeper should evict without any lookup"
    );
}

// =========================================================================
// Builder validation
// =========================================================================

async fn build_error(config: SessionConfig) -> Option<StorefrontError> {
    StorefrontServerBuilder::new()
        .bind("127.0.0.1:0")
        .session_config(config)
        .build_with_clock(ManualClock::starting_now())
        .await
        .err()
}

#[tokio::test]
async fn test_build_zero_sweep_interval_returns_session_error() {
    let err = build_error(SessionConfig {
        sweep_interval: Some(Duration::ZERO),
        ..SessionConfig::default()
    })
    .await;

    assert!(
        matches!(err, Some(StorefrontError::Session(_))),
        "got {err:?}"
    );
}

#[tokio::test]
async fn test_build_ttl_beyond_max_returns_session_error() {
    let err = build_error(SessionConfig {
        ttl: Duration::from_secs(u64::MAX),
        ..SessionConfig::default()
    })
    .await;

    assert!(
        matches!(err, Some(StorefrontError::Session(_))),
        "got {err:?}"
    );
}
