//! Reading and writing the session cookie.

use axum::http::{HeaderMap, header};
use axum_extra::extract::cookie::Cookie;
use storefront_session::CookieToken;
use time::{Duration, OffsetDateTime};

/// Finds the cookie named `name` in the request's `Cookie` headers.
///
/// Every header is split with [`Cookie::split_parse`]. The first cookie
/// with a matching name wins, even if other pairs in the header are broken.
/// The value is returned as sent, minus one pair of surrounding double
/// quotes if both are present.
///
/// The lookup is [`CookieToken::Malformed`] when a header isn't visible
/// ASCII, or when no cookie matched and some pair couldn't be parsed.
pub(crate) fn session_token<'a>(headers: &'a HeaderMap, name: &str) -> CookieToken<'a> {
    let mut unparsable = false;

    for value in headers.get_all(header::COOKIE) {
        let Ok(raw) = value.to_str() else {
            return CookieToken::Malformed("cookie header is not valid text");
        };
        for parsed in Cookie::split_parse(raw) {
            let cookie = match parsed {
                Ok(cookie) => cookie,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unparsable cookie pair");
                    unparsable = true;
                    continue;
                }
            };
            if cookie.name() != name {
                continue;
            }
            return match cookie.value_raw() {
                Some(value) => CookieToken::Present(unquote(value)),
                None => CookieToken::Malformed("cookie value is not borrowed from the header"),
            };
        }
    }

    if unparsable {
        CookieToken::Malformed("cookie header has an unparsable pair")
    } else {
        CookieToken::Missing
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// The cookie handed out on sign-in. Expires together with the session.
pub(crate) fn session_cookie(
    name: &str,
    token: &str,
    expires_at: OffsetDateTime,
) -> Cookie<'static> {
    Cookie::build((name.to_string(), token.to_string()))
        .path("/")
        .http_only(true)
        .expires(expires_at)
        .build()
}

/// An already-expired cookie that makes the browser drop the session cookie.
pub(crate) fn clear_session_cookie(name: &str, now: OffsetDateTime) -> Cookie<'static> {
    Cookie::build((name.to_string(), String::new()))
        .path("/")
        .expires(now)
        .max_age(Duration::ZERO)
        .build()
}
