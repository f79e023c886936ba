// Session token transport
// Decision: Transports are an ordered strategy list, not nested
// conditionals, so adding a channel never touches the gate logic

use axum::http::{header::AUTHORIZATION, request::Parts};
use axum_extra::extract::CookieJar;

/// Name of the session cookie
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

type TokenSource = fn(&Parts) -> Option<String>;

/// Transport channels in priority order: cookie first, then bearer header.
const TOKEN_SOURCES: &[TokenSource] = &[token_from_cookie, token_from_bearer];

/// Recover a candidate token string from an inbound request.
///
/// Returns the first token any channel yields; a malformed channel counts
/// as absent so the caller reports missing credentials uniformly.
pub fn extract_token(parts: &Parts) -> Option<String> {
    TOKEN_SOURCES.iter().find_map(|source| source(parts))
}

fn token_from_cookie(parts: &Parts) -> Option<String> {
    let jar = CookieJar::from_headers(&parts.headers);
    jar.get(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

fn token_from_bearer(parts: &Parts) -> Option<String> {
    let header = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    // Exactly `Bearer <token>`: case-sensitive scheme, single space separator
    let token = header.strip_prefix("Bearer ")?;
    if token.is_empty() || token.contains(' ') {
        return None;
    }
    Some(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_headers(headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri("/");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_no_credentials() {
        let parts = parts_with_headers(&[]);
        assert_eq!(extract_token(&parts), None);
    }

    #[test]
    fn test_bearer_header() {
        let parts = parts_with_headers(&[("authorization", "Bearer abc123")]);
        assert_eq!(extract_token(&parts), Some("abc123".to_string()));
    }

    #[test]
    fn test_malformed_bearer_treated_as_absent() {
        for value in [
            "bearer abc123",     // lowercase scheme
            "BEARER abc123",     // uppercase scheme
            "Bearer",            // no token
            "Bearer ",           // empty token
            "Bearer abc 123",    // embedded space
            "Basic dXNlcjpwdw==", // different scheme
            "abc123",            // bare token
        ] {
            let parts = parts_with_headers(&[("authorization", value)]);
            assert_eq!(extract_token(&parts), None, "accepted {value:?}");
        }
    }

    #[test]
    fn test_cookie() {
        let parts = parts_with_headers(&[("cookie", "access_token=tok-from-cookie")]);
        assert_eq!(extract_token(&parts), Some("tok-from-cookie".to_string()));
    }

    #[test]
    fn test_cookie_wins_over_header() {
        let parts = parts_with_headers(&[
            ("cookie", "access_token=tok-from-cookie"),
            ("authorization", "Bearer tok-from-header"),
        ]);
        assert_eq!(extract_token(&parts), Some("tok-from-cookie".to_string()));
    }

    #[test]
    fn test_unrelated_cookie_falls_through_to_header() {
        let parts = parts_with_headers(&[
            ("cookie", "theme=dark"),
            ("authorization", "Bearer tok-from-header"),
        ]);
        assert_eq!(extract_token(&parts), Some("tok-from-header".to_string()));
    }
}
