//! Tower middleware applied ahead of routing.
//!
//! [`bearer_from_cookie`] bridges cookie sessions to the origin's
//! bearer-token auth: when a `token` cookie is present, the request
//! gains an `Authorization: Bearer <token>` header before any handler
//! runs. A pre-existing `Authorization` header is replaced.

use axum::extract::Request;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;

/// Cookie holding the session token.
pub const SESSION_COOKIE: &str = "token";

pub async fn bearer_from_cookie(mut request: Request, next: Next) -> Response {
    if let Some(token) = session_token(request.headers()) {
        let bearer = format!("Bearer {token}");
        if let Ok(value) = HeaderValue::from_str(&bearer) {
            request.headers_mut().insert(AUTHORIZATION, value);
        }
    }
    next.run(request).await
}

/// First non-empty `token` cookie value across all `Cookie` headers.
fn session_token(headers: &HeaderMap) -> Option<String> {
    headers.get_all(COOKIE).iter().find_map(|header| {
        let raw = header.to_str().ok()?;
        raw.split(';').find_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            if name.trim() != SESSION_COOKIE {
                return None;
            }
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, cookie.parse().unwrap());
        headers
    }

    #[test]
    fn extracts_token_cookie() {
        assert_eq!(session_token(&headers("token=abc123")).as_deref(), Some("abc123"));
    }

    #[test]
    fn extracts_token_among_other_cookies() {
        let h = headers("theme=dark; token=abc123; lang=en");
        assert_eq!(session_token(&h).as_deref(), Some("abc123"));
    }

    #[test]
    fn ignores_cookies_with_similar_names() {
        assert_eq!(session_token(&headers("token2=x; csrf_token=y")), None);
    }

    #[test]
    fn ignores_empty_token() {
        assert_eq!(session_token(&headers("token=")), None);
        assert_eq!(session_token(&headers("token=; theme=dark")), None);
    }

    #[test]
    fn no_cookie_header() {
        assert_eq!(session_token(&HeaderMap::new()), None);
    }

    #[test]
    fn searches_every_cookie_header() {
        let mut h = headers("theme=dark");
        h.append(COOKIE, "token=abc123".parse().unwrap());
        assert_eq!(session_token(&h).as_deref(), Some("abc123"));
    }
}
