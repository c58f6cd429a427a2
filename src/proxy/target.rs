//! Target URL assembly.
//!
//! The path below the mount is relayed byte for byte: no
//! percent-decoding, no re-encoding, no segment normalization. The
//! origin sees exactly what the client sent.

use crate::proxy::MOUNT;

/// Slice of the request path below [`MOUNT`], without its leading
/// slash. `/gw` and `/gw/` both map to the empty path.
#[must_use]
pub fn forward_path(request_path: &str) -> &str {
    let rest = request_path.strip_prefix(MOUNT).unwrap_or("");
    rest.strip_prefix('/').unwrap_or(rest)
}

/// `origin_base + "/" + forward_path`, with the raw query string
/// reattached when present. A bare trailing `?` counts as no query.
#[must_use]
pub fn target_url(origin_base: &str, forward_path: &str, query: Option<&str>) -> String {
    match query {
        Some(query) if !query.is_empty() => format!("{origin_base}/{forward_path}?{query}"),
        _ => format!("{origin_base}/{forward_path}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mount_root_maps_to_empty_path() {
        assert_eq!(forward_path("/gw"), "");
        assert_eq!(forward_path("/gw/"), "");
    }

    #[test]
    fn strips_mount_prefix() {
        assert_eq!(forward_path("/gw/users"), "users");
        assert_eq!(forward_path("/gw/api/v1/items"), "api/v1/items");
    }

    #[test]
    fn preserves_trailing_slash() {
        assert_eq!(forward_path("/gw/users/"), "users/");
    }

    #[test]
    fn preserves_percent_encoding() {
        assert_eq!(forward_path("/gw/files/a%20b%2Fc"), "files/a%20b%2Fc");
    }

    #[test]
    fn preserves_inner_double_slashes() {
        assert_eq!(forward_path("/gw//users"), "/users");
        assert_eq!(forward_path("/gw/a//b"), "a//b");
    }

    #[test]
    fn joins_base_and_path() {
        assert_eq!(
            target_url("http://localhost:8080", "users", None),
            "http://localhost:8080/users"
        );
        assert_eq!(
            target_url("https://api.internal/v1", "", None),
            "https://api.internal/v1/"
        );
    }

    #[test]
    fn reattaches_query_verbatim() {
        assert_eq!(
            target_url("http://localhost:8080", "search", Some("q=a%20b&page=2")),
            "http://localhost:8080/search?q=a%20b&page=2"
        );
    }

    #[test]
    fn drops_bare_question_mark() {
        assert_eq!(
            target_url("http://localhost:8080", "search", Some("")),
            "http://localhost:8080/search"
        );
    }
}
