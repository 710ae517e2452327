//! API utilities for talking to the host application's endpoints
//!
//! Endpoints are configured by the embedding application. They are either
//! absolute URLs or paths, optionally prefixed with a configured API base.

/// Build a full API URL from an optional base and an endpoint
///
/// # Arguments
/// * `base` - API base like "https://intake.example.com", `None` keeps the path relative to the page
/// * `endpoint` - Absolute URL or path (usually starting with "/api/")
///
/// # Example
/// ```ignore
/// let url = api_url(Some("https://intake.example.com/"), "/api/creative-direction/upload");
/// assert_eq!(url, "https://intake.example.com/api/creative-direction/upload");
/// ```
pub fn api_url(base: Option<&str>, endpoint: &str) -> String {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        return endpoint.to_string();
    }
    match base.map(str::trim).filter(|b| !b.is_empty()) {
        Some(base) => format!(
            "{}/{}",
            base.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        ),
        None => endpoint.to_string(),
    }
}

/// Extract a readable error from a failed response body
///
/// Endpoints answer failures with `{"error": "..."}`; anything else falls
/// back to `fallback`.
pub fn error_from_body(body: &str, fallback: String) -> String {
    serde_json::from_str::<contracts::usecases::u508_creative_direction::ErrorResponse>(body)
        .ok()
        .map(|e| e.error)
        .filter(|e| !e.trim().is_empty())
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_without_base() {
        assert_eq!(
            api_url(None, "/api/creative-direction/upload"),
            "/api/creative-direction/upload"
        );
        assert_eq!(api_url(Some("  "), "/api/x"), "/api/x");
    }

    #[test]
    fn test_base_joined_once() {
        assert_eq!(
            api_url(Some("https://intake.example.com/"), "/api/x"),
            "https://intake.example.com/api/x"
        );
        assert_eq!(
            api_url(Some("https://intake.example.com"), "api/x"),
            "https://intake.example.com/api/x"
        );
    }

    #[test]
    fn test_absolute_endpoint_kept() {
        assert_eq!(
            api_url(Some("https://a.example.com"), "https://b.example.com/upload"),
            "https://b.example.com/upload"
        );
    }

    #[test]
    fn test_error_from_body() {
        assert_eq!(
            error_from_body(r#"{"error":"Bucket unavailable"}"#, "fallback".into()),
            "Bucket unavailable"
        );
        assert_eq!(error_from_body("<html>502</html>", "HTTP 502".into()), "HTTP 502");
        assert_eq!(error_from_body(r#"{"error":""}"#, "HTTP 500".into()), "HTTP 500");
    }
}
