//! Client configuration

use std::time::Duration;

/// Paths reachable without a stored credential.
pub const DEFAULT_PUBLIC_PATHS: [&str; 2] = ["/api/user/login", "/api/user/register"];

/// Per-request timeout applied to every call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(9_000);

/// Environment variable consulted for the API base URL on native builds.
pub const BASE_URL_ENV: &str = "API_BASE_URL";

/// Process-wide client configuration, fixed at construction.
///
/// Per-call adjustments go through
/// [`RequestOverrides`](crate::client::RequestOverrides) instead of mutating
/// this.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Prefix for every request path, without a trailing slash.
    pub base_url: String,
    /// Upper bound on a single attempt. No retry happens after it fires.
    pub timeout: Duration,
    /// Send cookies with cross-origin requests (browser targets only).
    pub include_credentials: bool,
    /// Substrings marking a path as callable without a credential.
    pub public_paths: Vec<String>,
    /// Whether a request on a protected path still goes out when no
    /// credential is stored. The original frontend dispatched anyway and
    /// let the server reject; set to `false` to fail locally instead.
    pub dispatch_without_token: bool,
}

impl ClientConfig {
    /// Configuration with the frontend's defaults for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            include_credentials: true,
            public_paths: DEFAULT_PUBLIC_PATHS.iter().map(|p| (*p).to_string()).collect(),
            dispatch_without_token: true,
        }
    }

    /// Whether `path` may be called without a stored credential.
    ///
    /// Substring match, mirroring how the login and registration endpoints
    /// were special-cased upstream.
    pub fn is_public_path(&self, path: &str) -> bool {
        self.public_paths.iter().any(|p| path.contains(p.as_str()))
    }
}

/// Base URL when none was configured explicitly: the `API_BASE_URL`
/// environment variable natively, the window origin in the browser.
pub(crate) fn discover_base_url() -> Option<String> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::env::var(BASE_URL_ENV).ok()
    }
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window().and_then(|w| w.location().origin().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = ClientConfig::new("http://localhost:8080/");
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn defaults_match_the_frontend() {
        let config = ClientConfig::new("http://localhost");
        assert_eq!(config.timeout, Duration::from_millis(9_000));
        assert!(config.include_credentials);
        assert!(config.dispatch_without_token);
    }

    #[test]
    fn auth_endpoints_are_public() {
        let config = ClientConfig::new("http://localhost");
        assert!(config.is_public_path("/api/user/login"));
        assert!(config.is_public_path("/api/user/register"));
        assert!(config.is_public_path("/api/user/login?next=home"));
        assert!(!config.is_public_path("/api/user/profile"));
    }
}
