//! Client error types

use thiserror::Error;

use crate::ui::Navigation;

/// Errors surfaced by [`ApiClient`](crate::ApiClient) calls.
///
/// The display text of each variant is the user-facing message the frontend
/// shows for that condition, so notifications and rejected calls carry the
/// same wording.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No stored credential for a protected path
    #[error("请先登录")]
    MissingToken,

    /// Server answered 401; the stored credential has been cleared
    #[error("登录过期，请重新登录")]
    SessionExpired,

    /// Server answered with a non-401 error status
    #[error("{status_text}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Canonical status text, e.g. "Not Found"
        status_text: String,
    },

    /// Request was dispatched but no response came back (connect failure,
    /// timeout)
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// Response arrived but its body did not deserialize into the requested
    /// type
    #[error("invalid response body: {0}")]
    Decode(#[source] reqwest::Error),

    /// Client was misconfigured
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Map an error response status to a variant. 401 is the session-expiry
    /// signal; everything else keeps its status text.
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            Self::SessionExpired
        } else {
            Self::Status {
                status: status.as_u16(),
                status_text: status
                    .canonical_reason()
                    .map_or_else(|| status.to_string(), str::to_owned),
            }
        }
    }

    /// Whether this error means the session is gone and the user has to log
    /// in again.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }

    /// Navigation the UI performs in reaction to this error, if any.
    pub fn navigation(&self) -> Option<Navigation> {
        match self {
            Self::MissingToken | Self::SessionExpired => Some(Navigation::Login),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn unauthorized_becomes_session_expired() {
        let error = ClientError::from_status(StatusCode::UNAUTHORIZED);
        assert!(error.is_session_expired());
        assert_eq!(error.to_string(), "登录过期，请重新登录");
        assert_eq!(error.navigation(), Some(Navigation::Login));
    }

    #[test]
    fn other_statuses_keep_their_text() {
        let error = ClientError::from_status(StatusCode::NOT_FOUND);
        assert_eq!(error.to_string(), "Not Found");
        assert!(matches!(error, ClientError::Status { status: 404, .. }));
        assert_eq!(error.navigation(), None);
    }

    #[test]
    fn missing_token_navigates_to_login() {
        assert_eq!(ClientError::MissingToken.navigation(), Some(Navigation::Login));
        assert_eq!(ClientError::MissingToken.to_string(), "请先登录");
    }
}
