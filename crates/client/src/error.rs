use serde::Deserialize;
use std::fmt;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// HTTP statuses the assessment service documents, each with its own kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseErrorKind {
    /// 400: invalid parameters.
    InvalidInvocation,
    /// 429: too many requests or too many concurrent assessments.
    RateLimited,
    /// 500: internal error on the service side.
    InternalError,
    /// 503: service not available, e.g. during maintenance.
    ServiceUnavailable,
    /// 529: service overloaded.
    ServiceOverloaded,
}

impl ResponseErrorKind {
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            400 => Some(ResponseErrorKind::InvalidInvocation),
            429 => Some(ResponseErrorKind::RateLimited),
            500 => Some(ResponseErrorKind::InternalError),
            503 => Some(ResponseErrorKind::ServiceUnavailable),
            529 => Some(ResponseErrorKind::ServiceOverloaded),
            _ => None,
        }
    }

    pub fn status(self) -> u16 {
        match self {
            ResponseErrorKind::InvalidInvocation => 400,
            ResponseErrorKind::RateLimited => 429,
            ResponseErrorKind::InternalError => 500,
            ResponseErrorKind::ServiceUnavailable => 503,
            ResponseErrorKind::ServiceOverloaded => 529,
        }
    }

    /// Kinds where trying again later can succeed.
    pub fn is_transient(self) -> bool {
        matches!(
            self,
            ResponseErrorKind::RateLimited
                | ResponseErrorKind::ServiceUnavailable
                | ResponseErrorKind::ServiceOverloaded
        )
    }
}

impl fmt::Display for ResponseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResponseErrorKind::InvalidInvocation => "invalid invocation",
            ResponseErrorKind::RateLimited => "rate limited",
            ResponseErrorKind::InternalError => "internal error",
            ResponseErrorKind::ServiceUnavailable => "service unavailable",
            ResponseErrorKind::ServiceOverloaded => "service overloaded",
        };
        write!(f, "{} ({})", name, self.status())
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// The service answered with one of its documented error statuses.
    #[error("{kind}: {reason}")]
    Response {
        kind: ResponseErrorKind,
        reason: String,
        /// `errors[].message` from the response body, if it had that shape.
        messages: Vec<String>,
    },

    /// Non-2xx status the service does not document.
    #[error("HTTP status {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("analyze must be run to completion before the host may be accessed")]
    NoHost,
}

impl Error {
    pub fn kind(&self) -> Option<ResponseErrorKind> {
        match self {
            Error::Response { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Response { kind, .. } => Some(kind.status()),
            Error::Status { status, .. } => Some(*status),
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether a caller-side retry may help. Nothing in this crate retries.
    pub fn is_retryable(&self) -> bool {
        self.kind().map(ResponseErrorKind::is_transient).unwrap_or(false)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Deserialize)]
struct ErrorEntry {
    field: Option<String>,
    message: Option<String>,
}

fn error_messages(body: &str) -> Vec<String> {
    let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) else {
        return Vec::new();
    };
    parsed
        .errors
        .into_iter()
        .filter_map(|e| match (e.field, e.message) {
            (Some(field), Some(msg)) => Some(format!("{}: {}", field, msg)),
            (None, Some(msg)) => Some(msg),
            _ => None,
        })
        .collect()
}

/// Classify a non-2xx response. Documented statuses become
/// [`Error::Response`], anything else is passed through as [`Error::Status`].
pub fn map_status(status: u16, reason: &str, body: &str) -> Error {
    match ResponseErrorKind::from_status(status) {
        Some(kind) => {
            tracing::warn!(status, %kind, "assessment service returned an error");
            Error::Response { kind, reason: reason.to_string(), messages: error_messages(body) }
        }
        None => Error::Status { status, reason: reason.to_string() },
    }
}
