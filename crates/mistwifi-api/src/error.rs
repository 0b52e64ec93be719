use thiserror::Error;

/// Top-level error type for the `mistwifi-api` crate.
///
/// Covers every failure mode of a stats request: credential encoding,
/// transport, HTTP status, and response decoding. `mistwifi-core` maps
/// these into its collection taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The token cannot be carried in an HTTP header (control characters, etc.)
    #[error("Invalid auth token: {message}")]
    InvalidToken { message: String },

    /// Mist Cloud rejected the token (HTTP 403).
    #[error("Mist Cloud responded with 403 [Forbidden], verify your auth token")]
    Forbidden,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The base URL cannot have path segments appended (e.g. `mailto:`).
    #[error("Invalid base URL: {url}")]
    InvalidBaseUrl { url: String },

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Response ────────────────────────────────────────────────────
    /// Any status other than 200 or 403.
    #[error("Mist Cloud responded with unexpected status code {status}")]
    UnexpectedStatus { status: u16 },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Unable to decode Mist response: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the request timed out before a response arrived.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    /// Returns `true` if this is a transient error worth retrying on a later tick.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::UnexpectedStatus { status } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}
