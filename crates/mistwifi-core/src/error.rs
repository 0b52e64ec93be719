// ── Collection error types ──
//
// The taxonomy hosts see when initializing or running a collection tick.
// The `From<mistwifi_api::Error>` impl folds transport-layer errors into
// these variants; nothing here is retried.

use thiserror::Error;

use crate::accumulator::AccumulatorError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CollectError {
    // ── Initialization ───────────────────────────────────────────────
    #[error("invalid configuration: {field} {reason}")]
    Configuration { field: &'static str, reason: String },

    // ── Response status ──────────────────────────────────────────────
    #[error("Mist Cloud responded with 403 [Forbidden], verify your auth token")]
    Authorization,

    #[error("Mist Cloud responded with unexpected status code {status}")]
    UnexpectedStatus { status: u16 },

    // ── Transport / data ─────────────────────────────────────────────
    #[error("request to Mist Cloud failed: {0}")]
    Transport(#[source] mistwifi_api::Error),

    #[error("Unable to decode Mist response: {message}")]
    Decode { message: String },

    // ── Sink ─────────────────────────────────────────────────────────
    #[error("accumulator rejected metric: {0}")]
    Accumulator(#[from] AccumulatorError),
}

impl CollectError {
    /// Returns `true` if the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    /// Returns `true` if a later tick may succeed without config changes.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_transient(),
            Self::UnexpectedStatus { status } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    pub(crate) fn missing(field: &'static str) -> Self {
        Self::Configuration {
            field,
            reason: "must be set to a non-empty value".into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<mistwifi_api::Error> for CollectError {
    fn from(err: mistwifi_api::Error) -> Self {
        use mistwifi_api::Error as Api;

        match err {
            Api::Forbidden => Self::Authorization,
            Api::UnexpectedStatus { status } => Self::UnexpectedStatus { status },
            Api::Deserialization { message, .. } => Self::Decode { message },
            Api::InvalidToken { message } => Self::Configuration {
                field: "auth_token",
                reason: message,
            },
            Api::InvalidBaseUrl { url } => Self::Configuration {
                field: "base_url",
                reason: format!("cannot be used as a base URL: {url}"),
            },
            Api::Tls(reason) => Self::Configuration {
                field: "ca_cert",
                reason,
            },
            err @ Api::Transport(_) => Self::Transport(err),
        }
    }
}
