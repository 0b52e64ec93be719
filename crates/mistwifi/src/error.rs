//! CLI error types with miette diagnostics.
//!
//! Maps `CollectError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use mistwifi_core::{AccumulatorError, CollectError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const CONFIG: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────
    #[error("Invalid {field}: {reason}")]
    #[diagnostic(
        code(mistwifi::invalid_config),
        help(
            "Set {field} in the config file (or MISTWIFI_<FIELD> in the environment),\n\
             or pass the matching command-line flag.\n\
             Run: mistwifi sample-config"
        )
    )]
    Validation { field: String, reason: String },

    #[error("Failed to load configuration")]
    #[diagnostic(code(mistwifi::config_file))]
    ConfigFile(#[source] Box<figment::Error>),

    // ── Mist Cloud ───────────────────────────────────────────────────
    #[error("Mist Cloud rejected the auth token (HTTP 403)")]
    #[diagnostic(
        code(mistwifi::auth_failed),
        help(
            "Verify your auth token and org ID.\n\
             Tokens are managed at https://api.mist.com/api/v1/self/apitokens"
        )
    )]
    AuthFailed,

    #[error("Mist Cloud responded with unexpected status code {status}")]
    #[diagnostic(code(mistwifi::unexpected_status))]
    UnexpectedStatus { status: u16 },

    #[error("Could not reach Mist Cloud")]
    #[diagnostic(
        code(mistwifi::connection_failed),
        help("Check network access to the API host, or override it with --base-url.")
    )]
    ConnectionFailed {
        #[source]
        source: CollectError,
    },

    #[error("Request to Mist Cloud timed out")]
    #[diagnostic(
        code(mistwifi::timeout),
        help("Raise http_timeout in the config file or pass --timeout 10s.")
    )]
    Timeout,

    #[error("Unable to decode Mist response: {message}")]
    #[diagnostic(code(mistwifi::decode))]
    Decode { message: String },

    // ── Output ───────────────────────────────────────────────────────
    #[error("Failed to write metrics")]
    #[diagnostic(code(mistwifi::output))]
    Output(#[source] AccumulatorError),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation { .. } | Self::ConfigFile(_) => exit_code::CONFIG,
            Self::AuthFailed => exit_code::AUTH,
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::UnexpectedStatus { .. } | Self::Decode { .. } | Self::Output(_) => {
                exit_code::GENERAL
            }
        }
    }
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::ConfigFile(Box::new(err))
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Output(AccumulatorError::Io(err))
    }
}

impl From<CollectError> for CliError {
    fn from(err: CollectError) -> Self {
        match err {
            CollectError::Configuration { field, reason } => Self::Validation {
                field: field.into(),
                reason,
            },
            CollectError::Authorization => Self::AuthFailed,
            CollectError::UnexpectedStatus { status } => Self::UnexpectedStatus { status },
            CollectError::Decode { message } => Self::Decode { message },
            CollectError::Accumulator(source) => Self::Output(source),
            err if err.is_timeout() => Self::Timeout,
            source @ CollectError::Transport(_) => Self::ConnectionFailed { source },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_by_category() {
        assert_eq!(CliError::AuthFailed.exit_code(), exit_code::AUTH);
        assert_eq!(CliError::Timeout.exit_code(), exit_code::TIMEOUT);
        assert_eq!(
            CliError::from(CollectError::Configuration {
                field: "org_id",
                reason: "must be set".into(),
            })
            .exit_code(),
            exit_code::CONFIG
        );
        assert_eq!(
            CliError::from(CollectError::UnexpectedStatus { status: 500 }).exit_code(),
            exit_code::GENERAL
        );
    }
}
