// ── Runtime collector configuration ──
//
// Describes which org to poll and how to reach Mist Cloud. Hosts build a
// `CollectorConfig` (from a file, flags, or their own plugin config) and
// hand it to `StatsCollector::new`; core never reads config files.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use mistwifi_api::{DEFAULT_BASE_URL, TlsMode};

use crate::error::CollectError;

/// Request timeout applied when none (or zero) is configured.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(4);

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// Bundled root store (strict).
    #[default]
    SystemDefaults,
    /// Trust an additional CA certificate file.
    CustomCa(PathBuf),
}

impl From<TlsVerification> for TlsMode {
    fn from(tls: TlsVerification) -> Self {
        match tls {
            TlsVerification::SystemDefaults => Self::System,
            TlsVerification::CustomCa(path) => Self::CustomCa(path),
        }
    }
}

/// Configuration for polling a single Mist organization.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// API token, sent as `Authorization: Token <auth_token>`.
    pub auth_token: SecretString,
    /// Organization identifier interpolated into the stats URL.
    pub org_id: String,
    /// Request timeout. `None` or zero means [`DEFAULT_HTTP_TIMEOUT`].
    pub http_timeout: Option<Duration>,
    /// API root, `https://api.mist.com` unless overridden.
    pub base_url: Url,
    pub tls: TlsVerification,
}

impl CollectorConfig {
    pub fn new(auth_token: SecretString, org_id: impl Into<String>) -> Self {
        Self {
            auth_token,
            org_id: org_id.into(),
            http_timeout: None,
            base_url: default_base_url(),
            tls: TlsVerification::default(),
        }
    }

    #[must_use]
    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    #[must_use]
    pub fn with_tls(mut self, tls: TlsVerification) -> Self {
        self.tls = tls;
        self
    }

    /// The timeout requests will actually use.
    pub fn effective_timeout(&self) -> Duration {
        match self.http_timeout {
            Some(t) if !t.is_zero() => t,
            _ => DEFAULT_HTTP_TIMEOUT,
        }
    }

    /// Check that both required settings are present.
    ///
    /// Whitespace-only values count as missing.
    pub fn validate(&self) -> Result<(), CollectError> {
        if self.auth_token.expose_secret().trim().is_empty() {
            return Err(CollectError::missing("auth_token"));
        }
        if self.org_id.trim().is_empty() {
            return Err(CollectError::missing("org_id"));
        }
        Ok(())
    }
}

/// The public Mist cloud API root.
pub fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    #[test]
    fn empty_token_is_rejected() {
        let err = CollectorConfig::new(secret(""), "org").validate();
        assert!(matches!(
            err,
            Err(CollectError::Configuration { field: "auth_token", .. })
        ));
    }

    #[test]
    fn blank_org_is_rejected() {
        let err = CollectorConfig::new(secret("tok"), "  ").validate();
        assert!(matches!(
            err,
            Err(CollectError::Configuration { field: "org_id", .. })
        ));
    }

    #[test]
    fn token_checked_before_org() {
        let err = CollectorConfig::new(secret(""), "").validate();
        assert!(matches!(
            err,
            Err(CollectError::Configuration { field: "auth_token", .. })
        ));
    }

    #[test]
    fn default_timeout_is_four_seconds() {
        let cfg = CollectorConfig::new(secret("tok"), "org");
        assert_eq!(cfg.http_timeout, None);
        assert_eq!(cfg.effective_timeout(), Duration::from_secs(4));
    }

    #[test]
    fn zero_timeout_falls_back_to_default() {
        let cfg = CollectorConfig::new(secret("tok"), "org").with_http_timeout(Duration::ZERO);
        assert_eq!(cfg.effective_timeout(), DEFAULT_HTTP_TIMEOUT);
    }

    #[test]
    fn explicit_timeout_overrides_default() {
        let cfg =
            CollectorConfig::new(secret("tok"), "org").with_http_timeout(Duration::from_secs(12));
        assert_eq!(cfg.effective_timeout(), Duration::from_secs(12));
    }

    #[test]
    fn default_base_url_is_mist_cloud() {
        let cfg = CollectorConfig::new(secret("tok"), "org");
        assert_eq!(cfg.base_url.as_str(), "https://api.mist.com/");
        assert_eq!(cfg.tls, TlsVerification::SystemDefaults);
    }
}
