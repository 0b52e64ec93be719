//! Config file loading and translation to `CollectorConfig`.
//!
//! The file is TOML, layered with `MISTWIFI_*` environment variables via
//! figment. CLI flags take priority over both.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};

use mistwifi_core::{CollectorConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── TOML config struct ──────────────────────────────────────────────

/// Settings for the Mist input. Every key is optional in the file;
/// required ones are enforced when the collector is built.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// API token (plaintext; prefer `auth_token_env`).
    #[serde(default, deserialize_with = "string_or_number")]
    pub auth_token: Option<String>,

    /// Environment variable name containing the API token.
    pub auth_token_env: Option<String>,

    /// Organization ID.
    #[serde(default, deserialize_with = "string_or_number")]
    pub org_id: Option<String>,

    /// Request timeout as a humantime string ("4s", "1m").
    pub http_timeout: Option<String>,

    /// API root override.
    pub base_url: Option<String>,

    /// Extra CA certificate (PEM).
    pub ca_cert: Option<PathBuf>,
}

/// Accept a bare number where a string is expected. Figment types env
/// values, so `MISTWIFI_ORG_ID=123456` arrives as an integer.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Unsigned(u64),
        Signed(i64),
        Float(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Unsigned(n) => n.to_string(),
        Raw::Signed(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
    }))
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "mistwifi", "mistwifi").map_or_else(
        || PathBuf::from("mistwifi.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the config from `path` (if it exists) plus `MISTWIFI_*` env vars.
pub fn load_config(path: &Path) -> Result<Config, CliError> {
    let config = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("MISTWIFI_"))
        .extract()?;
    Ok(config)
}

// ── Resolution ──────────────────────────────────────────────────────

/// Translate the file config plus flag overrides into a `CollectorConfig`.
///
/// Missing token or org ID are passed through empty so the collector
/// reports them with its own configuration error.
pub fn resolve(config: &Config, global: &GlobalOpts) -> Result<CollectorConfig, CliError> {
    let token = resolve_token(config, global);
    let org_id = global
        .org_id
        .clone()
        .or_else(|| config.org_id.clone())
        .unwrap_or_default();

    let mut collector = CollectorConfig::new(token, org_id);

    if let Some(timeout) = resolve_timeout(config, global)? {
        collector = collector.with_http_timeout(timeout);
    }

    if let Some(raw) = global.base_url.as_deref().or(config.base_url.as_deref()) {
        let url = url::Url::parse(raw).map_err(|e| CliError::Validation {
            field: "base_url".into(),
            reason: format!("invalid URL '{raw}': {e}"),
        })?;
        collector = collector.with_base_url(url);
    }

    if let Some(ref ca) = config.ca_cert {
        collector = collector.with_tls(TlsVerification::CustomCa(ca.clone()));
    }

    Ok(collector)
}

/// Token precedence: `--auth-token`, then `auth_token_env`, then plaintext.
fn resolve_token(config: &Config, global: &GlobalOpts) -> SecretString {
    if let Some(ref token) = global.auth_token {
        return SecretString::from(token.clone());
    }

    if let Some(ref env_name) = config.auth_token_env {
        if let Ok(val) = std::env::var(env_name) {
            return SecretString::from(val);
        }
        tracing::debug!(env = %env_name, "auth_token_env is not set, falling back");
    }

    SecretString::from(config.auth_token.clone().unwrap_or_default())
}

fn resolve_timeout(config: &Config, global: &GlobalOpts) -> Result<Option<Duration>, CliError> {
    if let Some(timeout) = global.timeout {
        return Ok(Some(timeout));
    }
    config
        .http_timeout
        .as_deref()
        .map(|raw| {
            humantime::parse_duration(raw).map_err(|e| CliError::Validation {
                field: "http_timeout".into(),
                reason: format!("'{raw}': {e}"),
            })
        })
        .transpose()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    fn no_flags() -> GlobalOpts {
        GlobalOpts {
            config: None,
            auth_token: None,
            org_id: None,
            timeout: None,
            base_url: None,
            verbose: 0,
        }
    }

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn loads_toml_file() {
        let (_dir, path) = write_config(
            r#"
            auth_token = "abc"
            org_id = "org-1"
            http_timeout = "12s"
            "#,
        );

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.auth_token.as_deref(), Some("abc"));
        assert_eq!(cfg.org_id.as_deref(), Some("org-1"));

        let collector = resolve(&cfg, &no_flags()).unwrap();
        assert_eq!(collector.auth_token.expose_secret(), "abc");
        assert_eq!(collector.org_id, "org-1");
        assert_eq!(collector.http_timeout, Some(Duration::from_secs(12)));
        assert_eq!(collector.base_url.as_str(), "https://api.mist.com/");
    }

    #[test]
    fn numeric_values_are_read_as_strings() {
        let cfg: Config = Figment::from(Toml::string("org_id = 123456\nauth_token = 42"))
            .extract()
            .unwrap();
        assert_eq!(cfg.org_id.as_deref(), Some("123456"));
        assert_eq!(cfg.auth_token.as_deref(), Some("42"));
    }

    #[test]
    fn missing_file_yields_empty_config() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(&dir.path().join("absent.toml")).unwrap();
        let collector = resolve(&cfg, &no_flags()).unwrap();
        assert_eq!(collector.org_id, "");
        assert_eq!(collector.http_timeout, None);
    }

    #[test]
    fn flags_override_file() {
        let cfg = Config {
            auth_token: Some("file-token".into()),
            org_id: Some("file-org".into()),
            http_timeout: Some("12s".into()),
            ..Config::default()
        };
        let flags = GlobalOpts {
            auth_token: Some("flag-token".into()),
            org_id: Some("flag-org".into()),
            timeout: Some(Duration::from_secs(2)),
            base_url: Some("http://127.0.0.1:9000".into()),
            ..no_flags()
        };

        let collector = resolve(&cfg, &flags).unwrap();
        assert_eq!(collector.auth_token.expose_secret(), "flag-token");
        assert_eq!(collector.org_id, "flag-org");
        assert_eq!(collector.http_timeout, Some(Duration::from_secs(2)));
        assert_eq!(collector.base_url.as_str(), "http://127.0.0.1:9000/");
    }

    #[test]
    fn bad_timeout_names_the_key() {
        let cfg = Config {
            http_timeout: Some("soon".into()),
            ..Config::default()
        };
        let err = resolve(&cfg, &no_flags()).unwrap_err();
        assert!(
            matches!(err, CliError::Validation { ref field, .. } if field == "http_timeout"),
            "got: {err:?}"
        );
    }

    #[test]
    fn bad_base_url_names_the_key() {
        let cfg = Config {
            base_url: Some("not a url".into()),
            ..Config::default()
        };
        let err = resolve(&cfg, &no_flags()).unwrap_err();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "base_url"));
    }

    #[test]
    fn ca_cert_selects_custom_tls() {
        let cfg = Config {
            ca_cert: Some(PathBuf::from("/etc/ssl/corp.pem")),
            ..Config::default()
        };
        let collector = resolve(&cfg, &no_flags()).unwrap();
        assert_eq!(
            collector.tls,
            TlsVerification::CustomCa(PathBuf::from("/etc/ssl/corp.pem"))
        );
    }

    #[test]
    fn unset_token_env_falls_back_to_plaintext() {
        let cfg = Config {
            auth_token: Some("plain".into()),
            auth_token_env: Some("MISTWIFI_TEST_TOKEN_THAT_IS_NEVER_SET".into()),
            ..Config::default()
        };
        let collector = resolve(&cfg, &no_flags()).unwrap();
        assert_eq!(collector.auth_token.expose_secret(), "plain");
    }
}
