// Mist cloud stats client
//
// Wraps `reqwest::Client` with token-header injection, the org-scoped stats
// URL, and status-code mapping. One client is built per collector and
// reused across ticks.

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::models::OrgStats;
use crate::transport::TransportConfig;

/// Public Mist cloud API host.
pub const DEFAULT_BASE_URL: &str = "https://api.mist.com";

/// Build the org-scoped stats URL: `{base}/api/v1/{org_id}/stats`.
///
/// `org_id` is pushed as a single path segment, so any `/` or `?` it
/// contains is percent-encoded instead of altering the route.
pub fn stats_url(base_url: &Url, org_id: &str) -> Result<Url, Error> {
    let mut url = base_url.clone();
    url.set_query(None);
    url.set_fragment(None);
    {
        let mut segments = url.path_segments_mut().map_err(|()| Error::InvalidBaseUrl {
            url: base_url.to_string(),
        })?;
        segments
            .pop_if_empty()
            .extend(["api", "v1", org_id, "stats"]);
    }
    Ok(url)
}

/// Async client for the Mist organization stats endpoint.
///
/// Authenticates with a static API token sent as `Authorization: Token ...`.
pub struct StatsClient {
    http: reqwest::Client,
    stats_url: Url,
}

impl StatsClient {
    /// Build from an API token and transport config.
    ///
    /// Injects the `Authorization` header as a sensitive default header so
    /// it never shows up in `Debug` output of requests.
    pub fn from_token(
        base_url: &Url,
        org_id: &str,
        token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut value = HeaderValue::from_str(&format!("Token {}", token.expose_secret()))
            .map_err(|e| Error::InvalidToken {
                message: format!("invalid header value: {e}"),
            })?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);

        let http = transport.build_client_with_headers(headers)?;
        let stats_url = stats_url(base_url, org_id)?;

        Ok(Self { http, stats_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &Url, org_id: &str, http: reqwest::Client) -> Result<Self, Error> {
        let stats_url = stats_url(base_url, org_id)?;
        Ok(Self { http, stats_url })
    }

    /// The fully-resolved stats URL this client polls.
    pub fn stats_url(&self) -> &Url {
        &self.stats_url
    }

    /// Fetch the organization stats.
    ///
    /// `GET /api/v1/{org_id}/stats`
    ///
    /// Only HTTP 200 is a success. The body must decode as a JSON array in
    /// full; a malformed element fails the whole call.
    pub async fn org_stats(&self) -> Result<Vec<OrgStats>, Error> {
        debug!("GET {}", self.stats_url);

        let resp = self.http.get(self.stats_url.clone()).send().await?;

        let status = resp.status();
        if status == StatusCode::FORBIDDEN {
            warn!(status = status.as_u16(), "Mist Cloud rejected the auth token");
            return Err(Error::Forbidden);
        }
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "unexpected status from Mist Cloud");
            return Err(Error::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body = resp.text().await?;
        let stats: Vec<OrgStats> =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: body.clone(),
            })?;

        debug!(records = stats.len(), "decoded org stats");
        Ok(stats)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn stats_url_on_bare_host() {
        let base = Url::parse(DEFAULT_BASE_URL).unwrap();
        let url = stats_url(&base, "org-123").unwrap();
        assert_eq!(url.as_str(), "https://api.mist.com/api/v1/org-123/stats");
    }

    #[test]
    fn stats_url_keeps_base_path_prefix() {
        let base = Url::parse("https://proxy.internal/mist/").unwrap();
        let url = stats_url(&base, "org").unwrap();
        assert_eq!(url.as_str(), "https://proxy.internal/mist/api/v1/org/stats");
    }

    #[test]
    fn stats_url_escapes_org_id() {
        let base = Url::parse(DEFAULT_BASE_URL).unwrap();
        let url = stats_url(&base, "a/b?c").unwrap();
        assert_eq!(url.as_str(), "https://api.mist.com/api/v1/a%2Fb%3Fc/stats");
    }

    #[test]
    fn stats_url_rejects_cannot_be_a_base() {
        let base = Url::parse("mailto:ops@example.com").unwrap();
        assert!(matches!(
            stats_url(&base, "org"),
            Err(Error::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn token_with_newline_is_rejected() {
        let base = Url::parse(DEFAULT_BASE_URL).unwrap();
        let token = SecretString::from("abc\ndef".to_string());
        let result = StatsClient::from_token(&base, "org", &token, &TransportConfig::default());
        assert!(matches!(result, Err(Error::InvalidToken { .. })));
    }
}
