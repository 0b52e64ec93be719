// mistwifi-core: Collection layer between mistwifi-api and metric sinks.

pub mod accumulator;
pub mod collector;
pub mod config;
pub mod error;
pub mod metric;

// ── Primary re-exports ──────────────────────────────────────────────
pub use accumulator::{Accumulator, AccumulatorError, MemoryAccumulator};
pub use collector::{MEASUREMENT, StatsCollector, record_fields, record_tags};
pub use config::{CollectorConfig, DEFAULT_HTTP_TIMEOUT, TlsVerification};
pub use error::CollectError;
pub use metric::{FieldValue, Fields, MetricEvent, Tags};

pub use mistwifi_api::{DEFAULT_BASE_URL, OrgStats};

// ── Plugin metadata ─────────────────────────────────────────────────

/// Name the input registers under with its host.
pub const PLUGIN_NAME: &str = "mistwifi";

/// One-line description shown by hosts that list inputs.
pub const DESCRIPTION: &str = "Gather real time data from Mist Cloud";

/// Commented sample configuration for the input.
pub const SAMPLE_CONFIG: &str = r#"## Specify auth token for your account
## To create one visit https://api.mist.com/api/v1/self/apitokens
auth_token = "invalidAuthToken"
## Or read the token from an environment variable instead
# auth_token_env = "MIST_API_TOKEN"

## Specify your OrgID for your account
org_id = "invalidOrgID"

## You can set a different http_timeout if you need to
## You should set a string using a number and a time indicator
## for example "12s" for 12 seconds, "1m" for 1 minute.
# http_timeout = "4s"

## Override the API host (regional clouds, proxies)
# base_url = "https://api.mist.com"

## Trust an additional CA certificate (PEM)
# ca_cert = "/etc/ssl/certs/corp-ca.pem"
"#;
