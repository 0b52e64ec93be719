// ── Stats collector ──
//
// One tick = one GET against the org stats endpoint, one metric point per
// decoded record. The HTTP client is built once in `new` and reused; the
// collector keeps no other state between ticks.

use std::time::Duration;

use tracing::{debug, info};
use url::Url;

use mistwifi_api::{OrgStats, StatsClient, TransportConfig};

use crate::accumulator::Accumulator;
use crate::config::CollectorConfig;
use crate::error::CollectError;
use crate::metric::{FieldValue, Fields, Tags};

/// Measurement name every point is emitted under.
pub const MEASUREMENT: &str = "mistwifi";

/// Polls one Mist organization and forwards its stats to an accumulator.
pub struct StatsCollector {
    client: StatsClient,
    org_id: String,
    timeout: Duration,
}

impl std::fmt::Debug for StatsCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatsCollector")
            .field("org_id", &self.org_id)
            .field("stats_url", self.client.stats_url())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl StatsCollector {
    /// Validate the config and build the HTTP client.
    pub fn new(config: &CollectorConfig) -> Result<Self, CollectError> {
        config.validate()?;

        let org_id = config.org_id.trim().to_owned();
        let timeout = config.effective_timeout();
        let transport = TransportConfig {
            tls: config.tls.clone().into(),
            timeout,
        };
        let client =
            StatsClient::from_token(&config.base_url, &org_id, &config.auth_token, &transport)?;

        info!(
            org_id = %org_id,
            url = %client.stats_url(),
            timeout = ?timeout,
            "mist stats collector initialized"
        );

        Ok(Self {
            client,
            org_id,
            timeout,
        })
    }

    pub fn org_id(&self) -> &str {
        &self.org_id
    }

    pub fn stats_url(&self) -> &Url {
        self.client.stats_url()
    }

    /// The request timeout in effect.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run one collection tick.
    ///
    /// Nothing reaches the accumulator unless the whole response decodes.
    /// Returns the number of points forwarded.
    pub async fn collect<A>(&self, acc: &mut A) -> Result<usize, CollectError>
    where
        A: Accumulator + ?Sized,
    {
        let records = self.client.org_stats().await?;

        for record in &records {
            debug!(title = %record.title, uuid = %record.uuid, "forwarding org stats");
            acc.add_fields(MEASUREMENT, record_fields(record), record_tags(record))?;
        }

        Ok(records.len())
    }
}

/// Tags identifying the record: `title`, then `uuid`.
pub fn record_tags(record: &OrgStats) -> Tags {
    let mut tags = Tags::with_capacity(2);
    tags.insert("title".into(), record.title.clone());
    tags.insert("uuid".into(), record.uuid.clone());
    tags
}

/// One integer field per counter present in the record.
pub fn record_fields(record: &OrgStats) -> Fields {
    record
        .counters()
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name.to_owned(), FieldValue::Integer(v))))
        .collect()
}
