// mistwifi-api: Async client for the Mist cloud organization stats endpoint

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::{DEFAULT_BASE_URL, StatsClient, stats_url};
pub use error::Error;
pub use models::OrgStats;
pub use transport::{TlsMode, TransportConfig};
