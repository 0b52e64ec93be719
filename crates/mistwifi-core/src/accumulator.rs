// ── Accumulator sink ──
//
// The host-supplied destination for metric points. The collector only
// calls `add_fields`; storage and forwarding are the sink's business.

use thiserror::Error;

use crate::metric::{Fields, MetricEvent, Tags};

/// Failure reported by a sink while accepting a point.
#[derive(Debug, Error)]
pub enum AccumulatorError {
    #[error("metric sink I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("metric rejected: {0}")]
    Rejected(String),
}

/// Destination for metric points emitted by a collector.
pub trait Accumulator {
    /// Accept one point. An error aborts the current collection tick.
    fn add_fields(
        &mut self,
        measurement: &str,
        fields: Fields,
        tags: Tags,
    ) -> Result<(), AccumulatorError>;
}

/// Keeps every accepted point in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemoryAccumulator {
    events: Vec<MetricEvent>,
}

impl MemoryAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[MetricEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<MetricEvent> {
        self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Accumulator for MemoryAccumulator {
    fn add_fields(
        &mut self,
        measurement: &str,
        fields: Fields,
        tags: Tags,
    ) -> Result<(), AccumulatorError> {
        self.events.push(MetricEvent::new(measurement, fields, tags));
        Ok(())
    }
}
