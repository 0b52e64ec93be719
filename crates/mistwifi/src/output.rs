//! Output sinks: InfluxDB line protocol, JSON, table.
//!
//! Line protocol is written through an `Accumulator` so points stream out as
//! the collector forwards them. JSON and table buffer the tick first.

use std::io::Write;

use tabled::{Table, Tabled, settings::Style};

use mistwifi_core::{Accumulator, AccumulatorError, FieldValue, Fields, MetricEvent, Tags};

// ── Line protocol ────────────────────────────────────────────────────

/// Accumulator that writes each point as one line-protocol line.
pub struct LineProtocolWriter<W: Write> {
    out: W,
    written: usize,
}

impl<W: Write> LineProtocolWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    /// Number of lines written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Accumulator for LineProtocolWriter<W> {
    fn add_fields(
        &mut self,
        measurement: &str,
        fields: Fields,
        tags: Tags,
    ) -> Result<(), AccumulatorError> {
        // A point without fields is not representable; drop it.
        if fields.is_empty() {
            tracing::debug!(measurement, ?tags, "dropping point without fields");
            return Ok(());
        }
        let event = MetricEvent::new(measurement, fields, tags);
        writeln!(self.out, "{}", render_line(&event))?;
        self.written += 1;
        Ok(())
    }
}

/// Render one event: `measurement,tag=v field=1i <nanos>`.
///
/// Tags with empty values are omitted.
pub fn render_line(event: &MetricEvent) -> String {
    let mut line = escape(&event.measurement, &[',', ' ']);

    for (key, value) in &event.tags {
        if value.is_empty() {
            continue;
        }
        line.push(',');
        line.push_str(&escape(key, &[',', '=', ' ']));
        line.push('=');
        line.push_str(&escape(value, &[',', '=', ' ']));
    }

    let fields: Vec<String> = event
        .fields
        .iter()
        .map(|(key, value)| format!("{}={}", escape(key, &[',', '=', ' ']), field_literal(*value)))
        .collect();
    line.push(' ');
    line.push_str(&fields.join(","));

    if let Some(nanos) = event.timestamp.timestamp_nanos_opt() {
        line.push(' ');
        line.push_str(&nanos.to_string());
    }

    line
}

fn field_literal(value: FieldValue) -> String {
    match value {
        FieldValue::Integer(v) => format!("{v}i"),
        FieldValue::Unsigned(v) => format!("{v}u"),
        FieldValue::Float(v) => format!("{v}"),
    }
}

/// Backslash-escape `special` characters. Line breaks become `\n` / `\r`
/// so a point never spans more than one line.
fn escape(raw: &str, special: &[char]) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c if c == '\\' || special.contains(&c) => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

// ── Buffered renderers ───────────────────────────────────────────────

#[derive(Tabled)]
struct EventRow {
    #[tabled(rename = "Measurement")]
    measurement: String,
    #[tabled(rename = "Tags")]
    tags: String,
    #[tabled(rename = "Fields")]
    fields: String,
}

impl From<&MetricEvent> for EventRow {
    fn from(event: &MetricEvent) -> Self {
        Self {
            measurement: event.measurement.clone(),
            tags: join_pairs(event.tags.iter().map(|(k, v)| (k, v.clone()))),
            fields: join_pairs(event.fields.iter().map(|(k, v)| (k, v.to_string()))),
        }
    }
}

fn join_pairs<'a>(pairs: impl Iterator<Item = (&'a String, String)>) -> String {
    pairs
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_table(events: &[MetricEvent]) -> String {
    let rows: Vec<EventRow> = events.iter().map(EventRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Pretty-printed JSON array.
pub fn render_json(events: &[MetricEvent]) -> String {
    serde_json::to_string_pretty(events).expect("serialization should not fail")
}
