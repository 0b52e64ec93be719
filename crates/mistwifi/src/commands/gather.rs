//! `mistwifi gather`: one collection tick printed to stdout.

use std::io::{self, Write};

use tracing::info;

use mistwifi_core::{MemoryAccumulator, StatsCollector};

use crate::cli::{GatherArgs, GlobalOpts, OutputFormat};
use crate::config;
use crate::error::CliError;
use crate::output::{self, LineProtocolWriter};

pub async fn handle(args: &GatherArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let path = global.config.clone().unwrap_or_else(config::config_path);
    tracing::debug!(path = %path.display(), "loading config");

    let file = config::load_config(&path)?;
    let collector_config = config::resolve(&file, global)?;
    let collector = StatsCollector::new(&collector_config)?;

    let emitted = match args.output {
        OutputFormat::Line => {
            let mut writer = LineProtocolWriter::new(io::stdout().lock());
            collector.collect(&mut writer).await?;
            let written = writer.written();
            writer.into_inner().flush()?;
            written
        }
        OutputFormat::Json | OutputFormat::Table => {
            let mut acc = MemoryAccumulator::new();
            collector.collect(&mut acc).await?;
            let events = acc.into_events();
            let rendered = if args.output == OutputFormat::Json {
                output::render_json(&events)
            } else {
                output::render_table(&events)
            };
            writeln!(io::stdout().lock(), "{rendered}")?;
            events.len()
        }
    };

    info!(org_id = collector.org_id(), points = emitted, "gather complete");
    Ok(())
}
