//! Subcommand handlers.

pub mod gather;

use mistwifi_core::{DESCRIPTION, PLUGIN_NAME, SAMPLE_CONFIG};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a parsed command to its handler.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Gather(args) => gather::handle(&args, global).await,
        Command::SampleConfig => {
            print!("{SAMPLE_CONFIG}");
            Ok(())
        }
        Command::Describe => {
            println!("{PLUGIN_NAME}: {DESCRIPTION}");
            Ok(())
        }
    }
}
