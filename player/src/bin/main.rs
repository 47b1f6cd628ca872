//! Rawplay - Another World player
//!
//! # Usage
//!
//! ```bash
//! rawplay /path/to/data
//! rawplay --datapath=/path/to/data --language=us --render=software
//! rawplay --fullscreen-ar --scaler=nearest@2
//! ```
//!
//! Escape or closing the window quits.

use anyhow::Result;

use rawplay::DesktopPlatform;
use rawplay_core::{Configuration, ParseOutcome, USAGE, parse_args};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let base = Configuration::from_file_layer();
    let config = match parse_args(std::env::args_os(), base) {
        ParseOutcome::Run(config) => config,
        ParseOutcome::Usage => {
            println!("{USAGE}");
            return Ok(());
        }
    };

    rawplay_core::run(&DesktopPlatform, config)?;
    Ok(())
}
