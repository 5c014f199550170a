pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod probe;
pub mod report;

use config::{Config, OutputFormat};
use report::{render_json, render_text};

pub use error::{FailureKind, ProbeError};
pub use probe::{run_probe, ProbeOutcome, ProbeReport, ProbeRunner, ScrapedPage};

/// Runs one probe from a loaded configuration, prints the summary and
/// returns the process exit code. Configuration errors print a `❌` line and
/// exit 1 like any other failure.
pub async fn run(config: error::Result<Config>) -> u8 {
    let prepared = config.and_then(|config| {
        let runner = ProbeRunner::from_config(&config)?;
        Ok((runner, config))
    });
    let (runner, config) = match prepared {
        Ok(prepared) => prepared,
        Err(err) => {
            println!("❌ {}", err);
            return 1;
        }
    };

    let report = runner.probe(&config.page_url).await;

    match config.output {
        OutputFormat::Text => println!("{}", render_text(&report)),
        OutputFormat::Json => println!("{:#}", render_json(&report)),
    }

    report.outcome.exit_code()
}
