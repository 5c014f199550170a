use std::process::ExitCode;

use scrape_probe::{config::Config, logging::init_logging, run};

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    // Load configuration
    let config = Config::load();

    ExitCode::from(run(config).await)
}
