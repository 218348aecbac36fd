use bids_report::cli::dispatcher::Dispatcher;
use bids_report::cli::main_types::Cli;
use bids_report::storage::config::Config;
use bids_report::utils::logging::{ConsoleReporter, Reporter};
use clap::Parser;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Usage errors exit here, before any network activity
    let cli = Cli::parse();
    let reporter: Arc<dyn Reporter> = Arc::new(ConsoleReporter::new(cli.verbose));

    // Load the job file, or fall back to the built-in report job
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            reporter.error(&format!("Error loading config: {}", err.display_friendly()));
            if let Some(hint) = err.troubleshooting_hint() {
                reporter.info(&format!("Hint: {}", hint));
            }
            std::process::exit(1);
        }
    };

    if let Some(path) = &cli.config {
        reporter.verbose(&format!("Using job file: {}", path.display()));
    }

    let dispatcher = Dispatcher::new(config, reporter.clone());

    // Rejections and runtime errors are reported, not signalled through the exit code
    match dispatcher.dispatch(cli.credentials()).await {
        Ok(outcome) if outcome.is_success() => {}
        Ok(outcome) => {
            reporter.verbose(&format!("Run ended without a report: {:?}", outcome));
        }
        Err(e) => dispatcher.report_error(&e),
    }
    Ok(())
}
