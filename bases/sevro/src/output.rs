use color_eyre::Result;
use download_options::Config;
use media_downloader::SweepSummary;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "sevro=info,media_downloader=info,download_options=info";
const VERBOSE_FILTER: &str = "sevro=debug,media_downloader=debug,download_options=debug";

/// Install the global tracing subscriber. `RUST_LOG` takes precedence.
pub fn init_logging(verbose: bool) {
    let default = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .try_init();
}

pub struct OutputHandler {
    verbose: bool,
}

impl OutputHandler {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn print_startup(&self, config: &Config) -> Result<()> {
        tracing::info!("Starting with the following configuration:");
        tracing::info!("\n{}", config.to_yaml()?);
        Ok(())
    }

    pub fn print_complete(&self, summary: &SweepSummary) {
        tracing::info!("{}", completion_message(summary));
        tracing::info!("Done!");
    }

    pub fn print_error(&self, error: &color_eyre::Report) {
        eprintln!("Error: {}", error);

        if self.verbose {
            eprintln!("\nError details:");
            error.chain().skip(1).for_each(|cause| {
                eprintln!("  caused by: {}", cause);
            });
        }
    }
}

fn completion_message(summary: &SweepSummary) -> String {
    format!("Sweep finished: {summary}")
}
