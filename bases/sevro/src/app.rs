use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use download_options::Config;
use media_downloader::{BatchDownloader, ExecutionMode, SweepSummary};
use crate::args::Args;
use crate::output::OutputHandler;

pub struct App {
    args: Args,
    output: OutputHandler,
}

impl App {
    pub fn new(args: Args) -> Self {
        let output = OutputHandler::new(args.verbose);
        Self { args, output }
    }

    pub async fn run(&self) -> Result<SweepSummary> {
        let config = Config::load(&self.args.config_path).wrap_err_with(|| {
            format!(
                "invalid configuration in {}",
                self.args.config_path.display()
            )
        })?;

        self.output.print_startup(&config)?;

        let mode = if self.args.dry_run {
            ExecutionMode::DryRun
        } else {
            ExecutionMode::Apply
        };
        let downloader =
            BatchDownloader::new(&self.args.output_dir, mode, self.args.tool.as_str()).await?;

        let summary = downloader.run(&config).await;

        self.output.print_complete(&summary);
        Ok(summary)
    }

    pub fn print_error(&self, error: &color_eyre::Report) {
        self.output.print_error(error);
    }
}
