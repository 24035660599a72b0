use clap::Parser;
use media_downloader::DEFAULT_PROGRAM;
use std::path::PathBuf;

/// Download the channels, playlists and videos listed in a sevro configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file to read
    #[arg(long, env = "CONFIG_PATH")]
    pub config_path: PathBuf,

    /// Directory to store downloaded files
    #[arg(long, env = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// youtube-dl compatible program to run for each source
    #[arg(long, env = "SEVRO_TOOL", default_value = DEFAULT_PROGRAM)]
    pub tool: String,

    /// Only show what would be downloaded
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
