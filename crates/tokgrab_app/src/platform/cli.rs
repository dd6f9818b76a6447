use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Look up download links for a short-video page URL.
#[derive(Debug, Parser)]
#[command(name = "tokgrab")]
#[command(about = "Look up download links for a short-video page URL", long_about = None)]
pub struct Cli {
    /// Video page URLs to convert, one after another. Reads one URL per line
    /// from stdin when omitted.
    #[arg(value_name = "URL")]
    pub urls: Vec<String>,

    /// Conversion service endpoint (overrides the config file).
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// RON config file with endpoint and timeout settings.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Give up on a conversion after this many seconds (default: wait indefinitely).
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Also write logs to this file.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log more (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
