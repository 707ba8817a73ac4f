use std::path::PathBuf;

use clap::Parser;
use recon_finder::config::Source;

#[derive(clap::Parser, Debug)]
#[command(author, version, about = "get simple findings from the obtained information for the specified project", long_about = None)]
pub struct Cli {
    /// Project name, selects <s2s_path>/<project>/ as base folder
    #[arg(short = 'p', long)]
    pub project: Option<String>,

    /// Identify Email security (MX, SPF, DMARC, DKIM) for the project
    #[arg(long, default_value_t = false)]
    pub email: bool,

    /// Identify DNS resolutions for the project
    #[arg(long, default_value_t = false)]
    pub dns: bool,

    /// Perform all checks (findings, email and DNS)
    #[arg(long, default_value_t = false)]
    pub all: bool,

    /// Which HTTP prober feed to scan for findings
    #[arg(long, value_enum, default_value_t = Source::Domains)]
    pub source: Source,

    /// Scan this JSONL file instead of the configured feed
    #[arg(short = 'i', long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Settings (YAML) file location
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Show only errors
    #[arg(long, default_value_t = false, conflicts_with_all = ["verbose", "debug"])]
    pub silent: bool,

    /// Show verbose output
    #[arg(short = 'v', long, default_value_t = false)]
    pub verbose: bool,

    /// Enable detailed debug logging
    #[arg(long, default_value_t = false)]
    pub debug: bool,

    /// Disable colors in output
    #[arg(long, default_value_t = false)]
    pub no_color: bool,
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
