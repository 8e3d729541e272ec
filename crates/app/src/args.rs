pub use clap::Parser;

use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "wgraph")]
#[command(about = "Browse and edit a linked-data social graph on Solid servers")]
pub struct Args {
    /// Route requests through this proxy (overrides the config file)
    #[arg(long, global = true)]
    pub proxy: Option<Url>,

    /// WebID to act as (overrides the config file)
    #[arg(long, global = true)]
    pub web_id: Option<String>,

    /// Path to the wgraph config directory (defaults to ~/.wgraph)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: crate::Command,
}
