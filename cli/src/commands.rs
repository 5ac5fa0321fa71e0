pub mod discover;
pub mod info;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lanscout")]
#[command(about = "Discover the devices on your local IPv4 subnet.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show this machine's network identity and the derived subnet
    #[command(alias = "i")]
    Info,
    /// Probe the subnet and list every reachable device
    #[command(alias = "d")]
    Discover(DiscoverArgs),
}

#[derive(Args)]
pub struct DiscoverArgs {
    /// Per-probe timeout in seconds
    #[arg(long, default_value_t = 1)]
    pub timeout: u64,

    /// Seconds to wait after probing before the neighbor table is read
    #[arg(long, default_value_t = 2)]
    pub settle: u64,

    /// Maximum number of probes in flight at once
    #[arg(long, default_value_t = 64)]
    pub workers: usize,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
