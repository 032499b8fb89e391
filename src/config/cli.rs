use clap::Parser;
use std::path::PathBuf;

/// Replays a voice platform event through the skill and prints the response.
#[derive(Debug, Clone, Parser)]
#[command(name = "dollar-price-skill")]
#[command(about = "Run the Dollar Price skill against a request event")]
pub struct CliArgs {
    #[arg(long, default_value = "-", help = "Event JSON file, `-` reads stdin")]
    pub event: String,

    #[arg(long, help = "TOML config file; environment variables are used when omitted")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Pretty-print the response JSON")]
    pub pretty: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}
