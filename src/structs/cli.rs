use clap::Parser;

use crate::enums::commands::Commands;

#[derive(Parser)]
#[clap(name = "devpulse-gateway")]
#[clap(about = "AI-powered code analysis gateway", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}
