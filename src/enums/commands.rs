use clap::Subcommand;

use crate::config::constants::DEFAULT_PORT;

#[derive(Subcommand)]
pub enum Commands {
    /// Start the analysis gateway server
    Start {
        #[clap(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Load and check the configuration without starting the server
    Validate,
}
