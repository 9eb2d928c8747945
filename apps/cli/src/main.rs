mod config;
mod main_lib;

use clap::Parser;
use config::Config;
use main_lib::{init_tracing, run, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    init_tracing(config.log_format);
    run(cli, &config)
}
