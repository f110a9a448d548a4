mod cli;
mod convert;

use std::fs::File;
use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use clap::Parser;
use gemstream_config::Config;

use crate::cli::Cli;
use crate::convert::convert;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG, when set, takes precedence over -v
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    log::debug!("Config path: {}", config_path.display());
    let config = Config::load_from_path(&config_path)?.unwrap_or_default();
    let settings = cli.settings(config);
    log::debug!("{settings:?}");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match cli.input_path() {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            convert(file, &mut out, &settings)
        }
        None => convert(io::stdin().lock(), &mut out, &settings),
    }
}
