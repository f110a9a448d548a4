use std::path::PathBuf;

use clap::Parser;
use gemstream_config::Config;
use gemstream_engine::Format;
use log::LevelFilter;

/// Command line interface for gemstream
#[derive(Parser, Debug)]
#[command(author, version, about = "Convert gemtext to other formats")]
pub struct Cli {
    /// Gemtext file to read. Reads stdin when omitted or `-`.
    pub input: Option<PathBuf>,

    /// Output format: gemtext, html, markdown or rtf
    #[arg(short, long)]
    pub format: Option<Format>,

    /// Write each fragment as soon as it is parsed instead of building the
    /// whole document first
    #[arg(long)]
    pub stream: bool,

    /// Bytes per read from the input
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Path to the configuration file (defaults to
    /// ~/.config/gemstream/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// More logging; repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// What a conversion run does, after config and flags are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub format: Format,
    pub chunk_size: usize,
    pub streaming: bool,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Flags win over the config file; the config file wins over defaults.
    pub fn settings(&self, config: Config) -> Settings {
        Settings {
            format: self.format.unwrap_or(config.format),
            chunk_size: self.chunk_size.unwrap_or(config.chunk_size),
            streaming: self.stream || config.streaming,
        }
    }

    /// `None` means stdin.
    pub fn input_path(&self) -> Option<&PathBuf> {
        self.input.as_ref().filter(|path| path.as_os_str() != "-")
    }
}
