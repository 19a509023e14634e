//! Command-line interface for font-fetcher.
//!
//! Subcommands:
//! - `fetch <NAME>`: resolve a font to a local file and print its path
//! - `list`: list cached font files
//! - `cache-dir`: print the cache directory

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::LevelFilter;

use crate::cache::FontCache;
use crate::config::FetcherConfig;
use crate::fetcher::FontFetcher;

/// font-fetcher - find a font by name and keep a local copy
#[derive(Parser, Debug)]
#[command(name = "font-fetcher")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (off, error, warn, info, debug, trace); overrides RUST_LOG
    #[arg(long, value_name = "LEVEL", global = true, value_parser = parse_level_arg)]
    pub log_level: Option<LevelFilter>,

    /// Also append log lines to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Cache directory (default: from config, else the platform cache dir)
    #[arg(long, value_name = "DIR", global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Config file to read instead of the default location
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the path of a font, downloading it if not cached
    Fetch {
        /// Font name, e.g. "Open Sans"
        name: String,

        /// Style to fetch
        #[arg(short, long, default_value = "Regular")]
        style: String,

        /// Accept the closest remote match even if its name differs
        #[arg(long)]
        inexact: bool,

        /// Do not look at the cache, always download
        #[arg(long)]
        refresh: bool,
    },
    /// List cached font files
    List,
    /// Print the cache directory
    CacheDir,
}

fn parse_level_arg(value: &str) -> Result<LevelFilter, String> {
    crate::logging::parse_level(value).ok_or_else(|| format!("invalid log level '{}'", value))
}

/// Parse arguments, set up logging and run the chosen subcommand.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    crate::logging::init_logging(cli.log_level, cli.log_file.as_deref())?;
    execute(cli)
}

fn load_config(cli: &Cli) -> anyhow::Result<FetcherConfig> {
    let config = match &cli.config {
        Some(path) => FetcherConfig::load_from(path)?,
        None => FetcherConfig::load()?,
    };
    Ok(config)
}

fn open_cache(cli: &Cli, config: &FetcherConfig) -> anyhow::Result<FontCache> {
    let root = cli
        .cache_dir
        .clone()
        .or_else(|| config.cache_dir.clone())
        .unwrap_or_else(FontCache::default_dir);
    Ok(FontCache::new(root)?)
}

/// Run a parsed command line.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    let cache = open_cache(&cli, &config)?;

    match cli.command {
        Commands::Fetch {
            name,
            style,
            inexact,
            refresh,
        } => {
            let repos = vec![Box::new(font_fetcher_repo::Fonts1001Repo::with_timeout(
                config.http_timeout(),
            )) as Box<dyn font_fetcher_repo::FontRepo>];
            let fetcher = FontFetcher::new(cache, repos).with_options(config.fetch_options());
            let exact = config.exact && !inexact;
            let path = if refresh {
                fetcher.fetch_remote(&name, &style, exact)?
            } else {
                fetcher.fetch(&name, &style, exact)?
            };
            println!("{}", path.display());
        }
        Commands::List => {
            for entry in cache.entries()? {
                if let Some(file_name) = entry.file_name() {
                    println!("{}", file_name.to_string_lossy());
                }
            }
        }
        Commands::CacheDir => {
            println!("{}", cache.root().display());
        }
    }

    Ok(())
}
