use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Command, FilterParams};
use nxfilter::config::Config;

const LOG_ENV: &str = "NXFILTER_LOG";

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config() -> anyhow::Result<Config> {
    let base_path = Config::default_base_path()?;
    Config::load_with(&base_path).with_context(|| format!("failed to load config from {base_path}"))
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let args = cli::Args::parse();

    match args.command {
        Command::Filter {
            query,
            input,
            format,
            saved,
            plain,
            count,
        } => {
            let _span = tracing::info_span!("filter").entered();
            let config = load_config()?;
            let params = FilterParams {
                query,
                input,
                format,
                saved,
                plain,
                count,
            };
            cli::handle_filter(params, &config)?;
        }
        Command::Explain { query } => {
            let _span = tracing::info_span!("explain").entered();
            cli::handle_explain(&query)?;
        }
        Command::Saved { action } => {
            let _span = tracing::info_span!("saved").entered();
            let mut config = load_config()?;
            cli::handle_saved(action, &mut config)?;
        }
    }

    Ok(())
}
