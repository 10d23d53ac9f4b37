mod cli;
mod commands;
mod format;
mod interactive;
mod output;

use clap::Parser;
use popmark::storage::FileStorage;
use popmark::tab::FixedTab;
use popmark::{config, error::Result, utils, Popup};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // Initialize logger
    env_logger::init();

    if args.version {
        println!("popmark {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let data_dir = args
        .data_dir
        .clone()
        .unwrap_or_else(utils::get_default_datadir);
    let storage = FileStorage::in_dir(&data_dir)?;
    log::debug!("Using storage file {}", storage.get_path().display());

    // Load configuration
    let cfg = if let Some(config_path) = &args.config {
        config::Config::load_from_path(config_path)?
    } else {
        config::Config::load()
    };

    let tab = FixedTab::new(args.url.clone(), args.title.clone());
    let mut popup = Popup::open(storage, tab, cfg);

    cli::handle_args(args, &mut popup)?;

    Ok(())
}
