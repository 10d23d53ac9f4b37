use crate::commands::category::AddCategoryCommand;
use crate::commands::delete::{DeleteBookmarkCommand, DeleteCategoryCommand};
use crate::commands::import_export::{ExportCommand, ImportCommand};
use crate::commands::list::ListCommand;
use crate::commands::misc::{OpenCommand, ShellCommand};
use crate::commands::save::SaveCommand;
use crate::commands::{AppContext, CommandEnum};
use clap::{Parser, Subcommand};
use popmark::error::Result;
use popmark::storage::StorageArea;
use popmark::tab::TabQuery;
use popmark::Popup;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None, disable_version_flag = true)]
pub struct Cli {
    /// Show the program version and exit
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// Directory holding storage.json
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Optional custom configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// URL of the page to bookmark (the active tab)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Title of the page to bookmark (the active tab)
    #[arg(long, global = true)]
    pub title: Option<String>,

    /// Disable color output
    #[arg(long, global = true)]
    pub nc: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List categories and their bookmarks
    List {
        /// Show bookmarks of every category
        #[arg(short, long)]
        expand_all: bool,

        /// Expand one category
        #[arg(short, long)]
        category: Option<String>,

        /// Output format: colored, plain, json, yaml
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Save the active tab (--url/--title) as a bookmark
    Save {
        /// Icon path, e.g. /icons/star.svg
        #[arg(short, long)]
        icon: Option<String>,

        /// Category to save into (defaults to the first category)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Add an empty category (only meaningful inside the shell)
    AddCategory {
        name: String,
    },

    /// Delete a category and every bookmark in it
    DeleteCategory {
        name: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Delete one bookmark
    Delete {
        /// Bookmark id
        id: String,

        /// Category the bookmark is listed under
        #[arg(short, long)]
        category: Option<String>,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Replace all bookmarks from a JSON file
    Import {
        /// File path to import from
        file: PathBuf,
    },

    /// Export bookmarks to bookmarks-<date>.json
    Export {
        /// Directory to write into
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Open a bookmark in the browser
    Open {
        /// Bookmark id
        id: String,
    },

    /// Start an interactive popup session
    Shell,
}

impl Commands {
    pub fn into_command(self) -> CommandEnum {
        match self {
            Commands::List {
                expand_all,
                category,
                format,
            } => CommandEnum::List(ListCommand {
                expand_all,
                category,
                format,
            }),
            Commands::Save { icon, category } => CommandEnum::Save(SaveCommand {
                icon,
                category,
            }),
            Commands::AddCategory { name } => {
                CommandEnum::AddCategory(AddCategoryCommand { name })
            }
            Commands::DeleteCategory { name, force } => {
                CommandEnum::DeleteCategory(DeleteCategoryCommand { name, force })
            }
            Commands::Delete {
                id,
                category,
                force,
            } => CommandEnum::DeleteBookmark(DeleteBookmarkCommand {
                id,
                category,
                force,
            }),
            Commands::Import { file } => CommandEnum::Import(ImportCommand { file }),
            Commands::Export { dir } => CommandEnum::Export(ExportCommand { dir }),
            Commands::Open { id } => CommandEnum::Open(OpenCommand { id }),
            Commands::Shell => CommandEnum::Shell(ShellCommand),
        }
    }
}

pub fn handle_args<S: StorageArea, T: TabQuery>(cli: Cli, popup: &mut Popup<S, T>) -> Result<()> {
    let mut ctx = AppContext {
        popup,
        nc: cli.nc,
    };

    // No subcommand lists the categories, like opening the popup
    let command = cli
        .command
        .map(Commands::into_command)
        .unwrap_or_else(|| CommandEnum::List(ListCommand::default()));

    command.execute(&mut ctx)
}
