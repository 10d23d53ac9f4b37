use popmark::error::Result;
use popmark::storage::StorageArea;
use popmark::tab::TabQuery;
use popmark::Popup;

pub struct AppContext<'a, S, T> {
    pub popup: &'a mut Popup<S, T>,
    /// Disable color output
    pub nc: bool,
}

pub mod category;
pub mod delete;
pub mod helpers;
pub mod import_export;
pub mod list;
pub mod misc;
pub mod save;

pub trait PopmarkCommand {
    fn execute<S: StorageArea, T: TabQuery>(&self, ctx: &mut AppContext<'_, S, T>) -> Result<()>;
}

/// Enum-based dispatch for commands (the trait method is generic, so no
/// `dyn PopmarkCommand`)
pub enum CommandEnum {
    List(list::ListCommand),
    Save(save::SaveCommand),
    AddCategory(category::AddCategoryCommand),
    DeleteCategory(delete::DeleteCategoryCommand),
    DeleteBookmark(delete::DeleteBookmarkCommand),
    Import(import_export::ImportCommand),
    Export(import_export::ExportCommand),
    Open(misc::OpenCommand),
    Shell(misc::ShellCommand),
}

impl CommandEnum {
    pub fn execute<S: StorageArea, T: TabQuery>(
        &self,
        ctx: &mut AppContext<'_, S, T>,
    ) -> Result<()> {
        match self {
            Self::List(cmd) => cmd.execute(ctx),
            Self::Save(cmd) => cmd.execute(ctx),
            Self::AddCategory(cmd) => cmd.execute(ctx),
            Self::DeleteCategory(cmd) => cmd.execute(ctx),
            Self::DeleteBookmark(cmd) => cmd.execute(ctx),
            Self::Import(cmd) => cmd.execute(ctx),
            Self::Export(cmd) => cmd.execute(ctx),
            Self::Open(cmd) => cmd.execute(ctx),
            Self::Shell(cmd) => cmd.execute(ctx),
        }
    }
}
