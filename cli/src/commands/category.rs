use super::{AppContext, PopmarkCommand};
use popmark::error::Result;
use popmark::storage::StorageArea;
use popmark::tab::TabQuery;
use serde::{Deserialize, Serialize};

/// Add an empty category to the current session. It is not stored until a
/// bookmark is saved into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCategoryCommand {
    pub name: String,
}

impl PopmarkCommand for AddCategoryCommand {
    fn execute<S: StorageArea, T: TabQuery>(&self, ctx: &mut AppContext<'_, S, T>) -> Result<()> {
        ctx.popup.add_category(&self.name)?;
        ctx.popup.select_category(self.name.trim());
        eprintln!(
            "Added category '{}' (kept until the session ends unless a bookmark is saved to it)",
            self.name.trim()
        );
        Ok(())
    }
}
