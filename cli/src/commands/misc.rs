use super::{AppContext, PopmarkCommand};
use crate::interactive;
use popmark::browser;
use popmark::error::{PopmarkError, Result};
use popmark::storage::StorageArea;
use popmark::tab::TabQuery;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenCommand {
    pub id: String,
}

impl OpenCommand {
    /// URL of the bookmark, without opening it
    pub fn resolve<S: StorageArea, T: TabQuery>(
        &self,
        ctx: &AppContext<'_, S, T>,
    ) -> Result<String> {
        ctx.popup
            .find_bookmark(&self.id)
            .map(|b| b.url.clone())
            .ok_or_else(|| PopmarkError::InvalidInput(format!("no bookmark with id '{}'", self.id)))
    }
}

impl PopmarkCommand for OpenCommand {
    fn execute<S: StorageArea, T: TabQuery>(&self, ctx: &mut AppContext<'_, S, T>) -> Result<()> {
        let url = self.resolve(ctx)?;
        eprintln!("Opening: {}", url);
        browser::open_url(&url)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellCommand;

impl PopmarkCommand for ShellCommand {
    fn execute<S: StorageArea, T: TabQuery>(&self, ctx: &mut AppContext<'_, S, T>) -> Result<()> {
        interactive::run_with_context(ctx)
    }
}
