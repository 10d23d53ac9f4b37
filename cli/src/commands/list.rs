use super::{AppContext, PopmarkCommand};
use crate::format::{Listing, OutputFormat};
use popmark::error::{PopmarkError, Result};
use popmark::storage::StorageArea;
use popmark::tab::TabQuery;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListCommand {
    /// Show the bookmarks of every category
    pub expand_all: bool,
    /// Expand (and select) one category
    pub category: Option<String>,
    pub format: Option<String>,
}

impl ListCommand {
    pub fn render<S: StorageArea, T: TabQuery>(
        &self,
        ctx: &mut AppContext<'_, S, T>,
    ) -> Result<String> {
        if self.expand_all {
            ctx.popup.expand_all();
        }
        if let Some(name) = &self.category {
            if !ctx.popup.toggle_category(name) {
                return Err(PopmarkError::InvalidInput(format!(
                    "no category named '{}'",
                    name
                )));
            }
        }

        let listing = Listing {
            categories: ctx.popup.categories(),
            selected: ctx.popup.selected_category(),
        };
        let output_format = self
            .format
            .as_deref()
            .map(OutputFormat::from_string)
            .unwrap_or(OutputFormat::Colored);
        output_format.render(&listing, ctx.nc)
    }
}

impl PopmarkCommand for ListCommand {
    fn execute<S: StorageArea, T: TabQuery>(&self, ctx: &mut AppContext<'_, S, T>) -> Result<()> {
        let rendered = self.render(ctx)?;
        if rendered.is_empty() {
            eprintln!("No categories.");
        } else {
            print!("{}", rendered);
        }
        Ok(())
    }
}
