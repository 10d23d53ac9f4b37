use super::{AppContext, PopmarkCommand};
use popmark::error::{PopmarkError, Result};
use popmark::storage::StorageArea;
use popmark::tab::TabQuery;
use serde::{Deserialize, Serialize};

/// Save the active tab as a bookmark
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveCommand {
    pub icon: Option<String>,
    pub category: Option<String>,
}

impl PopmarkCommand for SaveCommand {
    fn execute<S: StorageArea, T: TabQuery>(&self, ctx: &mut AppContext<'_, S, T>) -> Result<()> {
        if let Some(icon) = &self.icon {
            ctx.popup.set_pending_icon(icon);
        }

        if ctx.popup.pending().url.is_empty() {
            return Err(PopmarkError::InvalidInput(
                "no active tab; pass --url and --title".to_string(),
            ));
        }

        let bookmark = match &self.category {
            Some(category) => {
                let pending = ctx.popup.pending().clone();
                ctx.popup
                    .add_bookmark(&pending.title, &pending.url, &pending.icon, category)?
            }
            None => ctx.popup.save()?,
        };

        let category = if bookmark.category.is_empty() {
            "(uncategorized)"
        } else {
            bookmark.category.as_str()
        };
        eprintln!("Saved '{}' to {} as {}", bookmark.title, category, bookmark.id);
        Ok(())
    }
}
