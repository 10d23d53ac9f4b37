use super::helpers::confirm;
use super::{AppContext, PopmarkCommand};
use popmark::error::{PopmarkError, Result};
use popmark::storage::StorageArea;
use popmark::tab::TabQuery;
use popmark::DeleteTarget;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteCategoryCommand {
    pub name: String,
    /// Skip confirmation prompt
    pub force: bool,
}

impl PopmarkCommand for DeleteCategoryCommand {
    fn execute<S: StorageArea, T: TabQuery>(&self, ctx: &mut AppContext<'_, S, T>) -> Result<()> {
        let count = match ctx.popup.category(&self.name) {
            Some(category) => category.bookmarks.len(),
            None => {
                return Err(PopmarkError::InvalidInput(format!(
                    "no category named '{}'",
                    self.name
                )))
            }
        };

        ctx.popup.request_delete(DeleteTarget::Category {
            name: self.name.clone(),
        });
        let prompt = format!(
            "Delete category '{}' and its {} bookmark(s)?",
            self.name, count
        );
        finish_delete(ctx, self.force, &prompt)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteBookmarkCommand {
    pub id: String,
    /// Category the bookmark is shown under; looked up when absent
    pub category: Option<String>,
    /// Skip confirmation prompt
    pub force: bool,
}

impl PopmarkCommand for DeleteBookmarkCommand {
    fn execute<S: StorageArea, T: TabQuery>(&self, ctx: &mut AppContext<'_, S, T>) -> Result<()> {
        let (title, category) = match &self.category {
            Some(category) => {
                let bookmark = ctx
                    .popup
                    .category(category)
                    .and_then(|c| c.bookmarks.iter().find(|b| b.id == self.id))
                    .ok_or_else(|| {
                        PopmarkError::InvalidInput(format!(
                            "no bookmark with id '{}' in category '{}'",
                            self.id, category
                        ))
                    })?;
                (bookmark.title.clone(), category.clone())
            }
            None => match ctx.popup.find_bookmark(&self.id) {
                Some(bookmark) => (bookmark.title.clone(), bookmark.category.clone()),
                None => {
                    return Err(PopmarkError::InvalidInput(format!(
                        "no bookmark with id '{}'",
                        self.id
                    )))
                }
            },
        };

        ctx.popup.request_delete(DeleteTarget::Bookmark {
            id: self.id.clone(),
            category,
        });
        let prompt = format!("Delete bookmark '{}' ({})?", title, self.id);
        finish_delete(ctx, self.force, &prompt)
    }
}

/// Confirm (or dismiss) the delete that was just requested
pub fn finish_delete<S: StorageArea, T: TabQuery>(
    ctx: &mut AppContext<'_, S, T>,
    force: bool,
    prompt: &str,
) -> Result<()> {
    let confirmed = force || confirm(prompt)?;
    if !confirmed {
        ctx.popup.dismiss_delete();
        eprintln!("Deletion cancelled.");
        return Ok(());
    }

    let removed = ctx.popup.confirm_delete()?;
    eprintln!("Deleted {} bookmark(s).", removed);
    Ok(())
}
