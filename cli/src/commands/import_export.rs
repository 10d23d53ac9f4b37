use super::{AppContext, PopmarkCommand};
use popmark::error::Result;
use popmark::storage::StorageArea;
use popmark::tab::TabQuery;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportCommand {
    pub file: PathBuf,
}

impl PopmarkCommand for ImportCommand {
    fn execute<S: StorageArea, T: TabQuery>(&self, ctx: &mut AppContext<'_, S, T>) -> Result<()> {
        let now = Instant::now();
        match ctx.popup.import_file(&self.file, now) {
            Ok(count) => {
                eprintln!(
                    "✓ Successfully imported {} bookmark(s) from {}",
                    count,
                    self.file.display()
                );
                Ok(())
            }
            Err(e) => {
                if let Some(notice) = ctx.popup.notice(now) {
                    eprintln!("✗ {}", notice.message);
                }
                Err(e)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportCommand {
    /// Target directory; falls back to the configured export dir, then `.`
    pub dir: Option<PathBuf>,
}

impl ExportCommand {
    pub fn target_dir<S: StorageArea, T: TabQuery>(&self, ctx: &AppContext<'_, S, T>) -> PathBuf {
        self.dir
            .clone()
            .or_else(|| ctx.popup.config().export_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

impl PopmarkCommand for ExportCommand {
    fn execute<S: StorageArea, T: TabQuery>(&self, ctx: &mut AppContext<'_, S, T>) -> Result<()> {
        let today = chrono::Local::now().date_naive();
        let dir = self.target_dir(ctx);
        let path = ctx.popup.export_to_dir(&dir, today)?;
        eprintln!("Exported bookmarks to {}", path.display());
        Ok(())
    }
}
