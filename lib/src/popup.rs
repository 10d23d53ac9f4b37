use crate::config::Config;
use crate::defaults;
use crate::error::{PopmarkError, Result};
use crate::grouping;
use crate::icons;
use crate::ids;
use crate::import_export::{self, ExportDocument};
use crate::models::bookmark::Bookmark;
use crate::models::category::{Category, CategoryView};
use crate::notice::Notice;
use crate::storage::{self, StorageArea};
use crate::tab::{ActiveTab, TabQuery};
use crate::utils;
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Where the bookmarks shown after a load came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// The persisted list
    Stored,
    /// Nothing was stored; the default set was persisted
    Seeded,
    /// The stored list could not be read; defaults are shown but not persisted
    Fallback,
}

/// The bookmark being composed from the active tab
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingBookmark {
    pub title: String,
    pub url: String,
    pub icon: String,
}

/// What the delete-confirmation dialog is asking about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    Category { name: String },
    Bookmark { id: String, category: String },
}

/// View state owned by the popup, never persisted
#[derive(Debug, Clone, Default)]
pub struct UiState {
    expanded: HashSet<String>,
    selected_category: Option<String>,
    pending: PendingBookmark,
    notice: Option<Notice>,
    pending_delete: Option<DeleteTarget>,
}

/// The popup controller: a grouped view over the persisted flat list plus
/// the UI state that goes with it
pub struct Popup<S, T> {
    storage: S,
    tabs: T,
    config: Config,
    categories: Vec<Category>,
    ui: UiState,
    ready: bool,
    closed: bool,
}

impl<S: StorageArea, T: TabQuery> Popup<S, T> {
    /// A popup that has not loaded anything yet
    pub fn new(storage: S, tabs: T, config: Config) -> Self {
        Self {
            storage,
            tabs,
            config,
            categories: Vec::new(),
            ui: UiState::default(),
            ready: false,
            closed: false,
        }
    }

    /// Create a popup and run the initial load and tab query concurrently
    pub fn open(storage: S, tabs: T, config: Config) -> Self {
        let mut popup = Self::new(storage, tabs, config);
        popup.reload();
        popup
    }

    /// Discard all in-memory state and load from scratch
    pub fn reload(&mut self) {
        self.ready = false;
        self.ui = UiState::default();

        let (loaded, tab) = rayon::join(|| self.read_or_seed(), || self.query_tab());

        self.apply_loaded(loaded);
        self.apply_tab(tab);
        self.ready = true;
    }

    /// Read the persisted list (seeding defaults when absent) and rebuild
    /// the grouped view
    pub fn load(&mut self) -> LoadSource {
        let loaded = self.read_or_seed();
        self.apply_loaded(loaded)
    }

    /// Fill the pending bookmark from the active tab
    pub fn get_active_tab(&mut self) {
        let tab = self.query_tab();
        self.apply_tab(tab);
    }

    fn read_or_seed(&self) -> (Vec<Bookmark>, LoadSource) {
        let key = self.config.storage_key.as_str();
        match storage::read_bookmarks(&self.storage, key) {
            Ok(Some(bookmarks)) if !bookmarks.is_empty() => (bookmarks, LoadSource::Stored),
            Ok(_) => {
                let seeded = defaults::default_bookmarks();
                log::info!("No stored bookmarks, seeding {} defaults", seeded.len());
                if let Err(e) = storage::write_bookmarks(&self.storage, key, &seeded) {
                    log::error!("Error saving default bookmarks: {}", e);
                }
                (seeded, LoadSource::Seeded)
            }
            Err(e) => {
                log::error!("Error loading bookmarks: {}", e);
                (defaults::default_bookmarks(), LoadSource::Fallback)
            }
        }
    }

    fn query_tab(&self) -> Option<ActiveTab> {
        match self.tabs.active_tab() {
            Ok(tab) => tab,
            Err(e) => {
                log::error!("Error querying active tab: {}", e);
                None
            }
        }
    }

    fn apply_loaded(&mut self, (bookmarks, source): (Vec<Bookmark>, LoadSource)) -> LoadSource {
        self.categories = grouping::group_by_category(&bookmarks);
        self.ui.expanded.clear();
        self.ui.selected_category = self.categories.first().map(|c| c.name.clone());
        log::debug!(
            "Loaded {} bookmark(s) in {} categories ({:?})",
            bookmarks.len(),
            self.categories.len(),
            source
        );
        source
    }

    fn apply_tab(&mut self, tab: Option<ActiveTab>) {
        let (url, title) = tab
            .as_ref()
            .and_then(|t| t.url_and_title())
            .map(|(url, title)| (url.to_string(), title.to_string()))
            .unwrap_or_default();
        self.ui.pending.url = url;
        self.ui.pending.title = title;
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Whether the popup asked to be closed (after a save or cancel)
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The grouped view with expansion flags, in display order
    pub fn categories(&self) -> Vec<CategoryView<'_>> {
        self.categories
            .iter()
            .map(|c| CategoryView {
                name: &c.name,
                bookmarks: &c.bookmarks,
                is_expanded: self.ui.expanded.contains(&c.name),
            })
            .collect()
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn find_bookmark(&self, id: &str) -> Option<&Bookmark> {
        self.categories
            .iter()
            .flat_map(|c| c.bookmarks.iter())
            .find(|b| b.id == id)
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.ui.selected_category.as_deref()
    }

    pub fn pending(&self) -> &PendingBookmark {
        &self.ui.pending
    }

    /// Flip a category's expansion and select it. Returns false for unknown
    /// categories.
    pub fn toggle_category(&mut self, name: &str) -> bool {
        if self.category(name).is_none() {
            return false;
        }
        if !self.ui.expanded.remove(name) {
            self.ui.expanded.insert(name.to_string());
        }
        self.ui.selected_category = Some(name.to_string());
        true
    }

    pub fn select_category(&mut self, name: &str) -> bool {
        if self.category(name).is_none() {
            return false;
        }
        self.ui.selected_category = Some(name.to_string());
        true
    }

    pub fn expand_all(&mut self) {
        self.ui.expanded = self.categories.iter().map(|c| c.name.clone()).collect();
    }

    pub fn set_pending_title(&mut self, title: &str) {
        self.ui.pending.title = title.to_string();
    }

    pub fn set_pending_icon(&mut self, icon: &str) {
        self.ui.pending.icon = icon.to_string();
    }

    /// Close without saving
    pub fn cancel(&mut self) {
        self.closed = true;
    }

    /// Save the pending bookmark under the selected category
    pub fn save(&mut self) -> Result<Bookmark> {
        let pending = self.ui.pending.clone();
        let category = self.ui.selected_category.clone().unwrap_or_default();
        self.add_bookmark(&pending.title, &pending.url, &pending.icon, &category)
    }

    /// Append a new bookmark to the persisted list and to the view, then
    /// close the popup
    pub fn add_bookmark(
        &mut self,
        title: &str,
        url: &str,
        icon: &str,
        category: &str,
    ) -> Result<Bookmark> {
        let bookmark = match self.persist_new_bookmark(title, url, icon, category) {
            Ok(bookmark) => bookmark,
            Err(e) => {
                log::error!("Error saving bookmark: {}", e);
                return Err(e);
            }
        };

        match self.categories.iter_mut().find(|c| c.name == bookmark.category) {
            Some(existing) => existing.bookmarks.push(bookmark.clone()),
            None => {
                let mut created = Category::new(bookmark.category.as_str());
                created.bookmarks.push(bookmark.clone());
                self.categories.push(created);
            }
        }

        log::debug!("Saved bookmark {} in {:?}", bookmark.id, bookmark.category);
        self.closed = true;
        Ok(bookmark)
    }

    fn persist_new_bookmark(
        &self,
        title: &str,
        url: &str,
        icon: &str,
        category: &str,
    ) -> Result<Bookmark> {
        let key = self.config.storage_key.as_str();
        let mut entries = storage::read_entries(&self.storage, key)?.unwrap_or_default();
        let taken: HashSet<String> = entries
            .iter()
            .map(|entry| storage::bookmark_from_entry(entry).id)
            .collect();

        let id = ids::generate_unique_id(|candidate| taken.contains(candidate));
        let icon = icons::check_icon_format(icon, &self.config.default_icons);
        let bookmark = Bookmark::new(id, title, url, icon, category);

        let entry = serde_json::to_value(&bookmark)
            .map_err(|e| PopmarkError::StorageWrite(e.to_string()))?;
        entries.push(entry);
        storage::write_entries(&self.storage, key, entries)?;
        Ok(bookmark)
    }

    /// Drop a category from the view and every bookmark labelled with it
    /// from storage. Returns how many stored bookmarks were removed.
    ///
    /// The view change is not rolled back if storage fails.
    pub fn delete_category(&mut self, name: &str) -> Result<usize> {
        self.categories.retain(|c| c.name != name);
        self.ui.expanded.remove(name);
        if self.ui.selected_category.as_deref() == Some(name) {
            self.ui.selected_category = self.categories.first().map(|c| c.name.clone());
        }

        self.rewrite_stored(|b| b.category != name)
            .inspect_err(|e| log::error!("Error deleting category {:?}: {}", name, e))
    }

    /// Remove one bookmark from `category` in the view and from storage.
    /// Only the first entry matching both `id` and `category` is removed, and
    /// the category stays even when it becomes empty. Returns whether storage
    /// held the bookmark; a wrong category matches nothing.
    ///
    /// The view change is not rolled back if storage fails.
    pub fn delete_bookmark(&mut self, id: &str, category: &str) -> Result<bool> {
        if let Some(group) = self.categories.iter_mut().find(|c| c.name == category) {
            if let Some(pos) = group.bookmarks.iter().position(|b| b.id == id) {
                group.bookmarks.remove(pos);
            }
        }

        let mut found = false;
        self.rewrite_stored(|b| {
            if !found && b.id == id && b.category == category {
                found = true;
                return false;
            }
            true
        })
        .map(|removed| removed > 0)
        .inspect_err(|e| log::error!("Error deleting bookmark {}: {}", id, e))
    }

    /// Rewrite the stored entries that `keep` accepts, leaving each one as it
    /// was stored. Returns how many were dropped.
    fn rewrite_stored<F>(&self, mut keep: F) -> Result<usize>
    where
        F: FnMut(&Bookmark) -> bool,
    {
        let key = self.config.storage_key.as_str();
        let entries = storage::read_entries(&self.storage, key)?.unwrap_or_default();
        let before = entries.len();
        let kept: Vec<Value> = entries
            .into_iter()
            .filter(|entry| keep(&storage::bookmark_from_entry(entry)))
            .collect();
        let removed = before - kept.len();
        storage::write_entries(&self.storage, key, kept)?;
        Ok(removed)
    }

    /// Add an empty category to the view only; it is lost on reload unless
    /// a bookmark is saved into it first
    pub fn add_category(&mut self, name: &str) -> Result<()> {
        let name = utils::non_blank(name)
            .ok_or_else(|| PopmarkError::InvalidInput("category name is empty".to_string()))?;
        if self.category(name).is_some() {
            return Err(PopmarkError::InvalidInput(format!(
                "category '{}' already exists",
                name
            )));
        }
        self.categories.push(Category::new(name));
        Ok(())
    }

    /// Open the confirmation dialog for a delete
    pub fn request_delete(&mut self, target: DeleteTarget) {
        self.ui.pending_delete = Some(target);
    }

    pub fn pending_delete(&self) -> Option<&DeleteTarget> {
        self.ui.pending_delete.as_ref()
    }

    pub fn dismiss_delete(&mut self) {
        self.ui.pending_delete = None;
    }

    /// Run the delete the dialog was opened for. Returns the number of
    /// stored bookmarks removed; 0 when nothing was pending.
    pub fn confirm_delete(&mut self) -> Result<usize> {
        match self.ui.pending_delete.take() {
            Some(DeleteTarget::Category { name }) => self.delete_category(&name),
            Some(DeleteTarget::Bookmark { id, category }) => self
                .delete_bookmark(&id, &category)
                .map(usize::from),
            None => Ok(0),
        }
    }

    /// Replace the persisted list with the `bookmarks` array of an import
    /// document, then reload. Malformed documents leave storage untouched and
    /// raise a notice. Returns the number of imported entries.
    pub fn import_document(&mut self, text: &str, now: Instant) -> Result<usize> {
        let parsed = import_export::parse_import_document(text);
        self.apply_import(parsed, now)
    }

    pub fn import_file(&mut self, path: &Path, now: Instant) -> Result<usize> {
        let parsed = import_export::read_import_file(path);
        self.apply_import(parsed, now)
    }

    fn apply_import(
        &mut self,
        parsed: Result<import_export::ImportDocument>,
        now: Instant,
    ) -> Result<usize> {
        let document = match parsed {
            Ok(document) => document,
            Err(e) => {
                log::warn!("Rejected import: {}", e);
                self.ui.notice = Some(Notice::new(
                    "Import failed: the file must contain a \"bookmarks\" array",
                    now,
                    self.config.notice_duration(),
                ));
                return Err(e);
            }
        };

        let count = document.bookmarks.len();
        let key = self.config.storage_key.as_str();
        if let Err(e) = self.storage.set(key, Value::Array(document.bookmarks)) {
            log::error!("Error importing bookmarks: {}", e);
            return Err(e);
        }

        log::info!("Imported {} bookmark(s)", count);
        self.reload();
        Ok(count)
    }

    /// The notice visible at `now`, if any
    pub fn notice(&self, now: Instant) -> Option<&Notice> {
        self.ui.notice.as_ref().filter(|n| n.is_visible(now))
    }

    /// Forget notices that have expired by `now`
    pub fn clear_expired_notice(&mut self, now: Instant) {
        if self.notice(now).is_none() {
            self.ui.notice = None;
        }
    }

    /// Flatten the current view (not a fresh storage read)
    pub fn export_document(&self) -> ExportDocument {
        ExportDocument::from_categories(&self.categories)
    }

    /// Write the export file for `date` into `dir`
    pub fn export_to_dir(&self, dir: &Path, date: NaiveDate) -> Result<PathBuf> {
        import_export::write_export(&self.export_document(), dir, date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{read_bookmarks, MemoryStorage};
    use crate::tab::FixedTab;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    /// Memory storage whose reads or writes can be made to fail
    #[derive(Default)]
    struct FlakyStorage {
        inner: MemoryStorage,
        fail_reads: AtomicBool,
        fail_writes: AtomicBool,
    }

    impl StorageArea for FlakyStorage {
        fn get(&self, key: &str) -> Result<Option<Value>> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(PopmarkError::StorageRead("injected".into()));
            }
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: Value) -> Result<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(PopmarkError::StorageWrite("injected".into()));
            }
            self.inner.set(key, value)
        }
    }

    struct BrokenTab;

    impl TabQuery for BrokenTab {
        fn active_tab(&self) -> Result<Option<ActiveTab>> {
            Err(PopmarkError::TabQuery("no window".into()))
        }
    }

    fn bm(id: &str, category: &str) -> Bookmark {
        Bookmark::new(id, format!("Title {}", id), format!("https://{}.org", id), "/x.svg", category)
    }

    fn stored(bookmarks: &[Bookmark]) -> MemoryStorage {
        MemoryStorage::with_value("bookmarks", serde_json::to_value(bookmarks).unwrap())
    }

    fn open_with(storage: MemoryStorage) -> Popup<MemoryStorage, FixedTab> {
        Popup::open(storage, FixedTab::none(), Config::default())
    }

    fn persisted<S: StorageArea>(popup: &Popup<S, FixedTab>) -> Vec<Bookmark> {
        read_bookmarks(popup.storage(), "bookmarks")
            .unwrap()
            .unwrap_or_default()
    }

    fn stored_ids<S: StorageArea>(popup: &Popup<S, FixedTab>) -> Vec<String> {
        persisted(popup).into_iter().map(|b| b.id).collect()
    }

    fn names<S: StorageArea, T: TabQuery>(popup: &Popup<S, T>) -> Vec<String> {
        popup.categories().iter().map(|c| c.name.to_string()).collect()
    }

    #[test]
    fn test_first_load_seeds_defaults() {
        let popup = open_with(MemoryStorage::new());

        assert!(popup.is_ready());
        assert_eq!(persisted(&popup), defaults::default_bookmarks());
        assert_eq!(popup.selected_category(), Some("Tools"));
        assert!(popup.categories().iter().all(|c| !c.is_expanded));
    }

    #[test]
    fn test_empty_list_is_seeded() {
        let mut popup = Popup::new(stored(&[]), FixedTab::none(), Config::default());
        assert_eq!(popup.load(), LoadSource::Seeded);
        assert_eq!(persisted(&popup), defaults::default_bookmarks());
    }

    #[test]
    fn test_malformed_storage_falls_back_without_persisting() {
        let storage = MemoryStorage::with_value("bookmarks", json!("garbage"));
        let mut popup = Popup::new(storage, FixedTab::none(), Config::default());

        assert_eq!(popup.load(), LoadSource::Fallback);
        assert_eq!(popup.categories().len(), names_of_defaults().len());
        assert_eq!(popup.storage().get("bookmarks").unwrap(), Some(json!("garbage")));
    }

    fn names_of_defaults() -> Vec<String> {
        grouping::category_names(&grouping::group_by_category(&defaults::default_bookmarks()))
    }

    #[test]
    fn test_stored_list_is_grouped() {
        let popup = open_with(stored(&[bm("1", "A"), bm("2", "B"), bm("3", "A")]));

        assert_eq!(names(&popup), vec!["A", "B"]);
        assert_eq!(popup.categories()[0].bookmarks.len(), 2);
        assert_eq!(popup.selected_category(), Some("A"));
    }

    #[test]
    fn test_load_is_idempotent() {
        let mut popup = open_with(stored(&[bm("1", "A"), bm("2", "B")]));
        let first = popup.export_document();
        assert_eq!(popup.load(), LoadSource::Stored);
        assert_eq!(popup.export_document(), first);
    }

    #[test]
    fn test_active_tab_fills_pending() {
        let tab = FixedTab::new(Some("https://rust-lang.org".into()), Some("Rust".into()));
        let popup = Popup::open(stored(&[bm("1", "A")]), tab, Config::default());

        assert_eq!(popup.pending().url, "https://rust-lang.org");
        assert_eq!(popup.pending().title, "Rust");
    }

    #[test]
    fn test_partial_tab_leaves_pending_blank() {
        let tab = FixedTab::new(Some("https://rust-lang.org".into()), None);
        let popup = Popup::open(stored(&[bm("1", "A")]), tab, Config::default());
        assert_eq!(popup.pending(), &PendingBookmark::default());
    }

    #[test]
    fn test_ready_even_when_everything_fails() {
        let storage = FlakyStorage::default();
        storage.fail_reads.store(true, Ordering::SeqCst);
        let popup = Popup::open(storage, BrokenTab, Config::default());

        assert!(popup.is_ready());
        assert!(popup.pending().url.is_empty());
        assert!(!popup.categories().is_empty());
    }

    #[test]
    fn test_toggle_and_select() {
        let mut popup = open_with(stored(&[bm("1", "A"), bm("2", "B")]));

        assert!(popup.toggle_category("B"));
        assert_eq!(popup.selected_category(), Some("B"));
        assert!(popup.categories()[1].is_expanded);
        assert!(!popup.categories()[0].is_expanded);

        assert!(popup.toggle_category("B"));
        assert!(!popup.categories()[1].is_expanded);

        assert!(!popup.toggle_category("missing"));
        assert!(popup.select_category("A"));
        assert_eq!(popup.selected_category(), Some("A"));
    }

    #[test]
    fn test_add_bookmark_appends_and_closes() {
        let mut popup = open_with(stored(&[bm("1", "A")]));

        let added = popup
            .add_bookmark("New", "https://new.org", "/new.svg", "A")
            .unwrap();

        assert!(popup.is_closed());
        assert_eq!(added.icon, "/new.svg");
        assert_eq!(added.id.len(), ids::ID_LEN);
        assert_eq!(stored_ids(&popup), vec!["1".to_string(), added.id.clone()]);
        assert_eq!(popup.category("A").unwrap().bookmarks.len(), 2);
    }

    #[test]
    fn test_add_bookmark_normalizes_icon() {
        let mut popup = open_with(stored(&[bm("1", "A")]));
        let added = popup
            .add_bookmark("New", "https://new.org", "icons/x.svg", "A")
            .unwrap();
        assert!(popup.config().default_icons.contains(&added.icon));
    }

    #[test]
    fn test_add_bookmark_creates_category_in_view() {
        let mut popup = open_with(stored(&[bm("1", "A")]));
        popup.add_bookmark("New", "https://new.org", "", "Fresh").unwrap();
        assert_eq!(names(&popup), vec!["A", "Fresh"]);
    }

    #[test]
    fn test_add_bookmark_storage_failure_changes_nothing() {
        let storage = FlakyStorage::default();
        storage
            .inner
            .set("bookmarks", serde_json::to_value(vec![bm("1", "A")]).unwrap())
            .unwrap();
        let mut popup = Popup::open(storage, FixedTab::none(), Config::default());
        popup.storage().fail_writes.store(true, Ordering::SeqCst);

        let result = popup.add_bookmark("New", "https://new.org", "", "A");

        assert!(matches!(result, Err(PopmarkError::StorageWrite(_))));
        assert!(!popup.is_closed());
        assert_eq!(popup.category("A").unwrap().bookmarks.len(), 1);
    }

    #[test]
    fn test_save_uses_pending_and_selection() {
        let tab = FixedTab::new(Some("https://docs.rs".into()), Some("Docs".into()));
        let mut popup = Popup::open(stored(&[bm("1", "A"), bm("2", "B")]), tab, Config::default());
        popup.select_category("B");
        popup.set_pending_title("docs.rs");
        popup.set_pending_icon("/docs.svg");

        let saved = popup.save().unwrap();

        assert_eq!(saved.title, "docs.rs");
        assert_eq!(saved.url, "https://docs.rs");
        assert_eq!(saved.icon, "/docs.svg");
        assert_eq!(saved.category, "B");
        assert!(popup.is_closed());
    }

    #[test]
    fn test_cancel_closes_without_saving() {
        let mut popup = open_with(stored(&[bm("1", "A")]));
        popup.cancel();
        assert!(popup.is_closed());
        assert_eq!(stored_ids(&popup), vec!["1"]);
    }

    #[test]
    fn test_add_then_delete_restores_list() {
        let mut popup = open_with(stored(&[bm("1", "A"), bm("2", "B")]));
        let before = persisted(&popup);

        let added = popup.add_bookmark("Tmp", "https://tmp.org", "", "A").unwrap();
        assert!(popup.delete_bookmark(&added.id, "A").unwrap());

        assert_eq!(persisted(&popup), before);
    }

    #[test]
    fn test_delete_category_removes_only_matching() {
        let mut popup = open_with(stored(&[bm("1", "A"), bm("2", "B"), bm("3", "A")]));

        assert_eq!(popup.delete_category("A").unwrap(), 2);

        assert_eq!(stored_ids(&popup), vec!["2"]);
        assert_eq!(names(&popup), vec!["B"]);
        assert_eq!(popup.selected_category(), Some("B"));
    }

    #[test]
    fn test_delete_bookmark_keeps_empty_category() {
        let mut popup = open_with(stored(&[bm("1", "A"), bm("2", "B")]));

        assert!(popup.delete_bookmark("2", "B").unwrap());

        assert_eq!(names(&popup), vec!["A", "B"]);
        assert!(popup.category("B").unwrap().is_empty());
        assert_eq!(stored_ids(&popup), vec!["1"]);
    }

    #[test]
    fn test_delete_unknown_bookmark() {
        let mut popup = open_with(stored(&[bm("1", "A")]));
        assert!(!popup.delete_bookmark("nope", "A").unwrap());
        assert_eq!(stored_ids(&popup), vec!["1"]);
    }

    #[test]
    fn test_delete_failure_keeps_view_change() {
        let storage = FlakyStorage::default();
        storage
            .inner
            .set("bookmarks", serde_json::to_value(vec![bm("1", "A"), bm("2", "B")]).unwrap())
            .unwrap();
        let mut popup = Popup::open(storage, FixedTab::none(), Config::default());
        popup.storage().fail_writes.store(true, Ordering::SeqCst);

        assert!(popup.delete_category("A").is_err());

        assert_eq!(names(&popup), vec!["B"]);
        popup.storage().fail_writes.store(false, Ordering::SeqCst);
        assert_eq!(persisted(&popup).len(), 2);
    }

    #[test]
    fn test_add_category_is_ephemeral() {
        let mut popup = open_with(stored(&[bm("1", "A")]));

        popup.add_category("  Later  ").unwrap();
        assert_eq!(names(&popup), vec!["A", "Later"]);
        assert_eq!(stored_ids(&popup), vec!["1"]);

        popup.reload();
        assert_eq!(names(&popup), vec!["A"]);
    }

    #[test]
    fn test_add_category_then_bookmark_survives_reload() {
        let mut popup = open_with(stored(&[bm("1", "A")]));
        popup.add_category("Later").unwrap();
        popup.add_bookmark("x", "https://x.org", "", "Later").unwrap();

        assert_eq!(names(&popup), vec!["A", "Later"]);
        assert_eq!(popup.category("Later").unwrap().bookmarks.len(), 1);

        popup.reload();
        assert_eq!(names(&popup), vec!["A", "Later"]);
    }

    #[test]
    fn test_add_category_rejects_blank_and_duplicates() {
        let mut popup = open_with(stored(&[bm("1", "A")]));
        assert!(matches!(popup.add_category("   "), Err(PopmarkError::InvalidInput(_))));
        assert!(matches!(popup.add_category("A"), Err(PopmarkError::InvalidInput(_))));
        assert_eq!(names(&popup), vec!["A"]);
    }

    #[test]
    fn test_confirm_delete_dispatches_by_target() {
        let mut popup = open_with(stored(&[bm("1", "A"), bm("2", "B"), bm("3", "B")]));

        popup.request_delete(DeleteTarget::Bookmark {
            id: "2".into(),
            category: "B".into(),
        });
        assert!(popup.pending_delete().is_some());
        assert_eq!(popup.confirm_delete().unwrap(), 1);
        assert!(popup.pending_delete().is_none());

        popup.request_delete(DeleteTarget::Category { name: "B".into() });
        assert_eq!(popup.confirm_delete().unwrap(), 1);
        assert_eq!(stored_ids(&popup), vec!["1"]);

        assert_eq!(popup.confirm_delete().unwrap(), 0);
    }

    #[test]
    fn test_dismiss_delete() {
        let mut popup = open_with(stored(&[bm("1", "A")]));
        popup.request_delete(DeleteTarget::Category { name: "A".into() });
        popup.dismiss_delete();
        assert_eq!(popup.confirm_delete().unwrap(), 0);
        assert_eq!(stored_ids(&popup), vec!["1"]);
    }

    #[test]
    fn test_import_replaces_and_reloads() {
        let mut popup = open_with(stored(&[bm("1", "A")]));
        popup.add_category("Ephemeral").unwrap();
        popup.toggle_category("A");

        let doc = json!({"bookmarks": [bm("9", "Z"), bm("8", "Y")], "categories": ["Z", "Y"]});
        let count = popup.import_document(&doc.to_string(), Instant::now()).unwrap();

        assert_eq!(count, 2);
        assert_eq!(stored_ids(&popup), vec!["9", "8"]);
        assert_eq!(names(&popup), vec!["Z", "Y"]);
        assert!(popup.categories().iter().all(|c| !c.is_expanded));
        assert_eq!(popup.selected_category(), Some("Z"));
    }

    #[test]
    fn test_import_keeps_entries_verbatim() {
        let mut popup = open_with(stored(&[bm("1", "A")]));
        let doc = r#"{"bookmarks": [{"id": "q", "url": "https://q.org", "extra": 1}]}"#;

        popup.import_document(doc, Instant::now()).unwrap();

        assert_eq!(
            popup.storage().get("bookmarks").unwrap(),
            Some(json!([{"id": "q", "url": "https://q.org", "extra": 1}]))
        );
        let shown = popup.find_bookmark("q").unwrap();
        assert!(shown.title.is_empty());
        assert_eq!(shown.category, "");
    }

    #[test]
    fn test_import_loose_entries_then_edit() {
        let mut popup = open_with(stored(&[bm("1", "A")]));
        let doc = json!({"bookmarks": [
            {"id": "a", "title": null, "url": "https://a.org", "category": "Mine"},
            {"id": 7, "category": "Mine", "extra": 1}
        ]});

        assert_eq!(popup.import_document(&doc.to_string(), Instant::now()).unwrap(), 2);
        assert_eq!(names(&popup), vec!["Mine"]);
        assert!(popup.find_bookmark("a").unwrap().title.is_empty());
        assert_eq!(popup.find_bookmark("7").unwrap().category, "Mine");

        let added = popup.add_bookmark("New", "https://new.org", "", "Mine").unwrap();
        let raw = popup.storage().get("bookmarks").unwrap().unwrap();
        assert_eq!(raw[1], json!({"id": 7, "category": "Mine", "extra": 1}));
        assert_eq!(raw[2]["id"], json!(added.id));

        assert_eq!(popup.delete_category("Mine").unwrap(), 3);
        assert_eq!(popup.storage().get("bookmarks").unwrap(), Some(json!([])));
    }

    #[test]
    fn test_delete_keeps_unknown_fields_of_other_entries() {
        let mut popup = open_with(stored(&[bm("1", "A")]));
        let doc = json!({"bookmarks": [
            {"id": "q", "category": "A", "extra": 1},
            {"id": "r", "category": "A"}
        ]});
        popup.import_document(&doc.to_string(), Instant::now()).unwrap();

        assert!(popup.delete_bookmark("r", "A").unwrap());

        assert_eq!(
            popup.storage().get("bookmarks").unwrap(),
            Some(json!([{"id": "q", "category": "A", "extra": 1}]))
        );
    }

    #[test]
    fn test_delete_bookmark_removes_first_of_shared_id() {
        let mut popup = open_with(stored(&[bm("1", "A")]));
        let doc = json!({"bookmarks": [
            {"url": "https://one.org", "category": "A"},
            {"url": "https://two.org", "category": "A"}
        ]});
        popup.import_document(&doc.to_string(), Instant::now()).unwrap();

        assert!(popup.delete_bookmark("", "A").unwrap());

        let left = persisted(&popup);
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].url, "https://two.org");
        let shown = popup.category("A").unwrap();
        assert_eq!(shown.bookmarks.len(), 1);
        assert_eq!(shown.bookmarks[0].url, "https://two.org");
    }

    #[test]
    fn test_delete_bookmark_wrong_category_changes_nothing() {
        let mut popup = open_with(stored(&[bm("1", "A"), bm("2", "B")]));

        assert!(!popup.delete_bookmark("1", "B").unwrap());

        assert_eq!(stored_ids(&popup), vec!["1", "2"]);
        assert_eq!(popup.category("A").unwrap().bookmarks.len(), 1);
        assert_eq!(popup.category("B").unwrap().bookmarks.len(), 1);
    }

    #[test]
    fn test_import_non_array_leaves_storage_and_raises_notice() {
        let mut popup = open_with(stored(&[bm("1", "A")]));
        let now = Instant::now();

        let result = popup.import_document(r#"{"bookmarks": "not-an-array"}"#, now);

        assert!(matches!(result, Err(PopmarkError::ImportParse(_))));
        assert_eq!(stored_ids(&popup), vec!["1"]);
        assert!(popup.notice(now).is_some());
        assert!(popup.notice(now + Duration::from_secs(2)).is_some());
        assert!(popup.notice(now + Duration::from_secs(3)).is_none());

        popup.clear_expired_notice(now + Duration::from_secs(3));
        assert!(popup.notice(now).is_none());
    }

    #[test]
    fn test_import_garbage_text() {
        let mut popup = open_with(stored(&[bm("1", "A")]));
        assert!(popup.import_document("}{", Instant::now()).is_err());
        assert_eq!(stored_ids(&popup), vec!["1"]);
    }

    #[test]
    fn test_import_then_export_roundtrip() {
        let mut popup = open_with(stored(&[bm("1", "A")]));
        let input = vec![bm("a", "X"), bm("b", "Y"), bm("c", "X")];
        let doc = json!({ "bookmarks": input });

        popup.import_document(&doc.to_string(), Instant::now()).unwrap();
        let exported = popup.export_document();

        let mut got: Vec<Bookmark> = exported.bookmarks.clone();
        let mut want = input.clone();
        got.sort_by(|a, b| a.id.cmp(&b.id));
        want.sort_by(|a, b| a.id.cmp(&b.id));
        assert_eq!(got, want);
        assert_eq!(exported.categories, vec!["X", "Y"]);
    }

    #[test]
    fn test_export_reflects_view_not_storage() {
        let mut popup = open_with(stored(&[bm("1", "A")]));
        popup.add_category("Empty").unwrap();
        popup.storage().set("bookmarks", json!([])).unwrap();

        let doc = popup.export_document();
        assert_eq!(doc.bookmarks, vec![bm("1", "A")]);
        assert_eq!(doc.categories, vec!["A", "Empty"]);
    }

    #[test]
    fn test_export_to_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let popup = open_with(stored(&[bm("1", "A")]));
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        let path = popup.export_to_dir(dir.path(), date).unwrap();

        assert!(path.ends_with("bookmarks-2024-01-02.json"));
        let text = std::fs::read_to_string(path).unwrap();
        let parsed: ExportDocument = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, popup.export_document());
    }

    #[test]
    fn test_custom_storage_key() {
        let config = Config {
            storage_key: "saved".to_string(),
            ..Config::default()
        };
        let popup = Popup::open(MemoryStorage::new(), FixedTab::none(), config);
        assert!(popup.storage().get("saved").unwrap().is_some());
        assert!(popup.storage().get("bookmarks").unwrap().is_none());
    }
}
