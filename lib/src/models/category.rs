use super::bookmark::Bookmark;

/// A group of bookmarks sharing the same `category` label
///
/// Categories are never persisted; they are derived from the flat list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub bookmarks: Vec<Bookmark>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bookmarks: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }
}

/// What a front end renders for one category: the group plus its UI-only
/// expansion flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryView<'a> {
    pub name: &'a str,
    pub bookmarks: &'a [Bookmark],
    pub is_expanded: bool,
}
