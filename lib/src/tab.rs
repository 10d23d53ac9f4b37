use crate::error::Result;

/// URL and title of the page the popup was opened on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveTab {
    pub url: Option<String>,
    pub title: Option<String>,
}

impl ActiveTab {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            title: Some(title.into()),
        }
    }

    /// Both fields when both are known and non-empty
    pub fn url_and_title(&self) -> Option<(&str, &str)> {
        match (self.url.as_deref(), self.title.as_deref()) {
            (Some(url), Some(title)) if !url.is_empty() && !title.is_empty() => Some((url, title)),
            _ => None,
        }
    }
}

/// Source of the currently active tab
pub trait TabQuery: Send + Sync {
    /// The active tab, `None` when there is no such tab
    fn active_tab(&self) -> Result<Option<ActiveTab>>;
}

/// A tab handed in by the embedder, e.g. from command-line flags
#[derive(Debug, Clone, Default)]
pub struct FixedTab {
    tab: Option<ActiveTab>,
}

impl FixedTab {
    pub fn new(url: Option<String>, title: Option<String>) -> Self {
        let tab = if url.is_none() && title.is_none() {
            None
        } else {
            Some(ActiveTab { url, title })
        };
        Self { tab }
    }

    /// No active tab at all
    pub fn none() -> Self {
        Self::default()
    }
}

impl TabQuery for FixedTab {
    fn active_tab(&self) -> Result<Option<ActiveTab>> {
        Ok(self.tab.clone())
    }
}
