use crate::error::{PopmarkError, Result};

/// Open `url` in the system browser
pub fn open_url(url: &str) -> Result<()> {
    if url.trim().is_empty() {
        return Err(PopmarkError::InvalidInput("bookmark has no URL".to_string()));
    }
    open::that(url).map_err(|e| PopmarkError::Browser(e.to_string()))
}
