use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A saved page reference
///
/// Imported records are not validated. A missing or null field reads as the
/// empty string and any other non-string value reads as its JSON text, so a
/// bad field only renders oddly instead of rejecting the record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bookmark {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub icon: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: String,
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

impl Bookmark {
    /// Create a new Bookmark
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
        icon: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: url.into(),
            icon: icon.into(),
            category: category.into(),
        }
    }
}
