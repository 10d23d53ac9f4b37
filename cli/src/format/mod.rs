use crate::{
    format::{json::JsonListing, plain::PlainListing, yaml::YamlListing},
    output::colorize::{Colorize, ColorizeListing},
};
use popmark::error::Result;
use popmark::models::bookmark::Bookmark;
use popmark::models::category::CategoryView;
use serde::Serialize;

pub mod json;
pub mod plain;
pub mod yaml;

/// A rendering of the category list
pub trait ListingFormat {
    fn render(&self) -> Result<String>;
}

/// The grouped view plus the selection, as handed to a renderer
pub struct Listing<'a> {
    pub categories: Vec<CategoryView<'a>>,
    pub selected: Option<&'a str>,
}

impl<'a> Listing<'a> {
    pub fn records(&self) -> Vec<CategoryRecord<'a>> {
        self.categories
            .iter()
            .map(|c| CategoryRecord {
                name: c.name,
                expanded: c.is_expanded,
                selected: self.selected == Some(c.name),
                bookmarks: c.bookmarks,
            })
            .collect()
    }
}

/// Serializable shape of one category for the machine formats
#[derive(Debug, Serialize)]
pub struct CategoryRecord<'a> {
    pub name: &'a str,
    pub expanded: bool,
    pub selected: bool,
    pub bookmarks: &'a [Bookmark],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Plain,
    Colored,
}

impl OutputFormat {
    pub fn from_string(format: &str) -> Self {
        match format {
            "json" => OutputFormat::Json,
            "yaml" | "yml" => OutputFormat::Yaml,
            "plain" | "text" => OutputFormat::Plain,
            _ => OutputFormat::Colored,
        }
    }

    pub fn render(self, listing: &Listing<'_>, no_color: bool) -> Result<String> {
        match self {
            OutputFormat::Json => JsonListing(listing).render(),
            OutputFormat::Yaml => YamlListing(listing).render(),
            OutputFormat::Plain => PlainListing(listing).render(),
            OutputFormat::Colored if no_color => PlainListing(listing).render(),
            OutputFormat::Colored => Ok(ColorizeListing(listing).to_colored()),
        }
    }
}
