use crate::format::{Listing, ListingFormat};
use popmark::error::Result;

pub struct YamlListing<'a, 'b>(pub &'a Listing<'b>);

impl ListingFormat for YamlListing<'_, '_> {
    fn render(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.0.records())?)
    }
}
