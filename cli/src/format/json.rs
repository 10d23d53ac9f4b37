use crate::format::{Listing, ListingFormat};
use popmark::error::Result;

pub struct JsonListing<'a, 'b>(pub &'a Listing<'b>);

impl ListingFormat for JsonListing<'_, '_> {
    fn render(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.0.records())?)
    }
}
