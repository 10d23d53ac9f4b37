use crate::format::{Listing, ListingFormat};
use popmark::error::Result;
use std::fmt::Write;

pub struct PlainListing<'a, 'b>(pub &'a Listing<'b>);

impl ListingFormat for PlainListing<'_, '_> {
    fn render(&self) -> Result<String> {
        let mut s = String::new();
        for record in self.0.records() {
            let marker = if record.selected { '*' } else { ' ' };
            let fold = if record.expanded { '-' } else { '+' };
            // Writing into a String cannot fail
            let _ = writeln!(
                s,
                "{} [{}] {} ({})",
                marker,
                fold,
                record.name,
                record.bookmarks.len()
            );
            if record.expanded {
                for b in record.bookmarks {
                    let _ = writeln!(s, "      {}  {}  {}", b.id, b.title, b.url);
                }
            }
        }
        Ok(s)
    }
}
