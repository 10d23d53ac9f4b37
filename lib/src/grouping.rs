use crate::models::bookmark::Bookmark;
use crate::models::category::Category;
use std::collections::HashMap;

/// Fold a flat list into categories
///
/// Categories appear in the order their name is first seen; bookmarks keep
/// their input order within each category.
pub fn group_by_category(bookmarks: &[Bookmark]) -> Vec<Category> {
    let mut categories: Vec<Category> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for bookmark in bookmarks {
        let slot = *index.entry(bookmark.category.as_str()).or_insert_with(|| {
            categories.push(Category::new(bookmark.category.as_str()));
            categories.len() - 1
        });
        categories[slot].bookmarks.push(bookmark.clone());
    }

    categories
}

/// Concatenate every category's bookmarks in display order
pub fn flatten(categories: &[Category]) -> Vec<Bookmark> {
    categories
        .iter()
        .flat_map(|c| c.bookmarks.iter().cloned())
        .collect()
}

/// Names of all categories in display order, including empty ones
pub fn category_names(categories: &[Category]) -> Vec<String> {
    categories.iter().map(|c| c.name.clone()).collect()
}
