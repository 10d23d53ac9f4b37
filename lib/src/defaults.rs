use crate::models::bookmark::Bookmark;

/// The bookmark set seeded on first load, one or two per well-known category
pub fn default_bookmarks() -> Vec<Bookmark> {
    [
        ("default-01", "Google Translate", "https://translate.google.com", "/icons/translate.svg", "Tools"),
        ("default-02", "Excalidraw", "https://excalidraw.com", "/icons/pen.svg", "Tools"),
        ("default-03", "GitHub", "https://github.com", "/icons/github.svg", "Developer"),
        ("default-04", "Rust Documentation", "https://doc.rust-lang.org", "/icons/book.svg", "Developer"),
        ("default-05", "Hugging Face", "https://huggingface.co", "/icons/robot.svg", "AI"),
        ("default-06", "YouTube", "https://www.youtube.com", "/icons/play.svg", "Entertainment"),
        ("default-07", "Google Scholar", "https://scholar.google.com", "/icons/scholar.svg", "Academic"),
        ("default-08", "arXiv", "https://arxiv.org", "/icons/paper.svg", "Academic"),
        ("default-09", "Project Gutenberg", "https://www.gutenberg.org", "/icons/book.svg", "Literature"),
        ("default-10", "Mastodon", "https://joinmastodon.org", "/icons/chat.svg", "Social"),
    ]
    .into_iter()
    .map(|(id, title, url, icon, category)| Bookmark::new(id, title, url, icon, category))
    .collect()
}

/// Dot color for a category; unknown categories are grey
pub fn category_color(category: &str) -> &'static str {
    match category {
        "Tools" => "#4285F4",
        "Developer" => "#34A853",
        "AI" => "#EA4335",
        "Entertainment" => "#FBBC05",
        "Academic" => "#9C27B0",
        "Literature" => "#3F51B5",
        "Social" => "#FF5722",
        _ => "#757575",
    }
}
