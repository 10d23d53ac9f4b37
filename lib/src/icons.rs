use rand::seq::IndexedRandom;
use rand::Rng;
use regex::Regex;
use std::sync::OnceLock;

/// Icons handed out when a bookmark arrives without a usable one
pub const DEFAULT_ICONS: [&str; 4] = [
    "/icons/bookmark.svg",
    "/icons/globe.svg",
    "/icons/star.svg",
    "/icons/compass.svg",
];

fn icon_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^/.*\.svg$").expect("icon pattern is valid"))
}

/// Whether `icon` is an absolute `.svg` path
pub fn is_valid_icon(icon: &str) -> bool {
    icon_pattern().is_match(icon)
}

/// Return `icon` if it is an absolute `.svg` path, otherwise a random entry
/// of `defaults` (or of [`DEFAULT_ICONS`] when `defaults` is empty)
pub fn check_icon_format(icon: &str, defaults: &[String]) -> String {
    check_icon_format_with(icon, defaults, &mut rand::rng())
}

pub fn check_icon_format_with<R: Rng + ?Sized>(
    icon: &str,
    defaults: &[String],
    rng: &mut R,
) -> String {
    let icon = icon.trim();
    if is_valid_icon(icon) {
        return icon.to_string();
    }

    log::debug!("Icon {:?} rejected, picking a default", icon);
    match defaults.choose(rng) {
        Some(choice) => choice.clone(),
        None => DEFAULT_ICONS
            .choose(rng)
            .map(|s| s.to_string())
            .unwrap_or_default(),
    }
}
