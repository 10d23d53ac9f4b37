use std::path::PathBuf;

pub fn get_default_datadir() -> PathBuf {
    if let Ok(path) = std::env::var("POPMARK_DATA_DIR") {
        return PathBuf::from(path);
    }

    if let Ok(path) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(path).join("popmark");
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local/share/popmark");
    }

    #[cfg(target_os = "windows")]
    if let Ok(appdata) = std::env::var("APPDATA") {
        return PathBuf::from(appdata).join("popmark");
    }

    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

pub fn get_config_dir() -> PathBuf {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(path).join("popmark");
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".config/popmark");
    }

    #[cfg(target_os = "windows")]
    if let Ok(appdata) = std::env::var("APPDATA") {
        return PathBuf::from(appdata).join("popmark");
    }

    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Trimmed, non-blank text or `None`
pub fn non_blank(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
