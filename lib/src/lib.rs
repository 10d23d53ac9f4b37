pub mod browser;
pub mod config;
pub mod defaults;
pub mod error;
pub mod grouping;
pub mod icons;
pub mod ids;
pub mod import_export;
pub mod models;
pub mod notice;
pub mod popup;
pub mod storage;
pub mod tab;
pub mod utils;

// Re-export the types front ends need most
pub use error::PopmarkError;
pub use popup::{DeleteTarget, LoadSource, PendingBookmark, Popup};
