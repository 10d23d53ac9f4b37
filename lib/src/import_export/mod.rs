pub mod export;
pub mod import;

// Re-export main functions for convenience
pub use export::{export_file_name, write_export, ExportDocument};
pub use import::{parse_import_document, read_import_file, ImportDocument};
