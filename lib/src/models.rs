pub mod bookmark;
pub mod category;
