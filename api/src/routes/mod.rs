pub mod ask;
pub mod static_pages;
