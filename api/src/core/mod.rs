pub mod app_state;
pub mod attachment;
pub mod catalog;
pub mod extract;
pub mod prompt;
