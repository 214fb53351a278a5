pub mod error;
pub mod listing;
pub mod stack;
