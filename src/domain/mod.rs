pub mod fields;
pub mod lifecycle;
pub mod listing;
