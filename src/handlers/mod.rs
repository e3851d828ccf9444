pub mod export;
pub mod feeds;
pub mod listings;
pub mod pages;
pub mod partners;
