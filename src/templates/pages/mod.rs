pub mod home;
pub mod share;

pub use home::{home_page, PartnerFeedVm};
pub use share::share_page;
