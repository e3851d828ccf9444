pub mod errors;
pub mod feed;
pub mod html;
pub mod json;
pub mod xlsx;

pub use errors::error_response;
pub use feed::feed_response;
pub use html::html_response;
pub use json::{json_response, json_response_with_status};
pub use xlsx::xlsx_response;
