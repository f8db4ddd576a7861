pub mod errors;
pub mod html;
pub mod xlsx;

pub use crate::errors::ResultResp;
pub use errors::html_error_response;
pub use html::{css_response, html_response, html_response_with_status};
pub use xlsx::xlsx_response;
