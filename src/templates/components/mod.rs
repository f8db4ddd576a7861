pub mod controls;
pub mod error;
pub mod listing_table;
pub mod status;
pub mod workspace;

pub use controls::{export_form, fetch_form, search_form};
pub use error::error_page;
pub use listing_table::listing_table;
pub use status::status_line;
pub use workspace::{loading_overlay, workspace};
