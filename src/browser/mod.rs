//! Per-session UI state of the listing browser and the actions that change
//! it: region search, listing fetch, spreadsheet export and cell edits.

mod actions;
pub mod messages;
mod session;
mod state;
mod table;
mod trade_type;

pub use actions::{ActionError, ListingBrowser, Outcome};
pub use session::BrowserSession;
pub use state::{Action, BrowserState, StatusKind, StatusMessage};
pub use table::ListingTable;
pub use trade_type::TradeType;
