mod backend_error;
mod client;
mod models;

pub use backend_error::BackendError;
pub use client::{EndpointStyle, ExportMode, HttpBackend};
pub use models::{Complex, ExportRow, ListingField, ListingRecord, COLUMNS, COLUMN_COUNT};

/// The data-collection service the browser talks to.
///
/// `HttpBackend` is the real thing; tests swap in an in-memory fake.
pub trait ListingBackend: Send + Sync {
    /// Complexes matching a region keyword, in backend order.
    fn search_region(&self, keyword: &str) -> Result<Vec<Complex>, BackendError>;

    /// Current listings of one complex. An empty `trade_type` means all types.
    fn fetch_listings(
        &self,
        complex_no: &str,
        trade_type: &str,
    ) -> Result<Vec<ListingRecord>, BackendError>;

    /// Spreadsheet file for the given rows.
    fn export_spreadsheet(&self, rows: &[ExportRow]) -> Result<Vec<u8>, BackendError>;
}
