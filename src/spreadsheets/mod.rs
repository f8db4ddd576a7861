pub mod export_xlsx;

pub use export_xlsx::build_listings_workbook;
