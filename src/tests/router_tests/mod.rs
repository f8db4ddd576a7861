mod export_tests;
mod listings_tests;
mod page_tests;
mod search_tests;
