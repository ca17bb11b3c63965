pub mod fetch_catalog;
