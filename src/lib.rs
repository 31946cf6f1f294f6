pub mod aggregators;
pub mod categories;
pub mod config;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod output;
pub mod parser;
pub mod row;
pub mod store;
pub mod summary;
