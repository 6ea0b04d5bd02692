pub mod appender;
pub mod auth;
pub mod domain;
pub mod error;
pub mod flatten_double_vec;
pub mod http_client;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod spreadsheet_manager;
pub mod value_range_factory;
pub mod worksheet;
