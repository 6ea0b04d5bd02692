pub mod app;
pub mod cli;
pub mod config;
pub mod input;
pub mod logging;
pub mod prettyprint;
pub mod sheets;
