pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod scanner;
pub mod selector;
