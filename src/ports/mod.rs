pub mod config;
pub mod log_parser;
pub mod log_resolver;

pub use config::ConfigStore;
pub use log_parser::GameLogParser;
pub use log_resolver::LogResolver;
