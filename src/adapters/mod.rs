pub mod command_parser;
pub mod config_store;
pub mod log_resolver;

pub use command_parser::CommandLogParser;
pub use config_store::JsonConfigStore;
pub use log_resolver::DirectoryLogResolver;
