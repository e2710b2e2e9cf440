pub mod cli;
pub mod ssh_config;
pub mod utils;

pub use cli::Cli;
pub use ssh_config::{Config, ConfigError, ConfigParser, ParserOptions};
