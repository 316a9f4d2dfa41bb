use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::builder::FalseyValueParser;
use clap::{ArgAction, Parser};

use crate::adapters::command_parser::DEFAULT_PARSER_COMMAND;

/// Process settings, from the command line or the environment.
#[derive(Parser, Debug, Clone)]
#[command(name = "twilight-helper")]
#[command(about = "Serves the in-progress state of a Twilight Struggle game log over HTTP", long_about = None)]
#[command(version)]
pub struct Settings {
    /// Address to listen on
    #[arg(long, env = "TWILIGHT_HELPER_HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "TWILIGHT_HELPER_PORT", default_value_t = 5001)]
    pub port: u16,

    /// Origins allowed to call the API from a browser
    #[arg(
        long = "cors-origin",
        env = "TWILIGHT_HELPER_CORS_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub cors_origins: Vec<String>,

    /// External log parser executable
    #[arg(long, env = "TWILIGHT_HELPER_PARSER", default_value = DEFAULT_PARSER_COMMAND)]
    pub parser_command: PathBuf,

    /// Extra argument passed to the parser before the log path (repeatable)
    #[arg(long = "parser-arg", allow_hyphen_values = true)]
    pub parser_args: Vec<String>,

    /// Configuration file (defaults to the per-user application folder)
    #[arg(long, env = "TWILIGHT_HELPER_CONFIG")]
    pub config_file: Option<PathBuf>,

    /// Verbose logging, also written to a log file
    #[arg(
        long,
        env = "DEBUG",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub debug: bool,
}

impl Settings {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
