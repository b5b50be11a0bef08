//! CLI module for chat-relay
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `serve` - Start the relay proxy
//! - `chat` - Interactive terminal chat through a running proxy
//! - `status` - One-shot backend connectivity check through the proxy
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Start the proxy in front of a local inference service
//! chat-relay serve --port 8000
//!
//! # Chat against it
//! chat-relay chat --proxy-url http://localhost:8000
//!
//! # Generate shell completions
//! chat-relay completions bash > ~/.bash_completion.d/chat-relay
//! ```

pub mod chat;
pub mod completions;
pub mod config;
pub mod output;
pub mod serve;
pub mod status;

pub use completions::handle_completions;
pub use config::handle_config_init;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// chat-relay - chat session core and proxy for a remote inference service
#[derive(Parser, Debug)]
#[command(
    name = "chat-relay",
    version,
    about = "Chat relay between a chat front-end and a remote inference service"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the relay proxy
    Serve(ServeArgs),
    /// Chat interactively through a running proxy
    Chat(ChatArgs),
    /// Check backend connectivity through a running proxy
    Status(StatusArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "chat-relay.toml")]
    pub config: PathBuf,

    /// Override server port
    #[arg(short, long, env = "CHAT_RELAY_PORT")]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long, env = "CHAT_RELAY_HOST")]
    pub host: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CHAT_RELAY_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Skip the startup backend probe
    #[arg(long)]
    pub no_health_check: bool,
}

#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "chat-relay.toml")]
    pub config: PathBuf,

    /// Base URL of the relay proxy
    #[arg(long, env = "CHAT_RELAY_PROXY_URL")]
    pub proxy_url: Option<String>,

    /// Disable connection polling
    #[arg(long)]
    pub no_health_check: bool,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "chat-relay.toml")]
    pub config: PathBuf,

    /// Base URL of the relay proxy
    #[arg(long, env = "CHAT_RELAY_PROXY_URL")]
    pub proxy_url: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "chat-relay.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// Load the config file (or defaults), then env overrides, then the proxy URL flag.
pub(crate) fn load_client_config(
    path: &std::path::Path,
    proxy_url: Option<&str>,
) -> Result<crate::config::RelayConfig, Box<dyn std::error::Error>> {
    let mut config = crate::config::RelayConfig::load_or_default(path)?.with_env_overrides();
    if let Some(url) = proxy_url {
        config.session.proxy_url = url.to_string();
    }
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["chat-relay", "serve"]).unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.config, PathBuf::from("chat-relay.toml"));
                assert!(!args.no_health_check);
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_parse_serve_with_port() {
        let cli = Cli::try_parse_from(["chat-relay", "serve", "-p", "9000"]).unwrap();
        match cli.command {
            Commands::Serve(args) => assert_eq!(args.port, Some(9000)),
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_parse_serve_with_host_and_config() {
        let cli = Cli::try_parse_from([
            "chat-relay",
            "serve",
            "-H",
            "127.0.0.1",
            "-c",
            "custom.toml",
        ])
        .unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.host.as_deref(), Some("127.0.0.1"));
                assert_eq!(args.config, PathBuf::from("custom.toml"));
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_parse_chat_proxy_url() {
        let cli = Cli::try_parse_from([
            "chat-relay",
            "chat",
            "--proxy-url",
            "http://relay.local:8000",
        ])
        .unwrap();
        match cli.command {
            Commands::Chat(args) => {
                assert_eq!(args.proxy_url.as_deref(), Some("http://relay.local:8000"));
            }
            _ => panic!("Expected Chat command"),
        }
    }

    #[test]
    fn test_cli_parse_status_json() {
        let cli = Cli::try_parse_from(["chat-relay", "status", "--json"]).unwrap();
        match cli.command {
            Commands::Status(args) => assert!(args.json),
            _ => panic!("Expected Status command"),
        }
    }

    #[test]
    fn test_cli_parse_config_init() {
        let cli = Cli::try_parse_from(["chat-relay", "config", "init", "-o", "out.toml", "-f"])
            .unwrap();
        match cli.command {
            Commands::Config(ConfigCommands::Init(args)) => {
                assert_eq!(args.output, PathBuf::from("out.toml"));
                assert!(args.force);
            }
            _ => panic!("Expected Config Init command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_command() {
        assert!(Cli::try_parse_from(["chat-relay", "models"]).is_err());
    }

    #[test]
    fn test_load_client_config_flag_wins() {
        let _guard = crate::config::ENV_LOCK.lock().unwrap();
        let config = load_client_config(
            std::path::Path::new("does-not-exist.toml"),
            Some("http://override:9000"),
        )
        .unwrap();
        assert_eq!(config.session.proxy_url, "http://override:9000");
    }
}
