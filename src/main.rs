use chat_relay::cli::{handle_completions, handle_config_init, Cli, Commands, ConfigCommands};
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => chat_relay::cli::serve::run_serve(args).await,
        Commands::Chat(args) => chat_relay::cli::chat::run_chat(args).await,
        Commands::Status(args) => chat_relay::cli::status::run_status(args).await,
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Init(args) => handle_config_init(&args),
        },
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
