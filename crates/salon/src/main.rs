//! Salon CLI - try on preset hairstyles with AI image generation.
//!
//! Pick a hairstyle from the catalog, point Salon at a portrait, and it asks
//! the generation proxy for a photo of that person wearing the style.
//!
//! # Usage
//!
//! ```bash
//! # Store the access code for the proxy
//! salon token set
//!
//! # See the available styles
//! salon styles list
//!
//! # Generate a try-on image
//! salon generate --style 3 --photo me.jpg
//!
//! # Guided mode
//! salon
//! ```

use clap::{Parser, Subcommand};
use std::io::IsTerminal;

mod cli;
mod logging;

/// Salon - try on preset hairstyles with AI image generation.
#[derive(Parser, Debug)]
#[command(name = "salon")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a try-on image for a style and a photo
    Generate(cli::generate::GenerateArgs),

    /// Browse the style catalog
    Styles(cli::styles::StylesArgs),

    /// Manage the proxy access code
    Token(cli::token::TokenArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match salon_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `salon config path`."
            );
            salon_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Salon v{}", salon_core::VERSION);

    match cli.command {
        Some(Commands::Generate(args)) => cli::generate::execute(args, &config).await,
        Some(Commands::Styles(args)) => cli::styles::execute(args, &config),
        Some(Commands::Token(args)) => cli::token::execute(args, &config),
        Some(Commands::Config(args)) => cli::config::execute(args).await,
        None if std::io::stdin().is_terminal() && std::io::stderr().is_terminal() => {
            cli::interactive::run(&config).await
        }
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            Ok(())
        }
    }
}
