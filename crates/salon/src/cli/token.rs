//! The `salon token` command for managing the proxy access code.

use clap::{Args, Subcommand};
use dialoguer::Password;
use salon_core::token::mask;
use salon_core::{AccessTokenStore, Config, FileTokenStore};

/// Arguments for the `token` command.
#[derive(Args, Debug)]
pub struct TokenArgs {
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Subcommands for access code management.
#[derive(Subcommand, Debug)]
pub enum TokenCommand {
    /// Save the access code (prompts when omitted)
    Set {
        /// Access code; leave out to type it without echo
        code: Option<String>,
    },

    /// Show the saved access code, masked
    Show,

    /// Show the credentials file path
    Path,
}

/// Execute the token command.
pub fn execute(args: TokenArgs, config: &Config) -> anyhow::Result<()> {
    let store = FileTokenStore::new(config.token_path());

    match args.command {
        TokenCommand::Set { code } => {
            let code = match code {
                Some(code) => code,
                None => Password::new()
                    .with_prompt("Access code")
                    .allow_empty_password(true)
                    .interact()?,
            };
            if save(&store, &code)? {
                println!("Access code saved to: {}", store.path().display());
            } else {
                eprintln!("Empty access code, nothing saved.");
            }
        }

        TokenCommand::Show => match store.get() {
            Some(code) => println!("{}", mask(&code)),
            None => println!("not set"),
        },

        TokenCommand::Path => println!("{}", store.path().display()),
    }

    Ok(())
}

/// Persist a code, returning whether anything was written.
pub(crate) fn save(store: &dyn AccessTokenStore, code: &str) -> anyhow::Result<bool> {
    if code.trim().is_empty() {
        return Ok(false);
    }
    store.set(code)?;
    Ok(true)
}
