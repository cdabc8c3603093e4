//! Interactive CLI mode: guided experience for bare `salon` invocation.
//!
//! When `salon` is invoked with no subcommand on a TTY, this module offers a
//! menu that drives the same orchestrator as `salon generate`.

pub mod theme;
pub mod tryon;

use console::Style;
use dialoguer::{Password, Select};
use salon_core::{AccessTokenStore, Config, FileTokenStore, StyleCatalog};

/// Convert a dialoguer result into `Ok(Some(value))` on success, `Ok(None)` on
/// interrupt (Ctrl+C / terminal disconnect), and `Err` for other I/O failures.
fn handle_interrupt<T>(result: dialoguer::Result<T>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(e.into()),
    }
}

const MENU_ITEMS: &[&str] = &[
    "Try on a hairstyle",
    "Set access code",
    "Browse styles",
    "Exit",
];

/// Entry point for interactive mode.
pub async fn run(config: &Config) -> anyhow::Result<()> {
    theme::print_banner();

    let theme = theme::salon_theme();

    loop {
        let selection = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .items(MENU_ITEMS)
            .default(0)
            .interact_opt()?;

        match selection {
            Some(0) => tryon::guided_tryon(config).await?,
            Some(1) => {
                prompt_and_save_code(config)?;
            }
            Some(2) => browse_styles(config),
            _ => break, // Exit, Esc or Ctrl+C
        }
    }

    Ok(())
}

/// Ask for an access code and persist it. Returns the saved code, if any.
pub(crate) fn prompt_and_save_code(config: &Config) -> anyhow::Result<Option<String>> {
    let theme = theme::salon_theme();
    let warn = Style::new().for_stderr().yellow();
    let dim = Style::new().for_stderr().dim();

    let Some(code) = handle_interrupt(
        Password::with_theme(&theme)
            .with_prompt("Access code")
            .allow_empty_password(true)
            .interact(),
    )?
    else {
        return Ok(None);
    };

    let code = code.trim().to_string();
    if code.is_empty() {
        eprintln!("  {}", dim.apply_to("No code entered."));
        return Ok(None);
    }

    let store = FileTokenStore::new(config.token_path());
    if let Err(e) = store.set(&code) {
        eprintln!(
            "  {}",
            warn.apply_to(format!("Could not save access code: {e}"))
        );
        eprintln!("  Using it for this session only.");
    } else {
        eprintln!(
            "  {}",
            dim.apply_to(format!("Saved to {}", store.path().display()))
        );
    }

    Ok(Some(code))
}

fn browse_styles(config: &Config) {
    let catalog = StyleCatalog::from_config(config);
    let cyan = Style::new().for_stderr().cyan();
    let dim = Style::new().for_stderr().dim();

    eprintln!();
    for style in catalog.iter() {
        eprintln!(
            "  {:>2}  {:<12} {}",
            cyan.apply_to(style.id),
            style.name,
            dim.apply_to(&style.description)
        );
    }
    eprintln!();
}
