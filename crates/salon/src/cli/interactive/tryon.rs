//! Guided try-on flow.
//!
//! Walks the user through: style → photo → generation, with a retry prompt
//! after a failure and an access-code prompt when none is saved.

use crate::cli::presenter::{OutputTarget, TerminalPresenter};
use console::Style;
use dialoguer::{Confirm, Input, Select};
use salon_core::{
    load_customer_photo, AccessTokenStore, Attempt, Config, FileTokenStore, GenerationError,
    LocalAssetEncoder, Orchestrator, SelectionState, StyleCatalog,
};
use std::path::PathBuf;
use std::sync::Arc;

use super::theme::salon_theme;

/// Walk the user through one try-on session.
pub async fn guided_tryon(config: &Config) -> anyhow::Result<()> {
    let theme = salon_theme();
    let warn = Style::new().for_stderr().yellow();
    let catalog = StyleCatalog::from_config(config);

    // ── Step 1: Style ───────────────────────────────────────────────────────

    let items: Vec<String> = catalog
        .iter()
        .map(|s| format!("{:<10} {}", s.name, s.description))
        .collect();

    let Some(index) = Select::with_theme(&theme)
        .with_prompt("Pick a hairstyle")
        .items(&items)
        .default(0)
        .interact_opt()?
    else {
        return Ok(());
    };
    let Some(style) = catalog.iter().nth(index).cloned() else {
        return Ok(());
    };

    let mut selection = SelectionState::new();
    selection.select_style(style);

    // ── Step 2: Photo ───────────────────────────────────────────────────────
    // Re-prompts until the photo loads or the user cancels.

    let encoder = LocalAssetEncoder::new(config.limits.max_photo_bytes());
    loop {
        let Some(raw_path) = super::handle_interrupt(
            Input::<String>::with_theme(&theme)
                .with_prompt("Path to your photo")
                .interact_text(),
        )?
        else {
            return Ok(());
        };

        let path = PathBuf::from(shellexpand::tilde(raw_path.trim()).into_owned());
        match load_customer_photo(&encoder, &path).await {
            Ok(encoded) => {
                selection.set_customer_photo(path, encoded);
                break;
            }
            Err(e) => eprintln!("  {}", warn.apply_to(e.to_string())),
        }
    }

    // ── Step 3: Generate ────────────────────────────────────────────────────

    let Some(ready) = selection.ready() else {
        return Ok(());
    };

    let presenter = Arc::new(TerminalPresenter::new(OutputTarget {
        path: None,
        dir: config.output_dir(),
    }));
    let orchestrator = Orchestrator::from_config(config, presenter.clone());
    let mut access_code = FileTokenStore::new(config.token_path()).get();

    loop {
        match orchestrator.generate(ready, access_code.as_deref()).await {
            Attempt::Finished(Ok(_)) => return Ok(()),
            Attempt::Finished(Err(GenerationError::MissingCredential)) => {
                match super::prompt_and_save_code(config)? {
                    Some(code) => access_code = Some(code),
                    None => return Ok(()),
                }
            }
            Attempt::Finished(Err(_)) => {
                let again = Confirm::with_theme(&theme)
                    .with_prompt("Try again?")
                    .default(true)
                    .interact_opt()?;
                if again != Some(true) {
                    return Ok(());
                }
            }
            Attempt::Busy => {
                eprintln!(
                    "  {}",
                    warn.apply_to("A generation is already in progress.")
                );
                return Ok(());
            }
        }
    }
}
