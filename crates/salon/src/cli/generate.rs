//! The `salon generate` command: one try-on attempt from flags.

use clap::Args;
use salon_core::{
    load_customer_photo, AccessTokenStore, Attempt, Config, FileTokenStore, GenerationError,
    LocalAssetEncoder, Orchestrator, SelectionState, StyleCatalog,
};
use std::path::PathBuf;
use std::sync::Arc;

use super::presenter::{OutputTarget, TerminalPresenter};

/// Arguments for the `generate` command.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Style id (see `salon styles list`)
    #[arg(short, long)]
    pub style: u32,

    /// Portrait photo of the person
    #[arg(short, long)]
    pub photo: PathBuf,

    /// Output file (defaults to salon_<timestamp>.<ext> in the output directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Proxy endpoint, overriding the config file
    #[arg(long, env = "SALON_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Access code for this run only (not saved)
    #[arg(long, env = "SALON_ACCESS_CODE", hide_env_values = true)]
    pub access_code: Option<String>,
}

/// Execute the generate command.
pub async fn execute(args: GenerateArgs, config: &Config) -> anyhow::Result<()> {
    let config = apply_overrides(config, &args)?;

    let catalog = StyleCatalog::from_config(&config);
    let Some(style) = catalog.find(args.style) else {
        anyhow::bail!(
            "Unknown style id: {}\n\n  Hint: Run `salon styles list` to see available styles.",
            args.style
        );
    };

    if !args.photo.is_file() {
        anyhow::bail!(
            "Photo not found: {:?}\n\n  Hint: Check the file path and try again.",
            args.photo
        );
    }

    let encoder = LocalAssetEncoder::new(config.limits.max_photo_bytes());
    let encoded = load_customer_photo(&encoder, &args.photo).await?;

    let mut selection = SelectionState::new();
    selection.select_style(style.clone());
    selection.set_customer_photo(args.photo.clone(), encoded);

    let access_code = args
        .access_code
        .clone()
        .or_else(|| FileTokenStore::new(config.token_path()).get());

    let presenter = Arc::new(TerminalPresenter::new(OutputTarget {
        path: args.output.clone(),
        dir: config.output_dir(),
    }));
    let orchestrator = Orchestrator::from_config(&config, presenter.clone());

    let Some(ready) = selection.ready() else {
        anyhow::bail!("Selection is incomplete: a style and a photo are both required");
    };

    match orchestrator.generate(ready, access_code.as_deref()).await {
        Attempt::Finished(Ok(_)) if presenter.saved_path().is_some() => Ok(()),
        Attempt::Finished(Ok(_)) => anyhow::bail!("The generated image could not be saved"),
        Attempt::Finished(Err(GenerationError::MissingCredential)) => anyhow::bail!(
            "No access code set.\n\n  Hint: Run `salon token set`, or pass --access-code / SALON_ACCESS_CODE."
        ),
        Attempt::Finished(Err(e)) => anyhow::bail!("Generation failed ({})", e.kind()),
        Attempt::Busy => anyhow::bail!("A generation is already in progress"),
    }
}

/// Apply command-line overrides on top of the loaded config.
fn apply_overrides(config: &Config, args: &GenerateArgs) -> anyhow::Result<Config> {
    let mut config = config.clone();
    if let Some(endpoint) = &args.endpoint {
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            anyhow::bail!("--endpoint must be an http(s) URL, got {endpoint:?}");
        }
        config.proxy.endpoint = endpoint.clone();
    }
    Ok(config)
}
