//! The `salon styles` command for browsing the style catalog.

use clap::{Args, Subcommand};
use console::Style;
use salon_core::{AssetSource, Config, StyleCatalog, StyleOption};
use serde::Serialize;

/// Arguments for the `styles` command.
#[derive(Args, Debug)]
pub struct StylesArgs {
    #[command(subcommand)]
    pub command: StylesCommand,
}

/// Subcommands for the style catalog.
#[derive(Subcommand, Debug)]
pub enum StylesCommand {
    /// List all available styles
    List {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one style and where its reference image is loaded from
    Show {
        /// Style id
        id: u32,
    },
}

/// JSON row for `styles list --json`.
#[derive(Debug, Serialize)]
struct StyleRow<'a> {
    #[serde(flatten)]
    style: &'a StyleOption,
    source: String,
}

/// Execute the styles command.
pub fn execute(args: StylesArgs, config: &Config) -> anyhow::Result<()> {
    let catalog = StyleCatalog::from_config(config);

    match args.command {
        StylesCommand::List { json } => {
            if json {
                println!("{}", render_json(&catalog, config)?);
            } else {
                print_table(&catalog);
            }
        }

        StylesCommand::Show { id } => {
            let Some(style) = catalog.find(id) else {
                anyhow::bail!(
                    "Unknown style id: {id}\n\n  Hint: Run `salon styles list` to see available styles."
                );
            };
            let label = Style::new().bold();
            println!("{:<14} {}", label.apply_to("Id:"), style.id);
            println!("{:<14} {}", label.apply_to("Name:"), style.name);
            if !style.description.is_empty() {
                println!("{:<14} {}", label.apply_to("Description:"), style.description);
            }
            println!(
                "{:<14} {}",
                label.apply_to("Reference:"),
                source_label(style, config)
            );
        }
    }

    Ok(())
}

fn print_table(catalog: &StyleCatalog) {
    let dim = Style::new().dim();
    println!("{:<4} {:<12} DESCRIPTION", "ID", "NAME");
    for style in catalog.iter() {
        println!(
            "{:<4} {:<12} {}",
            style.id,
            style.name,
            dim.apply_to(&style.description)
        );
    }
}

fn render_json(catalog: &StyleCatalog, config: &Config) -> anyhow::Result<String> {
    let rows: Vec<StyleRow<'_>> = catalog
        .iter()
        .map(|style| StyleRow {
            style,
            source: source_label(style, config),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

fn source_label(style: &StyleOption, config: &Config) -> String {
    match AssetSource::resolve(&style.image, &config.asset_dir()) {
        AssetSource::File(path) => path.display().to_string(),
        AssetSource::Url(url) => url,
    }
}
