use super::prompts::{is_interactive, prompt_yes_no};
use crate::output::{header_cell, styled_table, Output, OutputFormat};
use crate::ConfigCommands;
use color_eyre::Result;
use comfy_table::{Attribute, Cell};
use moviemax_config::Config;
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::Path;

pub fn run_config(cmd: ConfigCommands, config_path: &Path, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show_config(config_path, output),
        ConfigCommands::Init { force } => init_config(config_path, force, output),
    }
}

fn show_config(config_path: &Path, output: &Output) -> Result<()> {
    let exists = config_path.exists();
    let config = Config::load_or_default(config_path)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_path.display(), e))?;

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            println!("\n{}", "Configuration".bright_cyan().bold());

            let mut table = styled_table();
            table.set_header(vec![header_cell("Setting"), header_cell("Value")]);
            let file_note = if exists {
                config_path.display().to_string()
            } else {
                format!("{} (not created, using defaults)", config_path.display())
            };
            let rows = [
                ("Config File", file_note),
                ("Catalog File", config.catalog.path.display().to_string()),
                ("Catalog Fallback", format!("{:?}", config.catalog.fallback).to_lowercase()),
                ("Tracker File", config.tracker.path.display().to_string()),
                ("Description Limit", config.display.description_limit.to_string()),
            ];
            for (label, value) in rows {
                table.add_row(vec![Cell::new(label).add_attribute(Attribute::Bold), Cell::new(value)]);
            }
            println!("{}", table);

            if !exists {
                output.info("Run 'moviemax config init' to write these defaults to disk.");
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "config_file": config_path.display().to_string(),
                "exists": exists,
                "config": config,
            }));
        }
    }

    Ok(())
}

fn init_config(config_path: &Path, force: bool, output: &Output) -> Result<()> {
    if config_path.exists() && !force {
        let prompt = format!("{} exists. Overwrite it with defaults?", config_path.display());
        let overwrite = output.is_human() && is_interactive() && prompt_yes_no(&prompt, Some(false))?;
        if !overwrite {
            output.warn(format!("Configuration already exists at {}", config_path.display()));
            output.info("Use --force to overwrite it with defaults.");
            return Ok(());
        }
    }

    Config::default()
        .save_to_file(config_path)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to write config to {}: {}", config_path.display(), e))?;
    output.success(format!("Wrote default configuration to {}", config_path.display()));
    Ok(())
}
