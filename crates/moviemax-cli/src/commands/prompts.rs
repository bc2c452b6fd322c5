use color_eyre::Result;
use dialoguer::{Confirm, Input, Select};
use std::io::IsTerminal;

pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
}

/// Prompt for a string value with optional default
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input_builder = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true);

    if let Some(default_value) = default {
        input_builder = input_builder.default(default_value.to_string());
    }

    input_builder
        .interact_text()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

/// Prompt for yes/no with optional default
pub fn prompt_yes_no(prompt: &str, default: Option<bool>) -> Result<bool> {
    let mut confirm_builder = Confirm::new().with_prompt(prompt);

    if let Some(default_value) = default {
        confirm_builder = confirm_builder.default(default_value);
    }

    confirm_builder
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read confirmation: {}", e))
}

/// Pick one of `items`; `None` when the user backs out with Esc or q
pub fn prompt_select<T: ToString>(prompt: &str, items: &[T], default: usize) -> Result<Option<usize>> {
    if items.is_empty() {
        return Ok(None);
    }

    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(default.min(items.len() - 1))
        .interact_opt()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read selection: {}", e))
}
