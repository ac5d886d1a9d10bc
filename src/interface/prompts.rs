use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::error::{OptimizerError, Result};
use crate::models::{MenuItem, Nutrition};
use crate::optimizer::constants::DEFAULT_TARGETS;

/// Minimum Jaro-Winkler similarity for a name suggestion.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

/// Maximum number of suggestions offered for one name.
pub const MAX_SUGGESTIONS: usize = 5;

/// Exact (case-insensitive) match of `input` against catalog names.
pub fn resolve_menu_name<'a>(input: &str, items: &'a [MenuItem]) -> Option<&'a str> {
    let needle = input.trim().to_lowercase();
    items
        .iter()
        .find(|m| m.name.to_lowercase() == needle)
        .map(|m| m.name.as_str())
}

/// Catalog spelling of `input` for saving in the selection.
///
/// Without a catalog to check against the name is taken as typed; otherwise
/// an unknown name is [`OptimizerError::MenuNotFound`].
pub fn require_menu_name(input: &str, items: &[MenuItem]) -> Result<String> {
    match resolve_menu_name(input, items) {
        Some(name) => Ok(name.to_string()),
        None if items.is_empty() => Ok(input.trim().to_string()),
        None => Err(OptimizerError::MenuNotFound(input.trim().to_string())),
    }
}

/// Catalog names similar to `input`, best first.
pub fn suggest_menu_names<'a>(input: &str, items: &'a [MenuItem]) -> Vec<(&'a str, f64)> {
    let needle = input.trim().to_lowercase();
    let mut candidates: Vec<(&str, f64)> = items
        .iter()
        .map(|m| (m.name.as_str(), jaro_winkler(&m.name.to_lowercase(), &needle)))
        .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    candidates.truncate(MAX_SUGGESTIONS);
    candidates
}

/// Parse a user-entered target value. Empty or 0 means "skip this nutrient".
pub fn parse_target_value(input: &str) -> Result<Option<f64>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    let value: f64 = input
        .parse()
        .map_err(|_| OptimizerError::InvalidInput(format!("Invalid number: {}", input)))?;

    if !value.is_finite() || value < 0.0 {
        return Err(OptimizerError::InvalidInput(format!(
            "Target must be a positive number: {}",
            input
        )));
    }

    Ok((value > 0.0).then_some(value))
}

/// Prompt for a target per default nutrient.
pub fn prompt_targets() -> Result<Nutrition> {
    let mut targets = Nutrition::new();

    for (key, default) in DEFAULT_TARGETS {
        let input: String = Input::new()
            .with_prompt(format!("Target for {} (0 to skip)", key))
            .default(default.to_string())
            .interact_text()?;

        if let Some(value) = parse_target_value(&input)? {
            targets.insert(*key, value);
        }
    }

    Ok(targets)
}

/// Pick one of the suggested names, or none.
fn choose_suggestion<'a>(input: &str, suggestions: &[(&'a str, f64)]) -> Result<Option<&'a str>> {
    let mut options: Vec<String> = suggestions
        .iter()
        .map(|(name, score)| format!("{} ({:.0}% match)", name, score * 100.0))
        .collect();
    options.push(format!("Skip '{}'", input));

    let picked = Select::new()
        .with_prompt(format!("'{}' is not on the menu. Use one of these?", input))
        .items(&options)
        .default(0)
        .interact()?;

    Ok(suggestions.get(picked).map(|(name, _)| *name))
}

/// Read menu names until an empty line, resolving each against the catalog.
///
/// Exact (case-insensitive) names are taken as is; anything else is offered
/// the closest catalog names to choose from.
pub fn prompt_menu_names(prompt: &str, items: &[MenuItem]) -> Result<Vec<String>> {
    let mut names: Vec<String> = Vec::new();

    loop {
        let input: String = Input::new()
            .with_prompt(format!("{} (empty line to finish)", prompt))
            .allow_empty(true)
            .interact_text()?;
        let input = input.trim();
        if input.is_empty() {
            return Ok(names);
        }

        let resolved = match resolve_menu_name(input, items) {
            Some(name) => Some(name),
            None => {
                let suggestions = suggest_menu_names(input, items);
                if suggestions.is_empty() {
                    println!("  nothing on today's menu looks like '{}'", input);
                    None
                } else {
                    choose_suggestion(input, &suggestions)?
                }
            }
        };

        if let Some(name) = resolved {
            if names.iter().any(|n| n == name) {
                println!("  {} is already listed", name);
            } else {
                println!("  + {}", name);
                names.push(name.to_string());
            }
        }
    }
}

/// Ask a yes/no question; Esc answers with `default`.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    let answer = Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact_opt()?;
    Ok(answer.unwrap_or(default))
}
