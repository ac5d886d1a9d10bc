use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

use crate::optimizer::constants::{DEFAULT_MAX_ADDITIONAL, DEFAULT_MULTI_START, DEFAULT_SEED};

/// Menu optimizer: picks cafeteria menus whose totals land closest to your nutrition targets.
#[derive(Parser, Debug)]
#[command(name = "menu_optimizer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory holding one `<YYYY-MM-DD>.json` catalog per day.
    #[arg(long, global = true, default_value = "menus")]
    pub catalog_dir: PathBuf,

    /// Path to the saved fixed/excluded selection.
    #[arg(long, global = true, default_value = "selection.json")]
    pub selection: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Choose menus for a day that best match the targets.
    Optimize(OptimizeArgs),

    /// List a day's menus with their selection state.
    Menus {
        /// Day to show (YYYY-MM-DD). Defaults to the nearest weekday.
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List days that have a catalog.
    Dates,

    /// Change a menu's saved state. Cycles normal -> fixed -> excluded without a flag.
    #[command(group(ArgGroup::new("state").args(["fixed", "excluded", "normal"])))]
    Select {
        /// Menu name (fuzzy suggestions are shown for unknown names).
        name: String,

        /// Always include this menu.
        #[arg(long)]
        fixed: bool,

        /// Never pick this menu.
        #[arg(long)]
        excluded: bool,

        /// Clear any saved state for this menu.
        #[arg(long)]
        normal: bool,

        /// Day whose catalog is used to check the name.
        #[arg(short, long)]
        date: Option<String>,
    },
}

#[derive(Args, Debug, Default)]
pub struct OptimizeArgs {
    /// Day to optimize (YYYY-MM-DD). Defaults to the nearest weekday.
    #[arg(short, long)]
    pub date: Option<String>,

    /// Nutrition target as KEY=VALUE, repeatable (e.g. --target エネルギー=650).
    #[arg(short, long = "target", value_parser = parse_target)]
    pub targets: Vec<(String, f64)>,

    /// Menu to always include, on top of the saved selection.
    #[arg(long)]
    pub fixed: Vec<String>,

    /// Menu to never pick, on top of the saved selection.
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Menu to skip for this run only; not saved.
    #[arg(long)]
    pub temp_exclude: Vec<String>,

    /// Maximum number of menus added beyond the fixed ones.
    #[arg(short, long, default_value_t = DEFAULT_MAX_ADDITIONAL)]
    pub max_additional: usize,

    /// Number of greedy + local search restarts.
    #[arg(long, default_value_t = DEFAULT_MULTI_START)]
    pub multi_start: usize,

    /// Seed for the randomized restarts.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// JSON file overriding nutrient groups and tolerances.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the result as JSON to this file.
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Write the result as CSV to this file.
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Ask for targets and fixed/excluded menus interactively.
    #[arg(short, long)]
    pub interactive: bool,
}

impl Default for Command {
    fn default() -> Self {
        Command::Optimize(OptimizeArgs {
            max_additional: DEFAULT_MAX_ADDITIONAL,
            multi_start: DEFAULT_MULTI_START,
            seed: DEFAULT_SEED,
            interactive: true,
            ..OptimizeArgs::default()
        })
    }
}

/// Parse `KEY=VALUE` into a positive target.
pub fn parse_target(s: &str) -> Result<(String, f64), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing nutrient name in '{}'", s));
    }

    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", value.trim()))?;

    if !value.is_finite() || value <= 0.0 {
        return Err(format!("target for '{}' must be positive", key));
    }

    Ok((key.to_string(), value))
}
