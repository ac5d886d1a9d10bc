use clap::Parser;
use std::path::Path;

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use menu_optimizer_rs::catalog::{
    load_selection, nearest_weekday, parse_date, save_selection, to_date_label, CatalogProvider,
    JsonDirCatalog,
};
use menu_optimizer_rs::cli::{Cli, Command, OptimizeArgs};
use menu_optimizer_rs::error::{OptimizerError, Result};
use menu_optimizer_rs::interface::{
    display_dates, display_menu_list, display_result, prompt_menu_names, prompt_targets,
    prompt_yes_no, require_menu_name, suggest_menu_names, write_result_csv, write_result_json,
};
use menu_optimizer_rs::logging;
use menu_optimizer_rs::models::{MenuState, Nutrition, SelectionState};
use menu_optimizer_rs::optimizer::{load_distance_config, optimize, DistanceConfig, OptimizeOptions};

fn main() {
    logging::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let catalog = JsonDirCatalog::new(&cli.catalog_dir);
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Optimize(args) => cmd_optimize(&catalog, &cli.selection, args),
        Command::Menus { date } => cmd_menus(&catalog, &cli.selection, date.as_deref()),
        Command::Dates => cmd_dates(&catalog),
        Command::Select {
            name,
            fixed,
            excluded,
            normal,
            date,
        } => {
            let state = if fixed {
                Some(MenuState::Fixed)
            } else if excluded {
                Some(MenuState::Excluded)
            } else if normal {
                Some(MenuState::Normal)
            } else {
                None
            };
            cmd_select(&catalog, &cli.selection, &name, state, date.as_deref())
        }
    }
}

/// Explicit date, or the nearest day the cafeteria is open.
fn resolve_date(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(s) => parse_date(s),
        None => Ok(nearest_weekday(Local::now().date_naive())),
    }
}

/// Saved selection, or an empty one when nothing has been saved yet.
fn read_selection(path: &Path) -> Result<SelectionState> {
    if path.exists() {
        load_selection(path)
    } else {
        Ok(SelectionState::default())
    }
}

/// Choose menus for a day and show the result.
fn cmd_optimize(catalog: &JsonDirCatalog, selection_path: &Path, args: OptimizeArgs) -> Result<()> {
    let date = resolve_date(args.date.as_deref())?;
    let items = catalog.get_catalog(date)?;

    println!("Loaded {} menus for {}", items.len(), to_date_label(date));

    let mut selection = read_selection(selection_path)?;
    for name in &args.fixed {
        selection.set_fixed(name);
    }
    for name in &args.exclude {
        selection.set_excluded(name);
    }

    let mut targets: Nutrition = args.targets.iter().map(|(k, v)| (k.as_str(), *v)).collect();

    if args.interactive {
        if targets.is_empty() {
            targets = prompt_targets()?;
        }
        for name in prompt_menu_names("Menu to always include", &items)? {
            selection.set_fixed(&name);
        }
        for name in prompt_menu_names("Menu to skip", &items)? {
            selection.set_excluded(&name);
        }
    }

    if targets.is_empty() {
        return Err(OptimizerError::InvalidInput(
            "at least one positive --target KEY=VALUE is required".to_string(),
        ));
    }

    let config = match &args.config {
        Some(path) => load_distance_config(path)?,
        None => DistanceConfig::default(),
    };
    let options = OptimizeOptions::default()
        .with_max_additional(args.max_additional)
        .with_multi_start(args.multi_start)
        .with_seed(args.seed);

    // Temporary exclusions apply to this run only and never reach the saved file.
    let effective = selection.with_temporary_exclusions(args.temp_exclude.iter().cloned());
    let result = optimize(&items, &targets, &effective, &options, &config);

    display_result(&result);

    if let Some(path) = &args.json {
        write_result_json(&result, path)?;
        println!("Result written to {}", path.display());
    }
    if let Some(path) = &args.csv {
        write_result_csv(&result, path)?;
        println!("Result written to {}", path.display());
    }

    if args.interactive && prompt_yes_no("Save fixed/excluded menus?", false)? {
        save_selection(selection_path, &selection)?;
        println!("Selection saved.");
    }

    Ok(())
}

/// List a day's catalog.
fn cmd_menus(catalog: &JsonDirCatalog, selection_path: &Path, date: Option<&str>) -> Result<()> {
    let date = resolve_date(date)?;
    let items = catalog.get_catalog(date)?;
    let selection = read_selection(selection_path)?;

    display_menu_list(&items, date, &selection);
    Ok(())
}

/// List days with a catalog.
fn cmd_dates(catalog: &JsonDirCatalog) -> Result<()> {
    let dates = catalog.available_dates()?;
    info!(root = %catalog.root().display(), days = dates.len(), "catalog dates scanned");
    display_dates(&dates);
    Ok(())
}

/// Edit the saved selection for one menu.
fn cmd_select(
    catalog: &JsonDirCatalog,
    selection_path: &Path,
    name: &str,
    state: Option<MenuState>,
    date: Option<&str>,
) -> Result<()> {
    let date = resolve_date(date)?;
    let items = match catalog.get_catalog(date) {
        Ok(items) => items,
        Err(OptimizerError::CatalogNotFound(day)) => {
            warn!(%day, "no catalog to check the name against");
            Vec::new()
        }
        Err(e) => return Err(e),
    };

    let resolved = match require_menu_name(name, &items) {
        Ok(resolved) => resolved,
        Err(e) => {
            let suggestions = suggest_menu_names(name, &items);
            if !suggestions.is_empty() {
                println!("'{}' is not on the menu for {}.", name, to_date_label(date));
                println!("Did you mean:");
                for (candidate, score) in &suggestions {
                    println!("  {} ({:.2})", candidate, score);
                }
            }
            return Err(e);
        }
    };

    let mut selection = read_selection(selection_path)?;
    let new_state = match state {
        Some(state) => {
            selection.set_state(&resolved, state);
            state
        }
        None => selection.cycle(&resolved),
    };

    save_selection(selection_path, &selection)?;
    println!("{} -> {}", resolved, new_state);

    Ok(())
}
