pub mod export;
pub mod prompts;
pub mod render;

pub use export::{write_result_csv, write_result_json};
pub use prompts::{
    prompt_menu_names, prompt_targets, prompt_yes_no, require_menu_name, resolve_menu_name,
    suggest_menu_names,
};
pub use render::{display_dates, display_menu_list, display_result};
