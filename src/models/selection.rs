use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// How the caller has marked a single menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuState {
    /// Left to the optimizer.
    Normal,
    /// Must appear in the result.
    Fixed,
    /// Must not appear in the result.
    Excluded,
}

impl fmt::Display for MenuState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuState::Normal => "normal",
            MenuState::Fixed => "fixed",
            MenuState::Excluded => "excluded",
        };
        f.write_str(label)
    }
}

/// Caller-forced inclusions and exclusions for one optimization call.
///
/// The editing methods keep `fixed` and `excluded` disjoint. A state built by
/// hand may overlap; the optimizer then treats the name as fixed and reports
/// the conflict.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    #[serde(default)]
    pub fixed: BTreeSet<String>,

    #[serde(default)]
    pub excluded: BTreeSet<String>,
}

impl SelectionState {
    pub fn new<F, E, S1, S2>(fixed: F, excluded: E) -> Self
    where
        F: IntoIterator<Item = S1>,
        E: IntoIterator<Item = S2>,
        S1: Into<String>,
        S2: Into<String>,
    {
        Self {
            fixed: fixed.into_iter().map(Into::into).collect(),
            excluded: excluded.into_iter().map(Into::into).collect(),
        }
    }

    pub fn state_of(&self, name: &str) -> MenuState {
        if self.fixed.contains(name) {
            MenuState::Fixed
        } else if self.excluded.contains(name) {
            MenuState::Excluded
        } else {
            MenuState::Normal
        }
    }

    pub fn set_fixed(&mut self, name: &str) {
        self.excluded.remove(name);
        self.fixed.insert(name.to_string());
    }

    pub fn set_excluded(&mut self, name: &str) {
        self.fixed.remove(name);
        self.excluded.insert(name.to_string());
    }

    pub fn set_normal(&mut self, name: &str) {
        self.fixed.remove(name);
        self.excluded.remove(name);
    }

    /// Apply a state explicitly.
    pub fn set_state(&mut self, name: &str, state: MenuState) {
        match state {
            MenuState::Normal => self.set_normal(name),
            MenuState::Fixed => self.set_fixed(name),
            MenuState::Excluded => self.set_excluded(name),
        }
    }

    /// Advance normal -> fixed -> excluded -> normal. Returns the new state.
    pub fn cycle(&mut self, name: &str) -> MenuState {
        let next = match self.state_of(name) {
            MenuState::Normal => MenuState::Fixed,
            MenuState::Fixed => MenuState::Excluded,
            MenuState::Excluded => MenuState::Normal,
        };
        self.set_state(name, next);
        next
    }

    /// Copy with extra one-shot exclusions. Fixed names are never demoted.
    pub fn with_temporary_exclusions<I, S>(&self, names: I) -> SelectionState
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut copy = self.clone();
        for name in names {
            let name = name.into();
            if !copy.fixed.contains(&name) {
                copy.excluded.insert(name);
            }
        }
        copy
    }

    /// Names present in both sets.
    pub fn overlap(&self) -> impl Iterator<Item = &str> {
        self.fixed.intersection(&self.excluded).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fixed.is_empty() && self.excluded.is_empty()
    }
}
