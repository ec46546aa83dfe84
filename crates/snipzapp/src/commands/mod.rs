//! # Command Layer
//!
//! Each command lives in its own submodule as plain functions over a
//! [`CatalogStore`](crate::store::catalog_store::CatalogStore). Commands turn a
//! store operation into a structured [`CmdResult`]; the invariants themselves
//! live in the store.
//!
//! ## What Commands Do NOT Do
//!
//! - **Any I/O** beyond the store: no stdout, stderr or terminal concerns
//! - **Argument parsing**: that's the UI's job
//! - **User interaction**: no prompts. [`copy`] hands back a [`copy::PendingCopy`]
//!   and the UI asks for the values.
//!
//! ## Structured Returns
//!
//! [`CmdResult`] carries:
//! - `affected_scripts`: scripts created, changed or removed, as [`DisplayScript`]
//! - `listed_scripts`: scripts to display
//! - `search_groups`: per-category search hits, hidden ones included
//! - `categories`: category summaries in navigation order
//! - `settings`: settings entries (for the `settings` command)
//! - `messages`: leveled messages for the UI to show
//!
//! ## Command Modules
//!
//! - [`category`]: create, rename, delete, move and list categories
//! - [`script`]: create, update, delete, reorder, list and show scripts
//! - [`search`]: search one category or the whole catalog
//! - [`copy`]: prepare a script's value for the clipboard
//! - [`settings`]: read and write the settings file

use crate::model::{Category, Script};
use crate::search::SearchGroup;
use crate::settings::SettingEntry;
use serde::Serialize;

pub mod category;
pub mod copy;
pub mod script;
pub mod search;
pub mod settings;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A script together with where it is shown: its category and 1-based position.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayScript {
    pub category: String,
    pub position: usize,
    pub script: Script,
}

impl DisplayScript {
    pub fn new(category: impl Into<String>, index: usize, script: Script) -> Self {
        Self {
            category: category.into(),
            position: index + 1,
            script,
        }
    }

    pub fn list(category: &Category) -> Vec<DisplayScript> {
        category
            .scripts
            .iter()
            .enumerate()
            .map(|(i, s)| DisplayScript::new(&category.name, i, s.clone()))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub position: usize,
    pub script_count: usize,
}

#[derive(Debug, Default, Serialize)]
pub struct CmdResult {
    pub affected_scripts: Vec<DisplayScript>,
    pub listed_scripts: Vec<DisplayScript>,
    pub search_groups: Vec<SearchGroup>,
    pub categories: Vec<CategorySummary>,
    pub settings: Vec<SettingEntry>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_scripts(mut self, scripts: Vec<DisplayScript>) -> Self {
        self.affected_scripts = scripts;
        self
    }

    pub fn with_listed_scripts(mut self, scripts: Vec<DisplayScript>) -> Self {
        self.listed_scripts = scripts;
        self
    }

    pub fn with_categories(mut self, categories: Vec<CategorySummary>) -> Self {
        self.categories = categories;
        self
    }
}
