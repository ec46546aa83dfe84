//! Preparing a script value for the clipboard.
//!
//! A value without placeholders is ready as-is. Otherwise the command returns
//! a [`PendingCopy`] listing the names to ask for; the UI collects the answers
//! and calls [`PendingCopy::render`]. Nothing here touches the clipboard.

use crate::error::{Result, SnipzError};
use crate::model::ScriptSelector;
use crate::store::backend::StorageBackend;
use crate::store::catalog_store::CatalogStore;
use crate::template::{self, Bindings};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCopy {
    value: String,
    placeholders: Vec<String>,
}

impl PendingCopy {
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Distinct names, in first-occurrence order.
    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    /// Names not covered by `bindings`.
    pub fn unbound<'a>(&'a self, bindings: &'a Bindings) -> impl Iterator<Item = &'a str> {
        self.placeholders
            .iter()
            .filter(move |name| !bindings.contains_key(name.as_str()))
            .map(String::as_str)
    }

    pub fn render(&self, bindings: &Bindings) -> String {
        template::render(&self.value, bindings)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Ready(String),
    NeedsBindings(PendingCopy),
}

impl CopyOutcome {
    pub fn had_placeholders(&self) -> bool {
        matches!(self, CopyOutcome::NeedsBindings(_))
    }

    /// Final text, using `bindings` if the value is templated.
    pub fn finish(self, bindings: &Bindings) -> String {
        match self {
            CopyOutcome::Ready(text) => text,
            CopyOutcome::NeedsBindings(pending) => pending.render(bindings),
        }
    }
}

pub fn run<B: StorageBackend>(
    store: &CatalogStore<B>,
    category: &str,
    selector: &ScriptSelector,
) -> Result<CopyOutcome> {
    let script = store
        .category(category)
        .ok_or_else(|| SnipzError::NotFound(format!("category \"{}\"", category)))?
        .find(selector)
        .ok_or_else(|| {
            SnipzError::NotFound(format!("script {} in category \"{}\"", selector, category))
        })?;

    let placeholders = template::extract_placeholders(&script.value);
    if placeholders.is_empty() {
        return Ok(CopyOutcome::Ready(script.value.clone()));
    }
    tracing::debug!(
        category,
        script = %script.name,
        count = placeholders.len(),
        "script needs placeholder values"
    );
    Ok(CopyOutcome::NeedsBindings(PendingCopy {
        value: script.value.clone(),
        placeholders,
    }))
}
