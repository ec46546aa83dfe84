//! # Search
//!
//! Search never removes anything. Each script gets a `visible` flag and the
//! list keeps its original order, so clearing the query brings back the full
//! list exactly as it was.
//!
//! A script is visible when the query is empty, or when any of these holds:
//! - the query is a substring of the script type (case-sensitive)
//! - the query is a substring of the value (case-sensitive)
//! - the *capitalized* query (first letter upper case, the rest lower case) is
//!   a substring of the name
//!
//! The name rule differs from the other two: searching
//! `get` finds a script named `Get users` but not one whose type is `Get`.

use crate::model::{Catalog, Script};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub script: Script,
    pub visible: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchGroup {
    pub category: String,
    pub hits: Vec<SearchHit>,
}

impl SearchGroup {
    pub fn visible_count(&self) -> usize {
        self.hits.iter().filter(|h| h.visible).count()
    }
}

/// First character upper-cased, the rest lower-cased.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

pub fn is_match(script: &Script, query: &str) -> bool {
    query.is_empty()
        || script.script_type.contains(query)
        || script.value.contains(query)
        || script.name.contains(&capitalize(query))
}

pub fn filter(scripts: &[Script], query: &str) -> Vec<SearchHit> {
    scripts
        .iter()
        .map(|script| SearchHit {
            visible: is_match(script, query),
            script: script.clone(),
        })
        .collect()
}

/// Runs [`filter`] over every category, in category order.
pub fn filter_catalog(catalog: &Catalog, query: &str) -> Vec<SearchGroup> {
    catalog
        .categories()
        .iter()
        .map(|category| SearchGroup {
            category: category.name.clone(),
            hits: filter(&category.scripts, query),
        })
        .collect()
}

pub fn visible(hits: &[SearchHit]) -> impl Iterator<Item = &Script> {
    hits.iter().filter(|h| h.visible).map(|h| &h.script)
}
