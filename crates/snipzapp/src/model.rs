//! # Domain Model: Categories, Scripts and the Catalog
//!
//! A [`Catalog`] is an ordered list of [`Category`] values, each holding an
//! ordered list of [`Script`] values. Order is meaningful everywhere: it is the
//! navigation order for categories and the display order for scripts, and it is
//! what ends up on disk.
//!
//! ## On-Disk Shape
//!
//! The catalog serializes as a single JSON object. Keys are category names in
//! category order, values are arrays of script objects in display order:
//!
//! ```text
//! {
//!     "Networking": [
//!         {
//!             "script_type": "Powershell",
//!             "script_name": "Ping",
//!             "script_value": "Test-Connection {{Host}}",
//!             "script_description": ""
//!         }
//!     ]
//! }
//! ```
//!
//! `Serialize`/`Deserialize` for [`Catalog`] are written by hand so that the key
//! order of the document is the category order, in both directions.
//!
//! ## Identity
//!
//! The file has no ids. Every [`Script`] receives a fresh [`Uuid`] when it is
//! created or loaded, which stays stable for the lifetime of the process. Callers
//! can address a script either by that id or by its current name and value, see
//! [`ScriptSelector`].

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Script types offered when creating a script. Any other text is accepted too.
pub const DEFAULT_SCRIPT_TYPES: &[&str] = &[
    "ASP.NET",
    "Bash",
    "C",
    "C#",
    "C++",
    "CSS",
    "Cmd",
    "Dart",
    "Django",
    "Docker File",
    "Go",
    "HTML",
    "HTTP",
    "JSON",
    "JSP",
    "JSX",
    "Java",
    "Javascript",
    "Lua",
    "Other",
    "PHP",
    "Perl",
    "Powershell",
    "Python",
    "Ruby",
    "SQL",
    "Swift",
    "Text",
    "Typescript",
    "VB",
    "VBScript",
    "XML",
    "YAML",
];

pub const CATCH_ALL_TYPE: &str = "Other";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    #[serde(skip, default = "Uuid::new_v4")]
    pub id: Uuid,
    pub script_type: String,
    #[serde(rename = "script_name")]
    pub name: String,
    #[serde(rename = "script_value")]
    pub value: String,
    #[serde(rename = "script_description", default)]
    pub description: String,
}

impl Script {
    pub fn new(draft: ScriptDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            script_type: draft.script_type,
            name: draft.name,
            value: draft.value,
            description: draft.description,
        }
    }

    /// The user-editable fields of this script, without its id.
    pub fn draft(&self) -> ScriptDraft {
        ScriptDraft {
            script_type: self.script_type.clone(),
            name: self.name.clone(),
            value: self.value.clone(),
            description: self.description.clone(),
        }
    }

    pub(crate) fn apply(&mut self, draft: ScriptDraft) {
        self.script_type = draft.script_type;
        self.name = draft.name;
        self.value = draft.value;
        self.description = draft.description;
    }
}

/// The fields a caller supplies to create or replace a script.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScriptDraft {
    pub script_type: String,
    pub name: String,
    pub value: String,
    pub description: String,
}

impl ScriptDraft {
    pub fn new(
        script_type: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            script_type: script_type.into(),
            name: name.into(),
            value: value.into(),
            description: description.into(),
        }
    }
}

/// How a script is located inside its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptSelector {
    Id(Uuid),
    /// Exact current name and value. The first script matching both wins.
    Match { name: String, value: String },
}

impl ScriptSelector {
    pub fn by_match(name: impl Into<String>, value: impl Into<String>) -> Self {
        ScriptSelector::Match {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn matches(&self, script: &Script) -> bool {
        match self {
            ScriptSelector::Id(id) => script.id == *id,
            ScriptSelector::Match { name, value } => script.name == *name && script.value == *value,
        }
    }
}

impl fmt::Display for ScriptSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptSelector::Id(id) => write!(f, "{}", id),
            ScriptSelector::Match { name, .. } => write!(f, "\"{}\"", name),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub name: String,
    pub scripts: Vec<Script>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scripts: Vec::new(),
        }
    }

    pub fn position_of(&self, selector: &ScriptSelector) -> Option<usize> {
        self.scripts.iter().position(|s| selector.matches(s))
    }

    pub fn find(&self, selector: &ScriptSelector) -> Option<&Script> {
        self.scripts.iter().find(|s| selector.matches(s))
    }

    pub fn has_script_named(&self, name: &str) -> bool {
        self.scripts.iter().any(|s| s.name == name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_categories(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub(crate) fn categories_mut(&mut self) -> &mut Vec<Category> {
        &mut self.categories
    }

    pub fn names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// An empty catalog is the first-start state.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn script_count(&self) -> usize {
        self.categories.iter().map(|c| c.scripts.len()).sum()
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in &self.categories {
            map.serialize_entry(&category.name, &category.scripts)?;
        }
        map.end()
    }
}

struct CatalogVisitor;

impl<'de> Visitor<'de> for CatalogVisitor {
    type Value = Catalog;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object mapping category names to arrays of scripts")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Catalog, A::Error> {
        let mut categories: Vec<Category> = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((name, scripts)) = access.next_entry::<String, Vec<Script>>()? {
            if categories.iter().any(|c| c.name == name) {
                return Err(de::Error::custom(format!("duplicate category `{}`", name)));
            }
            categories.push(Category { name, scripts });
        }
        Ok(Catalog { categories })
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CatalogVisitor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            other => Err(format!("Unknown direction: {}", other)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(name: &str, value: &str) -> Script {
        Script::new(ScriptDraft::new("Bash", name, value, ""))
    }

    #[test]
    fn deserialize_keeps_document_key_order() {
        let json = r#"{"Zeta": [], "Alpha": [], "Mid": []}"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.names(), vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn serialize_uses_file_field_names() {
        let mut cat = Category::new("Shell");
        cat.scripts.push(script("List", "ls -la"));
        let catalog = Catalog::from_categories(vec![cat]);

        let json = serde_json::to_string(&catalog).unwrap();
        assert_eq!(
            json,
            r#"{"Shell":[{"script_type":"Bash","script_name":"List","script_value":"ls -la","script_description":""}]}"#
        );
    }

    #[test]
    fn missing_description_reads_as_empty() {
        let json = r#"{"Shell": [{"script_type": "Bash", "script_name": "a", "script_value": "b"}]}"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.get("Shell").unwrap().scripts[0].description, "");
    }

    #[test]
    fn missing_value_is_rejected() {
        let json = r#"{"Shell": [{"script_type": "Bash", "script_name": "a"}]}"#;
        assert!(serde_json::from_str::<Catalog>(json).is_err());
    }

    #[test]
    fn duplicate_category_keys_are_rejected() {
        let json = r#"{"Shell": [], "Shell": []}"#;
        let err = serde_json::from_str::<Catalog>(json).unwrap_err();
        assert!(err.to_string().contains("duplicate category"));
    }

    #[test]
    fn loaded_scripts_get_distinct_ids() {
        let json = r#"{"Shell": [
            {"script_type": "Bash", "script_name": "a", "script_value": "x", "script_description": ""},
            {"script_type": "Bash", "script_name": "b", "script_value": "y", "script_description": ""}
        ]}"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();
        let scripts = &catalog.get("Shell").unwrap().scripts;
        assert_ne!(scripts[0].id, scripts[1].id);
    }

    #[test]
    fn selector_by_match_needs_name_and_value() {
        let s = script("List", "ls");
        assert!(ScriptSelector::by_match("List", "ls").matches(&s));
        assert!(!ScriptSelector::by_match("List", "ls -la").matches(&s));
        assert!(ScriptSelector::Id(s.id).matches(&s));
    }

    #[test]
    fn direction_parses_case_insensitively() {
        assert_eq!("UP".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!("down".parse::<Direction>().unwrap(), Direction::Down);
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn default_types_include_catch_all() {
        assert!(DEFAULT_SCRIPT_TYPES.contains(&CATCH_ALL_TYPE));
    }
}
