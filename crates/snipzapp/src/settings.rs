//! # Settings
//!
//! Settings live next to the catalog in a plain `KEY=VALUE` file
//! (`profile.env`). The core knows three keys:
//!
//! | Key | Default | Values |
//! |-----|---------|--------|
//! | `GEMINI_ENABLED` | `False` | `True` / `False` (any case on input) |
//! | `GEMINI_API_KEY` | empty | any string |
//! | `THEME` | `dark` | `dark` / `light` |
//!
//! The first two only matter to an external description generator; the core
//! stores them and nothing more.
//!
//! ## File Handling
//!
//! - A missing file is created with the defaults above.
//! - Unknown keys are kept, in place, across rewrites.
//! - Lines without `=` are kept verbatim, and so are entries `set` never touched.
//! - Setting an existing key rewrites that line; a new key is appended.
//! - Only the first `=` splits key from value, so values may contain `=`.

use crate::error::{Result, SnipzError};
use crate::store::fs_backend::write_atomically;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

pub const GEMINI_ENABLED: &str = "GEMINI_ENABLED";
pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const THEME: &str = "THEME";

pub const KNOWN_KEYS: &[&str] = &[GEMINI_ENABLED, GEMINI_API_KEY, THEME];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl FromStr for Theme {
    type Err = SnipzError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(SnipzError::Validation(format!(
                "THEME must be \"dark\" or \"light\", got \"{}\"",
                other
            ))),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Dark => write!(f, "dark"),
            Theme::Light => write!(f, "light"),
        }
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(SnipzError::Validation(format!(
            "GEMINI_ENABLED must be True or False, got \"{}\"",
            other
        ))),
    }
}

fn format_flag(flag: bool) -> &'static str {
    if flag {
        "True"
    } else {
        "False"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    /// `raw` holds the line as read; it is dropped once the value is set.
    Entry {
        key: String,
        value: String,
        raw: Option<String>,
    },
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingEntry {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    lines: Vec<Line>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lines: vec![
                entry(GEMINI_ENABLED, format_flag(false)),
                entry(GEMINI_API_KEY, ""),
                entry(THEME, &Theme::Dark.to_string()),
            ],
        }
    }
}

fn entry(key: &str, value: &str) -> Line {
    Line::Entry {
        key: key.to_string(),
        value: value.to_string(),
        raw: None,
    }
}

impl Settings {
    pub fn parse(text: &str) -> Self {
        let lines = text
            .lines()
            .map(|raw| match raw.trim().split_once('=') {
                Some((key, value)) if !key.is_empty() => Line::Entry {
                    key: key.to_string(),
                    value: value.to_string(),
                    raw: Some(raw.to_string()),
                },
                _ => Line::Raw(raw.to_string()),
            })
            .collect();
        Self { lines }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            match line {
                Line::Entry { raw: Some(raw), .. } | Line::Raw(raw) => out.push_str(raw),
                Line::Entry { key, value, .. } => {
                    out.push_str(key);
                    out.push('=');
                    out.push_str(value);
                }
            }
            out.push('\n');
        }
        out
    }

    /// Fails with `NotFound` if the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SnipzError::NotFound(format!(
                "settings file {}",
                path.display()
            )));
        }
        let content = fs::read_to_string(path).map_err(SnipzError::Io)?;
        Ok(Self::parse(&content))
    }

    /// Load the settings, creating the file with defaults if it is missing.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load(path);
        }
        let settings = Self::default();
        settings.save(path)?;
        tracing::info!(path = %path.display(), "settings file created with defaults");
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => std::path::PathBuf::from("."),
        };
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(SnipzError::Io)?;
        }
        let tmp = dir.join(format!(".profile-{}.tmp", uuid::Uuid::new_v4()));
        write_atomically(&tmp, path, &self.render())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.lines.iter().find_map(|line| match line {
            Line::Entry { key: k, value, .. } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    /// Set a key, validating and normalizing known ones.
    /// Returns `true` if the key already existed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<bool> {
        if key.is_empty() || key.contains('=') {
            return Err(SnipzError::Validation(format!(
                "Invalid settings key \"{}\"",
                key
            )));
        }
        if value.contains('\n') {
            return Err(SnipzError::Validation(
                "Settings values must be a single line".to_string(),
            ));
        }
        let normalized = match key {
            GEMINI_ENABLED => format_flag(parse_flag(value)?).to_string(),
            THEME => value.parse::<Theme>()?.to_string(),
            _ => value.to_string(),
        };

        for line in &mut self.lines {
            if let Line::Entry {
                key: k,
                value: v,
                raw,
            } = line
            {
                if k == key {
                    *v = normalized;
                    *raw = None;
                    return Ok(true);
                }
            }
        }
        self.lines.push(entry(key, &normalized));
        Ok(false)
    }

    pub fn entries(&self) -> Vec<SettingEntry> {
        self.lines
            .iter()
            .filter_map(|line| match line {
                Line::Entry { key, value, .. } => Some(SettingEntry {
                    key: key.clone(),
                    value: value.clone(),
                }),
                Line::Raw(_) => None,
            })
            .collect()
    }

    /// Invalid or missing values read as `false`.
    pub fn gemini_enabled(&self) -> bool {
        self.get(GEMINI_ENABLED)
            .and_then(|v| parse_flag(v).ok())
            .unwrap_or(false)
    }

    pub fn gemini_api_key(&self) -> &str {
        self.get(GEMINI_API_KEY).unwrap_or("")
    }

    /// Invalid or missing values read as the default theme.
    pub fn theme(&self) -> Theme {
        self.get(THEME)
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }
}
