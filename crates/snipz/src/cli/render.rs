//! # Rendering
//!
//! Turns `CmdResult` pieces into terminal text. Every function returns a
//! `String` and never prints, so output can be tested without a terminal.
//!
//! Layout math (widths, truncation) is Unicode-aware via `unicode-width`.
//! In a script list each row is:
//!
//! ```text
//!   3. [Powershell] Get users ........... Get-ADUser -Filter *
//!   ^pos ^type       ^name (COL_NAME)     ^value, truncated to LINE_WIDTH
//! ```
//!
//! JSON output bypasses all of this: [`json`] serializes the structured value.

use super::styles::Palette;
use anyhow::Result;
use serde::Serialize;
use snipzapp::commands::{CategorySummary, CmdMessage, DisplayScript, MessageLevel};
use snipzapp::search::SearchGroup;
use snipzapp::settings::{SettingEntry, GEMINI_API_KEY};
use snipzapp::template::{extract_placeholders, segments, Segment};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
pub const COL_POSITION: usize = 4;
pub const COL_NAME: usize = 28;
pub const ELLIPSIS: &str = "…";

/// Cut `text` to at most `width` columns, ending in an ellipsis when cut.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let budget = width.saturating_sub(ELLIPSIS.width());
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str(ELLIPSIS);
    out
}

fn pad_to_width(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

/// Values are shown on one line in lists.
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Styles every `{{marker}}` in `value`.
pub fn highlight_placeholders(p: &Palette, value: &str) -> String {
    segments(value)
        .into_iter()
        .map(|segment| match segment {
            Segment::Text(text) => p.regular.apply_to(text).to_string(),
            Segment::Marker { name, raw } if !name.is_empty() => {
                p.placeholder.apply_to(raw).to_string()
            }
            Segment::Marker { raw, .. } => p.regular.apply_to(raw).to_string(),
        })
        .collect()
}

pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(format!("{}\n", serde_json::to_string_pretty(value)?))
}

pub fn messages(p: &Palette, messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => p.info.apply_to(&message.content),
            MessageLevel::Success => p.success.apply_to(&message.content),
            MessageLevel::Warning => p.warning.apply_to(&message.content),
            MessageLevel::Error => p.error.apply_to(&message.content),
        };
        out.push_str(&format!("{}\n", line));
    }
    out
}

pub fn categories(p: &Palette, categories: &[CategorySummary]) -> String {
    let mut out = String::new();
    for summary in categories {
        let position = format!("{}.", summary.position);
        let count = match summary.script_count {
            1 => "1 script".to_string(),
            n => format!("{} scripts", n),
        };
        out.push_str(&format!(
            "{} {} {}\n",
            p.position.apply_to(pad_to_width(&position, COL_POSITION)),
            p.category.apply_to(&summary.name),
            p.muted.apply_to(format!("({})", count)),
        ));
    }
    out
}

fn script_row(p: &Palette, display: &DisplayScript) -> String {
    let position = format!("{}.", display.position);
    let script_type = format!("[{}]", display.script.script_type);
    let name = truncate_to_width(&display.script.name, COL_NAME);

    let prefix_width = COL_POSITION + 1 + script_type.width() + 1 + COL_NAME + 1;
    let value = truncate_to_width(
        &single_line(&display.script.value),
        LINE_WIDTH.saturating_sub(prefix_width),
    );

    format!(
        "{} {} {} {}\n",
        p.position.apply_to(pad_to_width(&position, COL_POSITION)),
        p.script_type.apply_to(script_type),
        p.title.apply_to(pad_to_width(&name, COL_NAME)),
        highlight_placeholders(p, &value),
    )
}

/// A category header followed by its scripts.
pub fn script_list(p: &Palette, category: &str, scripts: &[DisplayScript]) -> String {
    let mut out = format!("{}\n", p.category.apply_to(category));
    for display in scripts {
        out.push_str(&script_row(p, display));
    }
    out
}

pub fn script_full(p: &Palette, display: &DisplayScript) -> String {
    let script = &display.script;
    let mut out = String::new();
    out.push_str(&format!(
        "{} {}\n",
        p.title.apply_to(&script.name),
        p.script_type.apply_to(format!("[{}]", script.script_type)),
    ));
    out.push_str(&format!(
        "{}\n",
        p.muted.apply_to(format!("{} #{}", display.category, display.position))
    ));
    if !script.description.is_empty() {
        out.push_str(&format!("\n{}\n", p.regular.apply_to(&script.description)));
    }
    out.push_str(&format!("\n{}\n", highlight_placeholders(p, &script.value)));

    let placeholders = extract_placeholders(&script.value);
    if !placeholders.is_empty() {
        out.push_str(&format!(
            "\n{} {}\n",
            p.faint.apply_to("placeholders:"),
            placeholders.join(", ")
        ));
    }
    out
}

/// Only visible hits are shown; categories without any are skipped.
pub fn search(p: &Palette, groups: &[SearchGroup]) -> String {
    let mut out = String::new();
    for group in groups.iter().filter(|g| g.visible_count() > 0) {
        out.push_str(&format!("{}\n", p.category.apply_to(&group.category)));
        for (index, hit) in group.hits.iter().enumerate() {
            if hit.visible {
                let display = DisplayScript::new(&group.category, index, hit.script.clone());
                out.push_str(&script_row(p, &display));
            }
        }
    }
    out
}

fn mask(value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        "*".repeat(8)
    }
}

pub fn settings(p: &Palette, entries: &[SettingEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let value = if entry.key == GEMINI_API_KEY {
            mask(&entry.value)
        } else {
            entry.value.clone()
        };
        out.push_str(&format!(
            "{}={}\n",
            p.title.apply_to(&entry.key),
            p.regular.apply_to(value)
        ));
    }
    out
}

pub fn types(p: &Palette, types: &[&str]) -> String {
    types
        .iter()
        .map(|t| format!("{}\n", p.script_type.apply_to(t)))
        .collect()
}
