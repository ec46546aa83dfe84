use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, SnipzError};
use crate::settings::{SettingEntry, Settings};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsAction {
    ShowAll,
    ShowKey(String),
    Set { key: String, value: String },
}

pub fn run(path: &Path, action: SettingsAction) -> Result<CmdResult> {
    let mut settings = Settings::load_or_create(path)?;
    let mut result = CmdResult::default();

    match action {
        SettingsAction::ShowAll => {
            result.settings = settings.entries();
        }
        SettingsAction::ShowKey(key) => {
            let value = settings
                .get(&key)
                .ok_or_else(|| SnipzError::NotFound(format!("setting \"{}\"", key)))?;
            result.settings.push(SettingEntry {
                key: key.clone(),
                value: value.to_string(),
            });
        }
        SettingsAction::Set { key, value } => {
            let existed = settings.set(&key, &value)?;
            settings.save(path)?;
            // Normalized by `set`, so read it back.
            let stored = settings.get(&key).unwrap_or_default().to_string();
            tracing::info!(key = %key, "setting updated");
            let verb = if existed { "updated" } else { "added" };
            result.add_message(CmdMessage::success(format!(
                "Setting {}: {}={}",
                verb, key, stored
            )));
            result.settings.push(SettingEntry { key, value: stored });
        }
    }

    Ok(result)
}
