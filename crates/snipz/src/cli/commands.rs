//! # CLI Layer
//!
//! The only place in the workspace that:
//! - Knows about terminal I/O (stdout, stderr, stdin)
//! - Talks to the clipboard
//! - Parses arguments
//! - Formats output for humans
//!
//! `run` resolves the data directory, installs logging, opens the catalog and
//! hands the parsed command to a handler. Handlers call [`SnipzApi`] and print
//! what [`render`] makes of the result.

use super::logging;
use super::prompt;
use super::render;
use super::setup::{build_command, CategoryCommands, Cli, Commands, CompletionShell, OutputFormat};
use super::styles::{palette, Palette};
use crate::clipboard::copy_to_clipboard;
use anyhow::{bail, Context, Result};
use clap::Parser;
use clap_complete::{generate, Shell};
use serde_json::json;
use snipzapp::api::SnipzApi;
use snipzapp::commands::copy::CopyOutcome;
use snipzapp::commands::settings::SettingsAction;
use snipzapp::commands::{CmdMessage, CmdResult};
use snipzapp::init::{self, SnipzPaths};
use snipzapp::model::{Direction, ScriptDraft, DEFAULT_SCRIPT_TYPES};
use snipzapp::settings::Settings;
use snipzapp::store::fs_backend::FsBackend;
use snipzapp::template::Bindings;
use std::io::{IsTerminal, Read};

struct AppState {
    api: SnipzApi<FsBackend>,
    palette: &'static Palette,
    output: OutputFormat,
}

impl AppState {
    fn json(&self) -> bool {
        self.output == OutputFormat::Json
    }

    /// Print a command result. `body` renders the data part for the terminal.
    fn print(&self, result: &CmdResult, body: impl FnOnce(&Palette, &CmdResult) -> String) -> Result<()> {
        if self.json() {
            print!("{}", render::json(result)?);
        } else {
            print!("{}", body(self.palette, result));
            print!("{}", render::messages(self.palette, &result.messages));
        }
        Ok(())
    }

    fn print_messages(&self, result: &CmdResult) -> Result<()> {
        self.print(result, |_, _| String::new())
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Completions need neither the data directory nor logging.
    if let Some(Commands::Completions { shell }) = &cli.command {
        print_completions(*shell);
        return Ok(());
    }

    let paths = init::resolve(cli.data_dir.clone())?;
    let _log_guard = logging::init(cli.verbose, &paths.log_file);
    tracing::debug!(data_dir = %paths.data_dir.display(), "starting");

    let state = create_app_state(&cli, paths)?;
    dispatch(state, cli.command)
}

fn create_app_state(cli: &Cli, paths: SnipzPaths) -> Result<AppState> {
    let theme = match Settings::load_or_create(&paths.settings_file) {
        Ok(settings) => settings.theme(),
        Err(e) => {
            tracing::warn!(error = %e, "settings unavailable, using defaults");
            Default::default()
        }
    };
    let api = SnipzApi::open(paths).context("could not open the script catalog")?;
    Ok(AppState {
        api,
        palette: palette(theme),
        output: cli.output,
    })
}

fn dispatch(mut state: AppState, command: Option<Commands>) -> Result<()> {
    let Some(command) = command else {
        return handle_list(&state, None);
    };

    match command {
        Commands::Categories => {
            let result = state.api.list_categories()?;
            state.print(&result, |p, r| render::categories(p, &r.categories))
        }
        Commands::Category { action } => handle_category(&mut state, action),
        Commands::List { category } => handle_list(&state, category.as_deref()),
        Commands::Add {
            category,
            script_type,
            name,
            value,
            description,
        } => {
            let value = match value {
                Some(value) => value,
                None => read_value_from_stdin()?,
            };
            let draft = ScriptDraft::new(script_type, name, value, description);
            let result = state.api.create_script(&category, draft)?;
            state.print_messages(&result)
        }
        Commands::Edit {
            category,
            name,
            script_type,
            new_name,
            value,
            description,
        } => {
            let selector = state.api.select_by_name(&category, &name)?;
            let current = state.api.show_script(&category, &selector)?;
            let Some(existing) = current.listed_scripts.first() else {
                bail!("script \"{}\" vanished from \"{}\"", name, category);
            };
            let mut draft = existing.script.draft();
            if let Some(script_type) = script_type {
                draft.script_type = script_type;
            }
            if let Some(new_name) = new_name {
                draft.name = new_name;
            }
            if let Some(value) = value {
                draft.value = value;
            }
            if let Some(description) = description {
                draft.description = description;
            }
            let result = state.api.update_script(&category, &selector, draft)?;
            state.print_messages(&result)
        }
        Commands::Delete { category, name } => {
            let selector = state.api.select_by_name(&category, &name)?;
            let result = state.api.delete_script(&category, &selector)?;
            state.print_messages(&result)
        }
        Commands::Swap { category, from, to } => {
            let (from, to) = (to_index(from)?, to_index(to)?);
            let result = state.api.reorder_script(&category, from, to)?;
            state.print(&result, |p, r| render::script_list(p, &category, &r.listed_scripts))
        }
        Commands::Search { query, category } => {
            let result = state.api.search(category.as_deref(), &query)?;
            state.print(&result, |p, r| render::search(p, &r.search_groups))
        }
        Commands::Copy {
            category,
            name,
            bindings,
            print,
        } => handle_copy(&state, &category, &name, bindings, print),
        Commands::Show { category, name } => {
            let selector = state.api.select_by_name(&category, &name)?;
            let result = state.api.show_script(&category, &selector)?;
            state.print(&result, |p, r| {
                r.listed_scripts
                    .iter()
                    .map(|d| render::script_full(p, d))
                    .collect()
            })
        }
        Commands::Types => {
            if state.json() {
                print!("{}", render::json(DEFAULT_SCRIPT_TYPES)?);
            } else {
                print!("{}", render::types(state.palette, DEFAULT_SCRIPT_TYPES));
            }
            Ok(())
        }
        Commands::Config { key, value } => {
            let action = match (key, value) {
                (None, _) => SettingsAction::ShowAll,
                (Some(key), None) => SettingsAction::ShowKey(key),
                (Some(key), Some(value)) => SettingsAction::Set { key, value },
            };
            let result = state.api.settings(action)?;
            state.print(&result, |p, r| {
                if r.messages.is_empty() {
                    render::settings(p, &r.settings)
                } else {
                    String::new()
                }
            })
        }
        Commands::Completions { shell } => {
            print_completions(shell);
            Ok(())
        }
    }
}

fn handle_category(state: &mut AppState, action: CategoryCommands) -> Result<()> {
    let result = match action {
        CategoryCommands::Add { name } => state.api.create_category(&name)?,
        CategoryCommands::Rename { old_name, new_name } => {
            state.api.rename_category(&old_name, &new_name)?
        }
        CategoryCommands::Delete { name } => state.api.delete_category(&name)?,
        CategoryCommands::Up { name } => state.api.move_category(&name, Direction::Up)?,
        CategoryCommands::Down { name } => state.api.move_category(&name, Direction::Down)?,
    };
    state.print(&result, |p, r| render::categories(p, &r.categories))
}

fn handle_list(state: &AppState, category: Option<&str>) -> Result<()> {
    let result = state.api.list_scripts(category)?;
    let header = category
        .map(str::to_string)
        .or_else(|| {
            result
                .listed_scripts
                .first()
                .map(|d| d.category.clone())
                .or_else(|| state.api.catalog().names().first().map(|n| n.to_string()))
        })
        .unwrap_or_default();
    state.print(&result, |p, r| {
        if header.is_empty() {
            String::new()
        } else {
            render::script_list(p, &header, &r.listed_scripts)
        }
    })
}

fn handle_copy(
    state: &AppState,
    category: &str,
    name: &str,
    preset: Vec<(String, String)>,
    print_only: bool,
) -> Result<()> {
    let selector = state.api.select_by_name(category, name)?;
    let outcome = state.api.copy_for_use(category, &selector)?;

    let mut result = CmdResult::default();
    let text = match outcome {
        CopyOutcome::Ready(text) => text,
        CopyOutcome::NeedsBindings(pending) => {
            let mut bindings: Bindings = preset.into_iter().collect();
            if prompt::can_prompt() {
                prompt::fill_unbound(&pending, &mut bindings)
                    .context("could not read placeholder values")?;
            }
            let unbound: Vec<&str> = pending.unbound(&bindings).collect();
            if !unbound.is_empty() {
                result.add_message(CmdMessage::warning(format!(
                    "No value given for: {}",
                    unbound.join(", ")
                )));
            }
            pending.render(&bindings)
        }
    };

    let copied = if print_only {
        false
    } else {
        match copy_to_clipboard(&text) {
            Ok(()) => {
                tracing::info!(category, script = name, "copied to clipboard");
                result.add_message(CmdMessage::success(format!("Copied to clipboard: {}", name)));
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "clipboard unavailable");
                result.add_message(CmdMessage::warning(format!(
                    "Clipboard unavailable ({:#}); printing instead",
                    e
                )));
                false
            }
        }
    };

    if state.json() {
        let value = json!({
            "text": text,
            "copied": copied,
            "messages": result.messages,
        });
        print!("{}", render::json(&value)?);
        return Ok(());
    }

    if !copied {
        println!("{}", text);
    }
    eprint!("{}", render::messages(state.palette, &result.messages));
    Ok(())
}

/// Positions on the command line are 1-based, as listed.
fn to_index(position: usize) -> Result<usize> {
    match position.checked_sub(1) {
        Some(index) => Ok(index),
        None => bail!("positions start at 1"),
    }
}

fn read_value_from_stdin() -> Result<String> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        bail!("--value is required (or pipe the script body on stdin)");
    }
    let mut buf = String::new();
    stdin
        .lock()
        .read_to_string(&mut buf)
        .context("failed to read script body from stdin")?;
    // One trailing newline comes from the shell, not the script.
    if buf.ends_with('\n') {
        buf.pop();
        if buf.ends_with('\r') {
            buf.pop();
        }
    }
    Ok(buf)
}

fn print_completions(shell: CompletionShell) {
    let shell = match shell {
        CompletionShell::Bash => Shell::Bash,
        CompletionShell::Zsh => Shell::Zsh,
    };
    let mut cmd = build_command();
    generate(shell, &mut cmd, "snipz", &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_are_one_based() {
        assert_eq!(to_index(1).unwrap(), 0);
        assert_eq!(to_index(7).unwrap(), 6);
        assert!(to_index(0).is_err());
    }
}
