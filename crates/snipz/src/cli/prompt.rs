//! Placeholder values: `--set NAME=VALUE` parsing and terminal prompts.

use console::{style, Term};
use snipzapp::commands::copy::PendingCopy;
use snipzapp::template::Bindings;
use std::io::IsTerminal;

/// Parse `NAME=VALUE`. Only the first `=` splits, so values may contain `=`.
pub fn parse_binding(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got \"{}\"", raw)),
    }
}

/// Whether placeholder values can be asked for interactively.
pub fn can_prompt() -> bool {
    std::io::stdin().is_terminal() && std::io::stderr().is_terminal()
}

/// Ask for every placeholder `bindings` does not cover yet. Prompts go to stderr
/// so stdout stays clean for `--print`.
pub fn fill_unbound(pending: &PendingCopy, bindings: &mut Bindings) -> std::io::Result<()> {
    let missing: Vec<String> = pending.unbound(bindings).map(str::to_string).collect();
    if missing.is_empty() {
        return Ok(());
    }

    let term = Term::stderr();
    for name in missing {
        term.write_str(&format!("{} ", style(format!("{}:", name)).bold()))?;
        let answer = term.read_line()?;
        bindings.insert(name, answer);
    }
    Ok(())
}
