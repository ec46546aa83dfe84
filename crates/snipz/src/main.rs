//! # Snipz CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, and this file
//! only invokes `cli::run()` and turns an error into an exit code.
//!
//! ## Workspace Structure
//!
//! - `crates/snipzapp/`: the UI-agnostic library (catalog, store, templates,
//!   search, settings)
//! - `crates/snipz/`: this CLI, one client of that library
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/snipz/src/cli/)                          │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - dispatch and terminal interaction (commands.rs)          │
//! │  - console rendering (render.rs, styles.rs)                 │
//! │  - placeholder prompts (prompt.rs), logging (logging.rs)    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/snipzapp/src/api.rs)                     │
//! │  - Resolves script names, dispatches to commands            │
//! │  - Returns structured `CmdResult` values                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything below the API is free of terminal concerns. The CLI owns argument
//! parsing, prompting, rendering, the clipboard and exit codes.
//!
//! ## Testing Approach
//!
//! - Library logic is tested in `snipzapp` itself.
//! - Rendering is tested here with canned `CmdResult` values.
//! - `tests/cli_e2e.rs` runs the real binary against a temp data directory.

mod cli;
mod clipboard;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
