//! # CLI Behavior
//!
//! This is **one possible UI client** for snipz. It is the only place that
//! knows about terminal I/O, the clipboard, exit codes and output formatting.
//!
//! ## Naked Execution
//!
//! `snipz` with no arguments lists the scripts of the first category.
//!
//! ## Addressing Scripts
//!
//! Scripts are addressed as `<CATEGORY> <NAME>`; names are unique within a
//! category. `swap` takes the 1-based positions shown by `list`.
//!
//! ## Copying
//!
//! `snipz copy <CATEGORY> <NAME>` copies the script value to the clipboard.
//! Placeholders (`{{Name}}`) are filled from `--set Name=value` first, then
//! asked for on the terminal. Without a terminal, unfilled markers stay as
//! they are. `--print` writes the result to stdout instead of the clipboard.
//! If the clipboard is unavailable the text is printed with a warning.
//!
//! ## Module Structure
//!
//! - `setup`: argument parsing via clap
//! - `commands`: dispatch and per-command handlers
//! - `render`: terminal and JSON output
//! - `styles`: console styles for the dark and light themes
//! - `prompt`: `--set` parsing and placeholder prompts
//! - `logging`: tracing subscriber setup

mod commands;
mod logging;
mod prompt;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
