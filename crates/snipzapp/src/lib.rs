//! # Snipz Architecture
//!
//! Snipz is a **UI-agnostic snippet library**: an ordered catalog of
//! categories, each holding reusable command scripts that may carry
//! `{{placeholder}}` markers. The `snipz` binary is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (crates/snipz)                                         │
//! │  - Parses arguments, prompts, renders, copies to clipboard  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Resolves names to selectors, picks default category      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Turns store operations into CmdResult                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - CatalogStore: invariants, write after every mutation     │
//! │  - StorageBackend trait: FsBackend, MemBackend              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`template`] and [`search`] are pure functions over model types and sit
//! beside the layers rather than inside them.
//!
//! ## No I/O Assumptions in Core
//!
//! Nothing in this crate writes to stdout or stderr, reads from a terminal,
//! or exits the process. Diagnostics go through `tracing`; the client decides
//! where they end up.
//!
//! ## Module Overview
//!
//! - [`api`]: the facade, entry point for all operations
//! - [`commands`]: one submodule per command family
//! - [`store`]: document codec, backends and the catalog store
//! - [`model`]: `Catalog`, `Category`, `Script` and friends
//! - [`template`]: placeholder extraction and rendering
//! - [`search`]: the visibility filter
//! - [`settings`]: the `KEY=VALUE` settings file
//! - [`init`]: data directory resolution
//! - [`error`]: error types

pub mod api;
pub mod commands;
pub mod error;
pub mod init;
pub mod model;
pub mod search;
pub mod settings;
pub mod store;
pub mod template;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
