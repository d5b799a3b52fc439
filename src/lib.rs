//! Personal workstation provisioning.
//!
//! Rogu reads a manifest (`~/.rogu`, YAML or TOML) describing scripts,
//! downloaded files and project templates, adds two built-in items (the
//! bare dotfiles repository and rogu itself), and drives them through a
//! uniform check / install / update / uninstall lifecycle in priority
//! order.
//!
//! The public API is organised into layers:
//!
//! - **[`config`]**: parse and validate the manifest
//! - **[`exec`]**, **[`git`]**, **[`url`]**, **[`fs`]**: host primitives
//! - **[`items`]**: item kinds, their handlers and the catalog
//! - **[`commands`]**: subcommand drivers (`sync`, `doctor`, `uninstall`, ...)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod fs;
pub mod git;
pub mod items;
pub mod logging;
pub mod url;
