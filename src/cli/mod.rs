//! Command-line interface definitions and helpers.
//!
//! This module contains all CLI argument parsing, enums, and subcommand handlers.

mod args;
mod commands;
mod enums;

pub use args::{Args, Command, ConfigAction, PaletteArgs, RenderArgs};
pub use commands::{
    build_request, handle_config_action, list_fonts, render, show_palette, write_default_config,
    CliError, PaletteSettings,
};
pub use enums::CharacterSet;
