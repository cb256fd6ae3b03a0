//! Terminal output using cliclack (Charm-style log lines and spinners)
//!
//! This module is optional and only available when the `tui` feature is enabled.

#[cfg(feature = "tui")]
mod terminal;

#[cfg(feature = "tui")]
pub use terminal::{print_failure, print_info, run, TerminalReporter};
