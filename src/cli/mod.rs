//! Command-line interface for adhikar.

mod commands;
pub mod helpers;
pub mod progress;

pub use commands::{is_verbose, run};
