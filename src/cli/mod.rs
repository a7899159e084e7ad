pub mod commands;

pub use commands::{Cli, Commands, run, run_with};
