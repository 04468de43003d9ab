//! `picksheet` command-line front end: argument parsing and wiring of the
//! picking-sheet pipeline to a real data store.

pub mod app;
pub mod args;

pub use app::{execute, picking_sheet, run};
pub use args::{ArgsError, Invocation, USAGE_HINT, parse_args};
