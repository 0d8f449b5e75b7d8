pub mod check_type;
pub mod cli;
pub mod commands;
pub mod config;
pub mod discovery;
pub mod error;
pub mod executor;
pub mod module_name;
pub mod output;
pub mod path_utils;
pub mod planner;
pub mod result;
pub mod runner;

pub use error::{CodecheckError, Result};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
