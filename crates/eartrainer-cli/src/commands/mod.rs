//! CLI command implementations

pub mod audio;
pub mod cache;
pub mod check;
pub mod exercise;
pub mod generate;

mod output;
