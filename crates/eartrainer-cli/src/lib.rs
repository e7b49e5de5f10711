//! Eartrainer CLI library.
//!
//! Command implementations for the `eartrainer` developer harness, plus the
//! settings that turn global flags into an [`eartrainer_exercises::EarTrainer`].

pub mod commands;
pub mod settings;
