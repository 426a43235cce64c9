//! CLI library components for the bloom chart tool.

pub mod config;
pub mod logging;
pub mod outcome;
pub mod render;
