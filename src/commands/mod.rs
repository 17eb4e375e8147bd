//! CLI commands

pub mod catalog;
pub mod clean;
pub mod extract;
pub mod list;
pub mod llms;
pub mod overview;
pub mod tooltips;
