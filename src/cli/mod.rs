//! CLI command handlers

pub mod assess;
pub mod migrate;
pub mod serve;
