//! `loan-risk` library crate.
//!
//! The binary (`loanrisk`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - modules are reusable (e.g., a future web front-end, batch scoring, etc.)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod models;
pub mod report;
pub mod tui;
