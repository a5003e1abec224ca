//! Domain types shared across the gateway, CLI, and TUI.
//!
//! This module defines:
//!
//! - the applicant profile and its fixed-order feature vector
//! - category label→code mappings (`EmploymentType`, `MaritalStatus`, `LoanPurpose`)
//! - the binary risk label
//! - per-field input bounds enforced by the front-ends

pub mod types;

pub use types::*;
