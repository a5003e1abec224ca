//! Command-line parsing for the loan default predictor.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the model/gateway code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{
    AGE_BOUNDS, ApplicantProfile, CREDIT_SCORE_BOUNDS, EmploymentType, INCOME_BOUNDS,
    LOAN_AMOUNT_BOUNDS, LOAN_TERM_BOUNDS, LoanPurpose, MONTHS_EMPLOYED_BOUNDS, MaritalStatus,
};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "loanrisk", version, about = "Loan Default Prediction (local model artifact)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score one applicant from flags and print the report.
    Predict(ApplicantArgs),
    /// Try to load the model artifact and report what was found.
    Check(CheckArgs),
    /// Write a small built-in logistic model so the app works out of the box.
    InitModel(InitModelArgs),
    /// Launch the interactive form.
    ///
    /// This uses the same underlying gateway as `loanrisk predict`, but renders
    /// the form and result in a terminal UI using Ratatui.
    Tui(ApplicantArgs),
}

/// Applicant fields plus the model path override.
///
/// Bounds are enforced here (widget level); the gateway itself does not
/// validate ranges.
#[derive(Debug, Parser, Clone)]
pub struct ApplicantArgs {
    /// Explicit model artifact path (tried before the default candidates).
    #[arg(short = 'm', long, value_name = "FILE")]
    pub model: Option<PathBuf>,

    /// Applicant age in years.
    #[arg(long, default_value_t = 56,
          value_parser = clap::value_parser!(u32).range(AGE_BOUNDS.min as i64..=AGE_BOUNDS.max as i64))]
    pub age: u32,

    /// Annual income.
    #[arg(long, default_value_t = 85_994,
          value_parser = clap::value_parser!(u32).range(INCOME_BOUNDS.min as i64..=INCOME_BOUNDS.max as i64))]
    pub income: u32,

    /// Requested loan amount.
    #[arg(long, default_value_t = 50_587,
          value_parser = clap::value_parser!(u32).range(LOAN_AMOUNT_BOUNDS.min as i64..=LOAN_AMOUNT_BOUNDS.max as i64))]
    pub loan_amount: u32,

    /// Credit score (300-850).
    #[arg(long, default_value_t = 520,
          value_parser = clap::value_parser!(u32).range(CREDIT_SCORE_BOUNDS.min as i64..=CREDIT_SCORE_BOUNDS.max as i64))]
    pub credit_score: u32,

    /// Months at current employment.
    #[arg(long, default_value_t = 80,
          value_parser = clap::value_parser!(u32).range(MONTHS_EMPLOYED_BOUNDS.min as i64..=MONTHS_EMPLOYED_BOUNDS.max as i64))]
    pub months_employed: u32,

    /// Loan term in months.
    #[arg(long, default_value_t = 36,
          value_parser = clap::value_parser!(u32).range(LOAN_TERM_BOUNDS.min as i64..=LOAN_TERM_BOUNDS.max as i64))]
    pub loan_term: u32,

    /// Employment type.
    #[arg(long, value_enum, default_value_t = EmploymentType::FullTime)]
    pub employment_type: EmploymentType,

    /// Marital status.
    #[arg(long, value_enum, default_value_t = MaritalStatus::Married)]
    pub marital_status: MaritalStatus,

    /// Loan purpose.
    #[arg(long, value_enum, default_value_t = LoanPurpose::Home)]
    pub loan_purpose: LoanPurpose,
}

impl ApplicantArgs {
    pub fn profile(&self) -> ApplicantProfile {
        ApplicantProfile {
            age: self.age,
            income: self.income,
            loan_amount: self.loan_amount,
            credit_score: self.credit_score,
            months_employed: self.months_employed,
            loan_term: self.loan_term,
            employment_type: self.employment_type,
            marital_status: self.marital_status,
            loan_purpose: self.loan_purpose,
        }
    }
}

/// Options for `loanrisk check`.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// Explicit model artifact path (tried before the default candidates).
    #[arg(short = 'm', long, value_name = "FILE")]
    pub model: Option<PathBuf>,
}

/// Options for `loanrisk init-model`.
#[derive(Debug, Parser)]
pub struct InitModelArgs {
    /// Where to write the artifact.
    #[arg(long, value_name = "FILE", default_value = "model.json")]
    pub out: PathBuf,
}
