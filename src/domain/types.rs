//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - assembled from either CLI flags or the TUI form
//! - passed to the model layer as a plain numeric vector
//! - rendered in reports

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Number of features the classifier consumes.
pub const FEATURE_COUNT: usize = 9;

/// Canonical feature order.
///
/// This order must match the order the artifact was trained with. There is no
/// way to verify that from the artifact itself; a reordered vector silently
/// produces wrong predictions. `feature_names` in the artifact file exists so
/// a mismatch is at least visible to a human inspecting the file.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age",
    "income",
    "loan_amount",
    "credit_score",
    "months_employed",
    "loan_term",
    "employment_type",
    "marital_status",
    "loan_purpose",
];

/// One applicant's attributes in feature order.
pub type FeatureVector = [f64; FEATURE_COUNT];

/// Employment type, encoded the way the training data encoded it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentType {
    #[value(name = "full-time")]
    FullTime,
    #[value(name = "part-time")]
    PartTime,
    #[value(name = "self-employed")]
    SelfEmployed,
    Unemployed,
}

impl EmploymentType {
    pub const ALL: [EmploymentType; 4] = [
        EmploymentType::FullTime,
        EmploymentType::PartTime,
        EmploymentType::SelfEmployed,
        EmploymentType::Unemployed,
    ];

    /// Integer code used in the feature vector.
    pub fn code(self) -> u8 {
        match self {
            EmploymentType::FullTime => 0,
            EmploymentType::PartTime => 1,
            EmploymentType::SelfEmployed => 2,
            EmploymentType::Unemployed => 3,
        }
    }

    /// Human-readable label for forms and reports.
    pub fn display_name(self) -> &'static str {
        match self {
            EmploymentType::FullTime => "Full-time",
            EmploymentType::PartTime => "Part-time",
            EmploymentType::SelfEmployed => "Self-employed",
            EmploymentType::Unemployed => "Unemployed",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

/// Marital status, encoded the way the training data encoded it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MaritalStatus {
    Divorced,
    Married,
    Single,
}

impl MaritalStatus {
    pub const ALL: [MaritalStatus; 3] = [
        MaritalStatus::Divorced,
        MaritalStatus::Married,
        MaritalStatus::Single,
    ];

    pub fn code(self) -> u8 {
        match self {
            MaritalStatus::Divorced => 0,
            MaritalStatus::Married => 1,
            MaritalStatus::Single => 2,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            MaritalStatus::Divorced => "Divorced",
            MaritalStatus::Married => "Married",
            MaritalStatus::Single => "Single",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

/// Loan purpose, encoded the way the training data encoded it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LoanPurpose {
    Auto,
    Business,
    Education,
    Home,
    Other,
}

impl LoanPurpose {
    pub const ALL: [LoanPurpose; 5] = [
        LoanPurpose::Auto,
        LoanPurpose::Business,
        LoanPurpose::Education,
        LoanPurpose::Home,
        LoanPurpose::Other,
    ];

    pub fn code(self) -> u8 {
        match self {
            LoanPurpose::Auto => 0,
            LoanPurpose::Business => 1,
            LoanPurpose::Education => 2,
            LoanPurpose::Home => 3,
            LoanPurpose::Other => 4,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            LoanPurpose::Auto => "Auto",
            LoanPurpose::Business => "Business",
            LoanPurpose::Education => "Education",
            LoanPurpose::Home => "Home",
            LoanPurpose::Other => "Other",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, delta: i32) -> T {
    let idx = all.iter().position(|&v| v == current).unwrap_or(0) as i32;
    let len = all.len() as i32;
    all[((idx + delta).rem_euclid(len)) as usize]
}

/// Inclusive bounds for the numeric form fields.
///
/// Bounds are enforced at the input layer (clap range validation, TUI
/// clamping), not by the gateway.
#[derive(Debug, Clone, Copy)]
pub struct FieldBounds {
    pub min: u32,
    pub max: u32,
}

pub const AGE_BOUNDS: FieldBounds = FieldBounds { min: 18, max: 100 };
pub const INCOME_BOUNDS: FieldBounds = FieldBounds { min: 0, max: 1_000_000 };
pub const LOAN_AMOUNT_BOUNDS: FieldBounds = FieldBounds { min: 0, max: 1_000_000 };
pub const CREDIT_SCORE_BOUNDS: FieldBounds = FieldBounds { min: 300, max: 850 };
pub const MONTHS_EMPLOYED_BOUNDS: FieldBounds = FieldBounds { min: 0, max: 600 };
pub const LOAN_TERM_BOUNDS: FieldBounds = FieldBounds { min: 1, max: 360 };

impl FieldBounds {
    pub fn clamp(self, value: i64) -> u32 {
        value.clamp(self.min as i64, self.max as i64) as u32
    }
}

/// One applicant as entered on the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub age: u32,
    pub income: u32,
    pub loan_amount: u32,
    pub credit_score: u32,
    pub months_employed: u32,
    pub loan_term: u32,
    pub employment_type: EmploymentType,
    pub marital_status: MaritalStatus,
    pub loan_purpose: LoanPurpose,
}

impl ApplicantProfile {
    /// Assemble the fixed-order numeric feature vector.
    pub fn to_features(&self) -> FeatureVector {
        [
            self.age as f64,
            self.income as f64,
            self.loan_amount as f64,
            self.credit_score as f64,
            self.months_employed as f64,
            self.loan_term as f64,
            self.employment_type.code() as f64,
            self.marital_status.code() as f64,
            self.loan_purpose.code() as f64,
        ]
    }
}

impl Default for ApplicantProfile {
    fn default() -> Self {
        Self {
            age: 56,
            income: 85_994,
            loan_amount: 50_587,
            credit_score: 520,
            months_employed: 80,
            loan_term: 36,
            employment_type: EmploymentType::FullTime,
            marital_status: MaritalStatus::Married,
            loan_purpose: LoanPurpose::Home,
        }
    }
}

/// Binary risk label derived from the classifier's class code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLabel {
    LowRisk,
    HighRisk,
}

impl RiskLabel {
    /// Class code 1 means default; anything else is treated as no-default.
    pub fn from_class(class: u8) -> Self {
        if class == 1 {
            RiskLabel::HighRisk
        } else {
            RiskLabel::LowRisk
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            RiskLabel::LowRisk => "Low Risk of Default",
            RiskLabel::HighRisk => "High Risk of Default",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_codes_match_training_encoding() {
        assert_eq!(EmploymentType::FullTime.code(), 0);
        assert_eq!(EmploymentType::Unemployed.code(), 3);
        assert_eq!(MaritalStatus::Divorced.code(), 0);
        assert_eq!(MaritalStatus::Married.code(), 1);
        assert_eq!(MaritalStatus::Single.code(), 2);
        assert_eq!(LoanPurpose::Auto.code(), 0);
        assert_eq!(LoanPurpose::Home.code(), 3);
        assert_eq!(LoanPurpose::Other.code(), 4);
    }

    #[test]
    fn default_profile_matches_documented_example_vector() {
        let features = ApplicantProfile::default().to_features();
        assert_eq!(
            features,
            [56.0, 85_994.0, 50_587.0, 520.0, 80.0, 36.0, 0.0, 1.0, 3.0]
        );
    }

    #[test]
    fn category_cycling_wraps() {
        assert_eq!(EmploymentType::Unemployed.next(), EmploymentType::FullTime);
        assert_eq!(EmploymentType::FullTime.prev(), EmploymentType::Unemployed);
        assert_eq!(LoanPurpose::Other.next(), LoanPurpose::Auto);
        assert_eq!(MaritalStatus::Divorced.prev(), MaritalStatus::Single);
    }

    #[test]
    fn bounds_clamp_to_range() {
        assert_eq!(AGE_BOUNDS.clamp(10), 18);
        assert_eq!(AGE_BOUNDS.clamp(150), 100);
        assert_eq!(CREDIT_SCORE_BOUNDS.clamp(520), 520);
        assert_eq!(LOAN_TERM_BOUNDS.clamp(0), 1);
    }
}
