//! Formatted terminal output for predictions and artifact loading.

use crate::app::pipeline::PredictionOutput;
use crate::domain::{ApplicantProfile, RiskLabel};
use crate::error::LoadError;
use crate::io::LoadedArtifact;

/// Render a probability as a percentage with two decimals.
pub fn format_percent(p: f64) -> String {
    format!("{:.2}%", p * 100.0)
}

/// One-line provenance summary plus any skipped-candidate warnings.
pub fn format_loaded(loaded: &LoadedArtifact) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Model loaded from: {} ({}, {})\n",
        loaded.path.display(),
        loaded.format.display_name(),
        loaded.artifact.model_kind_name(),
    ));

    for failure in &loaded.skipped {
        out.push_str(&format!(
            "Skipped {}: {}\n",
            failure.path.display(),
            failure.message
        ));
    }

    out
}

/// Full report for one scored applicant.
pub fn format_prediction(profile: &ApplicantProfile, output: &PredictionOutput) -> String {
    let mut out = String::new();

    out.push_str("=== loanrisk - Loan Default Prediction ===\n");
    out.push_str(&format!(
        "Applicant: age={} income={} loan={} score={} employed={}m term={}m\n",
        profile.age,
        profile.income,
        profile.loan_amount,
        profile.credit_score,
        profile.months_employed,
        profile.loan_term,
    ));
    out.push_str(&format!(
        "           {} | {} | {}\n",
        profile.employment_type.display_name(),
        profile.marital_status.display_name(),
        profile.loan_purpose.display_name(),
    ));

    out.push('\n');
    match output.label {
        RiskLabel::HighRisk => {
            out.push_str("Result: High Risk of Default\n");
            out.push_str("This application shows a high risk of loan default.\n");
        }
        RiskLabel::LowRisk => {
            out.push_str("Result: Low Risk of Default\n");
            out.push_str("This application shows a low risk of loan default.\n");
        }
    }

    match output.probabilities {
        Some((p_no_default, p_default)) => {
            out.push_str("\nProbability scores:\n");
            out.push_str(&format!(
                "  No default: {}\n",
                format_percent(p_no_default)
            ));
            out.push_str(&format!("  Default:    {}\n", format_percent(p_default)));
        }
        None => {
            out.push_str("\nProbability scores not available for this model.\n");
        }
    }

    out
}

/// Failure report for `loanrisk check`: the attempt history plus a listing of
/// the working directory, since the usual cause is a misnamed or misplaced
/// model file.
pub fn format_check_failure(err: &LoadError, cwd_listing: &[String]) -> String {
    let mut out = String::new();

    out.push_str(&err.to_string());
    out.push('\n');

    out.push_str("\nFiles in the current directory:\n");
    if cwd_listing.is_empty() {
        out.push_str("  (none)\n");
    } else {
        for name in cwd_listing {
            out.push_str(&format!("  - {name}\n"));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RiskLabel;
    use std::path::PathBuf;

    fn output(label: RiskLabel, probabilities: Option<(f64, f64)>) -> PredictionOutput {
        PredictionOutput {
            features: ApplicantProfile::default().to_features(),
            label,
            probabilities,
        }
    }

    #[test]
    fn percent_rendering() {
        assert_eq!(format_percent(0.8766), "87.66%");
        assert_eq!(format_percent(0.0), "0.00%");
        assert_eq!(format_percent(1.0), "100.00%");
    }

    #[test]
    fn high_risk_report_mentions_label_and_probabilities() {
        let profile = ApplicantProfile::default();
        let text = format_prediction(&profile, &output(RiskLabel::HighRisk, Some((0.12, 0.88))));
        assert!(text.contains("High Risk of Default"));
        assert!(text.contains("88.00%"));
        assert!(text.contains("12.00%"));
    }

    #[test]
    fn missing_probabilities_render_as_note_not_error() {
        let profile = ApplicantProfile::default();
        let text = format_prediction(&profile, &output(RiskLabel::LowRisk, None));
        assert!(text.contains("Low Risk of Default"));
        assert!(text.contains("Probability scores not available"));
    }

    #[test]
    fn check_failure_lists_directory() {
        let err = LoadError {
            attempted: vec![PathBuf::from("model.json")],
            failures: vec![],
        };
        let text = format_check_failure(&err, &["app.txt".to_string(), "data.csv".to_string()]);
        assert!(text.contains("model.json"));
        assert!(text.contains("- app.txt"));
        assert!(text.contains("- data.csv"));
    }
}
