//! Shared prediction pipeline used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! profile -> feature vector -> classify -> (optional) probabilities
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::domain::{ApplicantProfile, FeatureVector, RiskLabel};
use crate::error::PredictError;
use crate::models::{self, Artifact};

/// All computed outputs of scoring one applicant.
#[derive(Debug, Clone)]
pub struct PredictionOutput {
    pub features: FeatureVector,
    pub label: RiskLabel,
    /// `(p_no_default, p_default)` when the model supports probabilities.
    pub probabilities: Option<(f64, f64)>,
}

/// Assemble the feature vector and run the classifier.
///
/// The probability lookup runs after classification; its absence is a model
/// capability, not a failure, so a class-only model still yields a label.
pub fn run_prediction(
    artifact: &Artifact,
    profile: &ApplicantProfile,
) -> Result<PredictionOutput, PredictError> {
    let features = profile.to_features();

    let class = models::predict(artifact, &features)?;
    let label = RiskLabel::from_class(class);
    let probabilities = models::probabilities(artifact, &features)?;

    Ok(PredictionOutput {
        features,
        label,
        probabilities,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ModelParams, TreeNode};

    fn tree_artifact(class: u8) -> Artifact {
        Artifact {
            tool: None,
            feature_names: crate::domain::FEATURE_NAMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            model: ModelParams::Tree {
                nodes: vec![TreeNode::Leaf { class }],
            },
        }
    }

    fn logistic_artifact() -> Artifact {
        Artifact {
            tool: None,
            feature_names: crate::domain::FEATURE_NAMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            model: ModelParams::Logistic {
                intercept: 0.0,
                coefficients: vec![0.0; crate::domain::FEATURE_COUNT],
                means: None,
                scales: None,
            },
        }
    }

    #[test]
    fn class_one_maps_to_high_risk() {
        let out = run_prediction(&tree_artifact(1), &ApplicantProfile::default()).unwrap();
        assert_eq!(out.label, RiskLabel::HighRisk);
        assert_eq!(out.probabilities, None);
    }

    #[test]
    fn class_zero_maps_to_low_risk() {
        let out = run_prediction(&tree_artifact(0), &ApplicantProfile::default()).unwrap();
        assert_eq!(out.label, RiskLabel::LowRisk);
    }

    #[test]
    fn features_follow_canonical_order() {
        let out = run_prediction(&tree_artifact(1), &ApplicantProfile::default()).unwrap();
        assert_eq!(
            out.features,
            [56.0, 85_994.0, 50_587.0, 520.0, 80.0, 36.0, 0.0, 1.0, 3.0]
        );
    }

    #[test]
    fn logistic_output_carries_probabilities() {
        let out = run_prediction(&logistic_artifact(), &ApplicantProfile::default()).unwrap();
        let (p0, p1) = out.probabilities.unwrap();
        assert!((p0 + p1 - 1.0).abs() < 1e-9);
        // All-zero coefficients -> sigmoid(0) = 0.5 -> class 1 by the >= 0.5 rule.
        assert_eq!(out.label, RiskLabel::HighRisk);
    }
}
