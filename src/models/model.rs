//! Classifier evaluation.
//!
//! The gateway relies on two primitive operations:
//! - `predict`: classify a feature vector into class 0 or 1
//! - `probabilities`: class probabilities `[p0, p1]`, when the model kind
//!   supports them
//!
//! These are implemented here for each model kind.

use serde::{Deserialize, Serialize};

use crate::error::PredictError;

/// A deserialized classifier artifact.
///
/// `feature_names` documents the input width and order the model was trained
/// with; the names themselves are informational, but the length is authoritative
/// and enforced at inference time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    /// Tool that produced the file (informational).
    #[serde(default)]
    pub tool: Option<String>,
    pub feature_names: Vec<String>,
    pub model: ModelParams,
}

/// Model parameters by kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ModelParams {
    /// Logistic regression: `p1 = sigmoid(intercept + Σ w_i * x_i)`.
    ///
    /// Optional `means`/`scales` standardize inputs first (`(x - mean) / scale`),
    /// matching the common export of a scaler + estimator pair.
    Logistic {
        intercept: f64,
        coefficients: Vec<f64>,
        #[serde(default)]
        means: Option<Vec<f64>>,
        #[serde(default)]
        scales: Option<Vec<f64>>,
    },
    /// A single decision tree stored as a flat node array, rooted at index 0.
    ///
    /// Trees classify but expose no probability estimate.
    Tree { nodes: Vec<TreeNode> },
}

/// One node of a flat decision tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "lowercase")]
pub enum TreeNode {
    /// `x[feature] <= threshold` goes left, otherwise right.
    Branch {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf { class: u8 },
}

impl Artifact {
    /// Number of features the model expects.
    pub fn feature_count(&self) -> usize {
        self.feature_names.len()
    }

    /// Short label for reports ("logistic" / "tree").
    pub fn model_kind_name(&self) -> &'static str {
        match self.model {
            ModelParams::Logistic { .. } => "logistic",
            ModelParams::Tree { .. } => "tree",
        }
    }

    /// Whether `probabilities` returns values for this model kind.
    pub fn supports_probabilities(&self) -> bool {
        matches!(self.model, ModelParams::Logistic { .. })
    }

    /// Validate internal consistency after deserialization.
    ///
    /// Structural problems (length mismatches, dangling tree indices) are
    /// load errors, not inference errors: a file that fails here is rejected
    /// by the loader and the fallback search continues.
    pub fn validate(&self) -> Result<(), String> {
        let n = self.feature_names.len();
        if n == 0 {
            return Err("feature_names is empty".to_string());
        }

        match &self.model {
            ModelParams::Logistic {
                intercept,
                coefficients,
                means,
                scales,
            } => {
                if coefficients.len() != n {
                    return Err(format!(
                        "{} coefficients for {n} features",
                        coefficients.len()
                    ));
                }
                if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
                    return Err("non-finite coefficient".to_string());
                }
                if let Some(means) = means {
                    if means.len() != n {
                        return Err(format!("{} means for {n} features", means.len()));
                    }
                }
                if let Some(scales) = scales {
                    if scales.len() != n {
                        return Err(format!("{} scales for {n} features", scales.len()));
                    }
                    if scales.iter().any(|s| !s.is_finite() || *s == 0.0) {
                        return Err("zero or non-finite scale".to_string());
                    }
                }
            }
            ModelParams::Tree { nodes } => {
                if nodes.is_empty() {
                    return Err("tree has no nodes".to_string());
                }
                for (i, node) in nodes.iter().enumerate() {
                    if let TreeNode::Branch {
                        feature,
                        threshold,
                        left,
                        right,
                    } = node
                    {
                        if *feature >= n {
                            return Err(format!("node {i} references feature {feature} of {n}"));
                        }
                        if !threshold.is_finite() {
                            return Err(format!("node {i} has a non-finite threshold"));
                        }
                        if *left >= nodes.len() || *right >= nodes.len() {
                            return Err(format!("node {i} references a missing child"));
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

/// Classify a feature vector into class 0 or 1.
pub fn predict(artifact: &Artifact, features: &[f64]) -> Result<u8, PredictError> {
    check_shape(artifact, features)?;

    match &artifact.model {
        ModelParams::Logistic { .. } => {
            let p1 = logistic_p1(artifact, features)?;
            Ok(if p1 >= 0.5 { 1 } else { 0 })
        }
        ModelParams::Tree { nodes } => walk_tree(nodes, features),
    }
}

/// Class probabilities `(p0, p1)`, or `None` when the model kind exposes none.
///
/// Capability absence is not an error: tree artifacts classify without an
/// estimate and callers render an informational note instead.
pub fn probabilities(
    artifact: &Artifact,
    features: &[f64],
) -> Result<Option<(f64, f64)>, PredictError> {
    check_shape(artifact, features)?;

    match &artifact.model {
        ModelParams::Logistic { .. } => {
            let p1 = logistic_p1(artifact, features)?;
            Ok(Some((1.0 - p1, p1)))
        }
        ModelParams::Tree { .. } => Ok(None),
    }
}

/// Starter logistic model written by `loanrisk init-model`.
///
/// Coefficients are hand-set on standardized inputs with the usual credit-risk
/// signs (risk up with loan amount and term, down with income, credit score,
/// and tenure). Good enough to exercise the app end to end; not a trained
/// model.
pub fn builtin_logistic() -> Artifact {
    Artifact {
        tool: Some("loanrisk".to_string()),
        feature_names: crate::domain::FEATURE_NAMES
            .iter()
            .map(|s| s.to_string())
            .collect(),
        model: ModelParams::Logistic {
            intercept: -1.1,
            coefficients: vec![-0.35, -0.30, 0.45, -0.40, -0.25, 0.10, 0.20, -0.05, 0.05],
            means: Some(vec![
                43.0, 82_500.0, 127_500.0, 575.0, 60.0, 180.0, 1.5, 1.0, 2.0,
            ]),
            scales: Some(vec![
                15.0, 39_000.0, 70_000.0, 159.0, 35.0, 104.0, 1.1, 0.8, 1.4,
            ]),
        },
    }
}

fn check_shape(artifact: &Artifact, features: &[f64]) -> Result<(), PredictError> {
    let expected = artifact.feature_count();
    if features.len() != expected {
        return Err(PredictError::ShapeMismatch {
            expected,
            got: features.len(),
        });
    }
    Ok(())
}

fn logistic_p1(artifact: &Artifact, features: &[f64]) -> Result<f64, PredictError> {
    let ModelParams::Logistic {
        intercept,
        coefficients,
        means,
        scales,
    } = &artifact.model
    else {
        unreachable!("caller matched model kind");
    };

    let mut z = *intercept;
    for (i, &x) in features.iter().enumerate() {
        let mut v = x;
        if let Some(means) = means {
            v -= means[i];
        }
        if let Some(scales) = scales {
            v /= scales[i];
        }
        z += coefficients[i] * v;
    }

    if !z.is_finite() {
        return Err(PredictError::NonFiniteScore);
    }

    Ok(sigmoid(z))
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn walk_tree(nodes: &[TreeNode], features: &[f64]) -> Result<u8, PredictError> {
    let mut idx = 0usize;

    // A well-formed tree reaches a leaf in at most `nodes.len()` hops; more
    // means a cycle.
    for _ in 0..=nodes.len() {
        let node = nodes.get(idx).ok_or(PredictError::NodeIndexOutOfRange {
            index: idx,
            len: nodes.len(),
        })?;

        match node {
            TreeNode::Leaf { class } => return Ok(*class),
            TreeNode::Branch {
                feature,
                threshold,
                left,
                right,
            } => {
                let x = features
                    .get(*feature)
                    .ok_or(PredictError::FeatureIndexOutOfRange {
                        index: *feature,
                        len: features.len(),
                    })?;
                idx = if *x <= *threshold { *left } else { *right };
            }
        }
    }

    Err(PredictError::NoLeafReached)
}
