//! Artifact file read/write.
//!
//! The artifact is the "portable" representation of a trained classifier:
//! feature names (input width + order) and model parameters. Two on-disk
//! formats are supported — JSON first, TOML as a fallback — and the loader
//! walks an ordered candidate-path list so the same binary works whether the
//! model sits next to it or under `models/`.
//!
//! Design goals:
//! - **Ordered fallback**: first candidate that parses and validates wins
//! - **Recorded failures**: a file that exists but will not load is reported,
//!   then the search continues
//! - **Deterministic behavior**: no directory scanning during the search,
//!   only the explicit candidate list

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, LoadError, LoadFailure};
use crate::models::Artifact;

/// Default candidate paths, tried in order.
///
/// The names (spaces included) follow the filenames this model has actually
/// shipped under; keeping them means an existing deployment keeps working.
pub const DEFAULT_CANDIDATES: [&str; 10] = [
    "loan prediction.json",
    "loan prediction model1.json",
    "model.json",
    "loan prediction.toml",
    "model.toml",
    "models/loan prediction.json",
    "models/loan prediction model1.json",
    "models/model.json",
    "models/model.toml",
    "models/loan prediction.toml",
];

/// On-disk serialization format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    Json,
    Toml,
}

impl ArtifactFormat {
    pub fn display_name(self) -> &'static str {
        match self {
            ArtifactFormat::Json => "json",
            ArtifactFormat::Toml => "toml",
        }
    }
}

/// A successfully loaded artifact plus provenance.
#[derive(Debug, Clone)]
pub struct LoadedArtifact {
    pub artifact: Artifact,
    /// Path the artifact was read from.
    pub path: PathBuf,
    /// Format that parsed successfully.
    pub format: ArtifactFormat,
    /// Earlier candidates that existed but failed to load.
    pub skipped: Vec<LoadFailure>,
}

/// Build the candidate list: an optional explicit path first, then defaults.
pub fn candidate_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(1 + DEFAULT_CANDIDATES.len());
    if let Some(path) = explicit {
        paths.push(path.to_path_buf());
    }
    paths.extend(DEFAULT_CANDIDATES.iter().map(PathBuf::from));
    paths
}

/// Try each candidate path in order and return the first artifact that
/// deserializes and validates.
///
/// Missing paths are skipped silently; paths that exist but fail are recorded
/// and the search continues. If nothing succeeds the error carries the full
/// attempt history so the caller can show a useful report.
pub fn load_artifact(candidates: &[PathBuf]) -> Result<LoadedArtifact, LoadError> {
    let mut failures = Vec::new();

    for path in candidates {
        if !path.is_file() {
            continue;
        }

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                failures.push(LoadFailure {
                    path: path.clone(),
                    message: format!("read failed: {e}"),
                });
                continue;
            }
        };

        match parse_artifact(&text) {
            Ok((artifact, format)) => {
                return Ok(LoadedArtifact {
                    artifact,
                    path: path.clone(),
                    format,
                    skipped: failures,
                });
            }
            Err(message) => {
                failures.push(LoadFailure {
                    path: path.clone(),
                    message,
                });
            }
        }
    }

    Err(LoadError {
        attempted: candidates.to_vec(),
        failures,
    })
}

/// Parse artifact text, trying JSON first and TOML as the fallback.
///
/// Validation runs after either parse; a document that parses but is
/// internally inconsistent is a load failure for that candidate.
fn parse_artifact(text: &str) -> Result<(Artifact, ArtifactFormat), String> {
    let (artifact, format) = match serde_json::from_str::<Artifact>(text) {
        Ok(artifact) => (artifact, ArtifactFormat::Json),
        Err(json_err) => match toml::from_str::<Artifact>(text) {
            Ok(artifact) => (artifact, ArtifactFormat::Toml),
            Err(toml_err) => {
                return Err(format!("not valid JSON ({json_err}) or TOML ({toml_err})"));
            }
        },
    };

    artifact
        .validate()
        .map_err(|message| format!("invalid model ({})", message))?;

    Ok((artifact, format))
}

/// Write an artifact as pretty JSON (used by `loanrisk init-model`).
pub fn write_artifact_json(path: &Path, artifact: &Artifact) -> Result<(), AppError> {
    let file = fs::File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create '{}': {e}", path.display()))
    })?;
    serde_json::to_writer_pretty(file, artifact)
        .map_err(|e| AppError::new(2, format!("Failed to write artifact JSON: {e}")))?;
    Ok(())
}

/// List entries of a directory for the `check` failure report.
///
/// Sorted for stable output; unreadable directories yield an empty list
/// rather than a second error on top of the load failure.
pub fn list_directory(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ModelParams, TreeNode};

    fn sample_artifact() -> Artifact {
        Artifact {
            tool: Some("loanrisk".to_string()),
            feature_names: crate::domain::FEATURE_NAMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            model: ModelParams::Tree {
                nodes: vec![TreeNode::Leaf { class: 1 }],
            },
        }
    }

    #[test]
    fn loads_the_single_existing_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("model.json");
        write_artifact_json(&present, &sample_artifact()).unwrap();

        let candidates = vec![
            dir.path().join("loan prediction.json"),
            present.clone(),
            dir.path().join("models/model.json"),
        ];

        let loaded = load_artifact(&candidates).unwrap();
        assert_eq!(loaded.path, present);
        assert_eq!(loaded.format, ArtifactFormat::Json);
        assert!(loaded.skipped.is_empty());
        assert_eq!(loaded.artifact.model_kind_name(), "tree");
    }

    #[test]
    fn earlier_candidates_win() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("loan prediction.json");
        let second = dir.path().join("model.json");
        write_artifact_json(&first, &sample_artifact()).unwrap();
        write_artifact_json(&second, &sample_artifact()).unwrap();

        let loaded = load_artifact(&[first.clone(), second]).unwrap();
        assert_eq!(loaded.path, first);
    }

    #[test]
    fn missing_everything_reports_all_attempted_paths() {
        let dir = tempfile::tempdir().unwrap();
        let candidates = vec![
            dir.path().join("loan prediction.json"),
            dir.path().join("model.json"),
        ];

        let err = load_artifact(&candidates).unwrap_err();
        assert_eq!(err.attempted, candidates);
        assert!(err.failures.is_empty());
        let message = err.to_string();
        assert!(message.contains("loan prediction.json"));
        assert!(message.contains("No usable model artifact"));
    }

    #[test]
    fn corrupt_file_is_recorded_and_search_continues() {
        let dir = tempfile::tempdir().unwrap();
        let corrupt = dir.path().join("loan prediction.json");
        let good = dir.path().join("model.json");
        fs::write(&corrupt, "definitely not a model").unwrap();
        write_artifact_json(&good, &sample_artifact()).unwrap();

        let loaded = load_artifact(&[corrupt.clone(), good.clone()]).unwrap();
        assert_eq!(loaded.path, good);
        assert_eq!(loaded.skipped.len(), 1);
        assert_eq!(loaded.skipped[0].path, corrupt);
    }

    #[test]
    fn invalid_model_is_a_recorded_failure_even_when_it_parses() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("model.json");
        // Parses as an Artifact but fails validation: 2 coefficients, 9 names.
        let json = serde_json::json!({
            "feature_names": crate::domain::FEATURE_NAMES,
            "model": { "kind": "logistic", "intercept": 0.0, "coefficients": [1.0, 2.0] }
        });
        fs::write(&bad, serde_json::to_string(&json).unwrap()).unwrap();

        let err = load_artifact(&[bad.clone()]).unwrap_err();
        assert_eq!(err.failures.len(), 1);
        assert!(err.failures[0].message.contains("invalid model"));
    }

    #[test]
    fn toml_fallback_parses_what_json_rejects() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.toml");
        let text = r#"
feature_names = ["age", "income", "loan_amount"]

[model]
kind = "logistic"
intercept = -0.5
coefficients = [0.1, -0.2, 0.3]
"#;
        fs::write(&path, text).unwrap();

        let loaded = load_artifact(&[path]).unwrap();
        assert_eq!(loaded.format, ArtifactFormat::Toml);
        assert_eq!(loaded.artifact.feature_count(), 3);
        assert!(loaded.artifact.supports_probabilities());
    }

    #[test]
    fn explicit_path_goes_first_in_candidate_list() {
        let explicit = PathBuf::from("/tmp/custom.json");
        let paths = candidate_paths(Some(&explicit));
        assert_eq!(paths[0], explicit);
        assert_eq!(paths.len(), 1 + DEFAULT_CANDIDATES.len());
        assert_eq!(paths[1], PathBuf::from(DEFAULT_CANDIDATES[0]));
    }

    #[test]
    fn list_directory_is_sorted_and_tolerant() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "").unwrap();
        fs::write(dir.path().join("a.txt"), "").unwrap();
        assert_eq!(list_directory(dir.path()), vec!["a.txt", "b.txt"]);
        assert!(list_directory(&dir.path().join("missing")).is_empty());
    }
}
