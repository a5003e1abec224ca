//! Error types.
//!
//! The process boundary uses a single `AppError` carrying an exit code and a
//! user-facing message (`main` prints it and exits). Underneath, the artifact
//! loader and the predictor have their own typed errors so callers can react
//! to specific failures; they convert into `AppError` at the boundary.
//!
//! Exit codes:
//! - 2: artifact not found / not loadable
//! - 3: prediction rejected by the artifact
//! - 4: terminal/IO failure

use std::path::PathBuf;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// A candidate path that existed on disk but could not be deserialized.
#[derive(Debug, Clone)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Artifact loading failed for every candidate path.
///
/// `attempted` is the full ordered candidate list; `failures` the subset that
/// existed but failed to parse/validate (paths that simply did not exist are
/// not failures, they are skipped silently like the original fallback chain).
#[derive(Debug, Clone)]
pub struct LoadError {
    pub attempted: Vec<PathBuf>,
    pub failures: Vec<LoadFailure>,
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "No usable model artifact found.")?;
        writeln!(f, "Paths tried ({}):", self.attempted.len())?;
        for path in &self.attempted {
            writeln!(f, "  - {}", path.display())?;
        }
        for failure in &self.failures {
            writeln!(
                f,
                "Found {} but could not load it: {}",
                failure.path.display(),
                failure.message
            )?;
        }
        write!(
            f,
            "Place a model file next to the binary (or under models/), or run `loanrisk init-model`."
        )
    }
}

impl std::error::Error for LoadError {}

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        AppError::new(2, err.to_string())
    }
}

/// The artifact rejected the feature vector at inference time.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictError {
    /// Feature count does not match what the artifact was trained on.
    ShapeMismatch { expected: usize, got: usize },
    /// A tree node referenced a feature index outside the vector.
    FeatureIndexOutOfRange { index: usize, len: usize },
    /// A tree node referenced a child index outside the node array.
    NodeIndexOutOfRange { index: usize, len: usize },
    /// Tree walk exceeded the node count without reaching a leaf.
    NoLeafReached,
    /// The model produced a non-finite score.
    NonFiniteScore,
}

impl std::fmt::Display for PredictError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PredictError::ShapeMismatch { expected, got } => write!(
                f,
                "Feature vector has {got} values but the model expects {expected}. \
                 Check that the model is compatible with the input features."
            ),
            PredictError::FeatureIndexOutOfRange { index, len } => write!(
                f,
                "Model references feature index {index}, but only {len} features were supplied."
            ),
            PredictError::NodeIndexOutOfRange { index, len } => {
                write!(f, "Model references tree node {index}, but only {len} nodes exist.")
            }
            PredictError::NoLeafReached => {
                write!(f, "Tree evaluation did not terminate in a leaf (malformed model).")
            }
            PredictError::NonFiniteScore => {
                write!(f, "Model produced a non-finite score for this input.")
            }
        }
    }
}

impl std::error::Error for PredictError {}

impl From<PredictError> for AppError {
    fn from(err: PredictError) -> Self {
        AppError::new(3, format!("Error making prediction: {err}"))
    }
}
