//! Artifact Loader - Model & Preprocessor Lifecycle
//!
//! Loads both artifacts exactly once per process, validates them against
//! the current field layout, and caches the resulting ScoringEngine for
//! every later request. A failed load halts scoring for the session; the
//! halt reason stays queryable so the frontend can report it.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use sha2::{Digest, Sha256};

use crate::constants;
use crate::logic::features::layout::{is_layout_compatible, layout_hash, FIELD_VERSION};
use crate::logic::model::inference::Classifier;
use crate::logic::preprocess::artifact::{PreprocessorArtifact, ARTIFACT_SCHEMA_VERSION};
use crate::logic::preprocess::transform::Preprocessor;
use crate::logic::risk::engine::ScoringEngine;

// ============================================================================
// STATE
// ============================================================================

/// The engine, loaded at most once per process
static ENGINE: OnceCell<ScoringEngine> = OnceCell::new();

/// Why loading failed, when it did (fatal for the session)
static HALT_REASON: RwLock<Option<String>> = RwLock::new(None);

/// Paths the artifacts were loaded from
static LOADED_PATHS: RwLock<Option<ArtifactPaths>> = RwLock::new(None);

/// SHA-256 of the model file recorded at load
static MODEL_CHECKSUM: RwLock<Option<String>> = RwLock::new(None);

/// When the artifacts were loaded
static LOADED_AT: RwLock<Option<DateTime<Utc>>> = RwLock::new(None);

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Where the two artifact files live
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub preprocessor: PathBuf,
}

impl ArtifactPaths {
    /// Resolve from environment overrides, then candidate locations.
    ///
    /// Candidates are checked in order: the app data directory, then the
    /// documented relative defaults next to the executable's working dir.
    pub fn resolve() -> Self {
        let model = resolve_one(
            constants::model_path_override(),
            constants::DEFAULT_MODEL_PATH,
        );
        let preprocessor = resolve_one(
            constants::preprocessor_path_override(),
            constants::DEFAULT_PREPROCESSOR_PATH,
        );
        Self { model, preprocessor }
    }
}

fn resolve_one(env_override: Option<String>, default_rel: &str) -> PathBuf {
    if let Some(path) = env_override {
        return PathBuf::from(path);
    }

    if let Some(data_dir) = dirs::data_dir() {
        let candidate = data_dir.join(constants::APP_DATA_DIR).join(default_rel);
        if candidate.exists() {
            return candidate;
        }
    }

    PathBuf::from(default_rel)
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Fatal artifact failure; no prediction can proceed without both artifacts
#[derive(Debug)]
pub enum ArtifactError {
    /// An artifact file is absent at its configured path
    NotFound(PathBuf),
    /// An artifact file exists but could not be read
    Read { path: PathBuf, detail: String },
    /// The preprocessor JSON does not parse
    Parse(String),
    /// The preprocessor was fitted on a different field layout
    Layout { expected_version: u8, expected_hash: u32, actual_version: u8, actual_hash: u32 },
    /// The artifact schema version is newer than this build understands
    Schema { supported: u8, found: u8 },
    /// Fields of the layout the preprocessor has no parameters for
    Coverage(Vec<String>),
    /// Declared dense width disagrees with the fitted parameters
    Dimension { declared: usize, computed: usize },
    /// Positive class is not where the engine assumes it
    ClassOrdering(String),
    /// ONNX session could not be created
    Session(String),
}

impl std::fmt::Display for ArtifactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactError::NotFound(path) => {
                write!(f, "Artifact not found: {}", path.display())
            }
            ArtifactError::Read { path, detail } => {
                write!(f, "Failed to read {}: {}", path.display(), detail)
            }
            ArtifactError::Parse(detail) => {
                write!(f, "Failed to parse preprocessor artifact: {}", detail)
            }
            ArtifactError::Layout { expected_version, expected_hash, actual_version, actual_hash } => {
                write!(
                    f,
                    "Preprocessor fitted on layout v{} (hash {:08x}), this build uses v{} (hash {:08x})",
                    actual_version, actual_hash, expected_version, expected_hash
                )
            }
            ArtifactError::Schema { supported, found } => {
                write!(
                    f,
                    "Preprocessor artifact schema v{} not supported (max v{})",
                    found, supported
                )
            }
            ArtifactError::Coverage(fields) => {
                write!(f, "Preprocessor has no parameters for: {}", fields.join(", "))
            }
            ArtifactError::Dimension { declared, computed } => {
                write!(
                    f,
                    "Preprocessor declares {} output columns but its parameters produce {}",
                    declared, computed
                )
            }
            ArtifactError::ClassOrdering(detail) => {
                write!(f, "Classifier class ordering invalid: {}", detail)
            }
            ArtifactError::Session(detail) => {
                write!(f, "Failed to load classifier: {}", detail)
            }
        }
    }
}

impl std::error::Error for ArtifactError {}

// ============================================================================
// VALIDATION
// ============================================================================

/// Validate a parsed preprocessor artifact against this build
pub(crate) fn validate_artifact(artifact: &PreprocessorArtifact) -> Result<(), ArtifactError> {
    if artifact.schema_version > ARTIFACT_SCHEMA_VERSION {
        return Err(ArtifactError::Schema {
            supported: ARTIFACT_SCHEMA_VERSION,
            found: artifact.schema_version,
        });
    }

    if !is_layout_compatible(artifact.field_version, artifact.layout_hash) {
        return Err(ArtifactError::Layout {
            expected_version: FIELD_VERSION,
            expected_hash: layout_hash(),
            actual_version: artifact.field_version,
            actual_hash: artifact.layout_hash,
        });
    }

    let uncovered = artifact.uncovered_fields();
    if !uncovered.is_empty() {
        return Err(ArtifactError::Coverage(
            uncovered.iter().map(|s| s.to_string()).collect(),
        ));
    }

    let computed = artifact.computed_output_dim();
    if computed != artifact.output_dim {
        return Err(ArtifactError::Dimension {
            declared: artifact.output_dim,
            computed,
        });
    }

    artifact.decision.validate().map_err(ArtifactError::ClassOrdering)
}

// ============================================================================
// LOADING
// ============================================================================

/// Load and validate both artifacts. Pure with respect to process state;
/// `init` is the cached entry point.
pub fn load(paths: &ArtifactPaths) -> Result<ScoringEngine, ArtifactError> {
    for path in [&paths.preprocessor, &paths.model] {
        if !path.exists() {
            return Err(ArtifactError::NotFound(path.clone()));
        }
    }

    let text = std::fs::read_to_string(&paths.preprocessor).map_err(|e| ArtifactError::Read {
        path: paths.preprocessor.clone(),
        detail: e.to_string(),
    })?;

    let artifact =
        PreprocessorArtifact::from_json(&text).map_err(|e| ArtifactError::Parse(e.to_string()))?;

    validate_artifact(&artifact)?;

    let checksum = file_sha256(&paths.model).map_err(|e| ArtifactError::Read {
        path: paths.model.clone(),
        detail: e.to_string(),
    })?;

    let decision = artifact.decision.clone();
    let preprocessor = Preprocessor::from_artifact(artifact);

    let classifier = Classifier::load(&paths.model, preprocessor.output_dim(), decision)
        .map_err(|e| ArtifactError::Session(e.to_string()))?;

    *MODEL_CHECKSUM.write() = Some(checksum);
    *LOADED_AT.write() = Some(Utc::now());
    *LOADED_PATHS.write() = Some(paths.clone());

    log::info!(
        "Artifacts loaded: model={} preprocessor={} ({} dense columns, threshold {:.2})",
        paths.model.display(),
        paths.preprocessor.display(),
        preprocessor.output_dim(),
        preprocessor.artifact().decision.threshold,
    );

    Ok(ScoringEngine::new(preprocessor, classifier))
}

/// SHA-256 of a file's contents, hex encoded
fn file_sha256(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

// ============================================================================
// PROCESS-WIDE CACHE
// ============================================================================

/// Load artifacts once per process. Later calls are no-ops; a failure is
/// recorded as the session halt reason.
pub fn init() -> Result<(), ArtifactError> {
    if ENGINE.get().is_some() {
        return Ok(());
    }

    let paths = ArtifactPaths::resolve();
    match load(&paths) {
        Ok(engine) => {
            // Set can only race against another init; first one wins either way
            let _ = ENGINE.set(engine);
            *HALT_REASON.write() = None;
            Ok(())
        }
        Err(e) => {
            *HALT_REASON.write() = Some(e.to_string());
            Err(e)
        }
    }
}

/// The cached engine, if loading succeeded
pub fn engine() -> Option<&'static ScoringEngine> {
    ENGINE.get()
}

/// Why the session is halted, if it is
pub fn halt_reason() -> Option<String> {
    HALT_REASON.read().clone()
}

pub fn is_ready() -> bool {
    ENGINE.get().is_some()
}

pub fn loaded_at() -> Option<DateTime<Utc>> {
    *LOADED_AT.read()
}

pub fn model_checksum() -> Option<String> {
    MODEL_CHECKSUM.read().clone()
}

pub fn loaded_paths() -> Option<ArtifactPaths> {
    LOADED_PATHS.read().clone()
}

/// Re-hash the model file and compare against the checksum recorded at
/// load. Detects on-disk tampering or replacement behind a live session.
pub fn verify_model_checksum() -> Result<bool, ArtifactError> {
    let paths = loaded_paths().ok_or_else(|| {
        ArtifactError::NotFound(PathBuf::from(constants::DEFAULT_MODEL_PATH))
    })?;
    let recorded = model_checksum();

    let current = file_sha256(&paths.model).map_err(|e| ArtifactError::Read {
        path: paths.model.clone(),
        detail: e.to_string(),
    })?;

    Ok(recorded.as_deref() == Some(current.as_str()))
}

// ============================================================================
// TESTS
// ============================================================================
