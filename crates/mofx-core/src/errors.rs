use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using MofxError
pub type Result<T> = std::result::Result<T, MofxError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers can match on
/// programmatically. Parsing and diffing are best-effort and never produce
/// errors of their own; the taxonomy only covers the edges (files, config,
/// rendering).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input
    NotFound,

    // Configuration
    InvalidConfig,

    // Integration/IO
    Io,
    Serialization,
    Concurrency,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Concurrency => "ERR_CONCURRENCY",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling plus the
/// context needed to explain the failure (operation, file, rule).
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<PathBuf>,
    entity_id: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            entity_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add file path context
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add entity (rule) ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for mofx operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MofxError {
    /// Input document path does not exist
    #[error("MOF file not found: {}", path.display())]
    DocumentNotFound { path: PathBuf },

    /// Input exists but could not be read
    #[error("Failed to read {}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    /// Explicitly requested configuration file does not exist
    #[error("Config file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// Configuration file exists but is malformed
    #[error("Invalid configuration in {}: {message}", path.display())]
    InvalidConfig { path: PathBuf, message: String },

    /// Requested rule is not in either document
    #[error("Rule not found: {rule_id}")]
    RuleNotFound { rule_id: String },

    /// A parallel load worker panicked
    #[error("Document worker failed: {message}")]
    WorkerPanicked { message: String },

    /// Serialization error (JSON encoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl MofxError {
    /// Build an `Io` error from a `std::io::Error` for the given path
    pub fn io(path: &Path, err: std::io::Error) -> Self {
        MofxError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

/// Conversion from MofxError to the canonical ExError
impl From<MofxError> for ExError {
    fn from(err: MofxError) -> Self {
        let message = err.to_string();
        match err {
            MofxError::DocumentNotFound { path } => ExError::new(ExErrorKind::NotFound)
                .with_op("load_document")
                .with_path(path)
                .with_message(message),

            MofxError::Io { path, .. } => ExError::new(ExErrorKind::Io)
                .with_op("load_document")
                .with_path(path)
                .with_message(message),

            MofxError::ConfigNotFound { path } => ExError::new(ExErrorKind::NotFound)
                .with_op("load_config")
                .with_path(path)
                .with_message(message),

            MofxError::InvalidConfig { path, .. } => ExError::new(ExErrorKind::InvalidConfig)
                .with_op("load_config")
                .with_path(path)
                .with_message(message),

            MofxError::RuleNotFound { rule_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(rule_id)
                .with_message(message),

            MofxError::WorkerPanicked { .. } => {
                ExError::new(ExErrorKind::Concurrency).with_message(message)
            }

            MofxError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to MofxError
impl From<serde_json::Error> for MofxError {
    fn from(err: serde_json::Error) -> Self {
        MofxError::Serialization {
            message: err.to_string(),
        }
    }
}
