use serde::{Deserialize, Serialize};

/// Kind of upstream object a generated document or failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefinitionKind {
    Build,
    Release,
    TaskGroup,
}

impl std::fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefinitionKind::Build => write!(f, "build definition"),
            DefinitionKind::Release => write!(f, "release definition"),
            DefinitionKind::TaskGroup => write!(f, "task group"),
        }
    }
}

/// Error category enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// Referenced task or task group does not resolve against the snapshot
    DataIntegrityError,
    /// Definition produced no steps, jobs or stages
    EmptyResultError,
    /// Emitting a document for one definition failed
    WriteError,
    ValidationError,
    SerializationError,
    IoError,
    InternalError,
    Unknown,
}

impl ErrorCategory {
    /// Per-definition categories are recorded and the run continues.
    pub fn is_per_definition(self) -> bool {
        matches!(
            self,
            ErrorCategory::DataIntegrityError
                | ErrorCategory::EmptyResultError
                | ErrorCategory::WriteError
        )
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Error severity enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Error,
    Warning,
    Info,
    Debug,
}
