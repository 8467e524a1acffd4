use crate::core::types::{ErrorCategory, ErrorSeverity};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;

pub const CODE_UNKNOWN_TASK: &str = "GEN-DATA-001";
pub const CODE_INVALID_VERSION_SPEC: &str = "GEN-DATA-002";
pub const CODE_TASK_GROUP_CYCLE: &str = "GEN-DATA-003";
pub const CODE_EMPTY_RESULT: &str = "GEN-EMPTY-001";
pub const CODE_WRITE_FAILED: &str = "GEN-WRITE-001";
pub const CODE_WORKER_PANICKED: &str = "GEN-INTERNAL-001";

#[derive(Debug)]
pub struct AppError {
    pub category: ErrorCategory,
    pub severity: ErrorSeverity,
    pub code: String,
    pub message: String,
    pub context: IndexMap<String, String>,
    pub recovery_suggestions: Vec<String>,
    pub occurred_at: DateTime<Utc>,
    pub source: Option<anyhow::Error>,
}

impl AppError {
    pub fn new<T: Into<String>>(category: ErrorCategory, message: T) -> Self {
        let severity = match category {
            ErrorCategory::DataIntegrityError
            | ErrorCategory::WriteError
            | ErrorCategory::ValidationError
            | ErrorCategory::SerializationError
            | ErrorCategory::IoError
            | ErrorCategory::InternalError => ErrorSeverity::Error,
            ErrorCategory::EmptyResultError => ErrorSeverity::Warning,
            ErrorCategory::Unknown => ErrorSeverity::Info,
        };
        AppError {
            category,
            severity,
            code: format!("ERR-{}", uuid::Uuid::new_v4()),
            message: message.into(),
            context: IndexMap::new(),
            recovery_suggestions: vec![],
            occurred_at: Utc::now(),
            source: None,
        }
    }

    pub fn with_source<T: Into<String>>(
        category: ErrorCategory,
        message: T,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        let mut error = AppError::new(category, message);
        error.source = Some(anyhow::anyhow!(source));
        error
    }

    pub fn with_context<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    pub fn with_code<T: Into<String>>(mut self, code: T) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_suggestion<T: Into<String>>(mut self, suggestion: T) -> Self {
        self.recovery_suggestions.push(suggestion.into());
        self
    }

    pub fn add_context(&mut self, key: &str, value: &str) {
        self.context.insert(key.to_string(), value.to_string());
    }

    pub fn severity(&self) -> ErrorSeverity {
        self.severity
    }

    /// A task id + major version that is neither an installed task nor a task group.
    pub fn unknown_task(task_id: uuid::Uuid, major: u32) -> Self {
        AppError::new(
            ErrorCategory::DataIntegrityError,
            format!(
                "task '{}' at major version {} is neither an installed task nor a task group",
                task_id, major
            ),
        )
        .with_code(CODE_UNKNOWN_TASK)
        .with_context("task_id", task_id.to_string())
        .with_context("major", major.to_string())
        .with_suggestion("Re-export the snapshot; the definition references a stale task version")
    }

    pub fn empty_result(subject: &str) -> Self {
        AppError::new(
            ErrorCategory::EmptyResultError,
            format!("{} has no enabled steps to emit", subject),
        )
        .with_code(CODE_EMPTY_RESULT)
    }

    pub fn write_failed<T: Into<String>>(message: T) -> Self {
        AppError::new(ErrorCategory::WriteError, message).with_code(CODE_WRITE_FAILED)
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.category, self.message)?;
        if !self.context.is_empty() {
            write!(f, " (Context: {:?})", self.context)?;
        }
        if let Some(ref source) = self.source {
            write!(f, "\nCaused by: {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for AppError {}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError {
            category: ErrorCategory::InternalError,
            severity: ErrorSeverity::Error,
            code: "ANYHOW_ERROR".to_string(),
            message: e.to_string(),
            context: IndexMap::new(),
            recovery_suggestions: vec!["Check the error details".to_string()],
            occurred_at: Utc::now(),
            source: Some(e),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError {
            category: ErrorCategory::IoError,
            severity: ErrorSeverity::Error,
            code: "IO_ERROR".to_string(),
            message: e.to_string(),
            context: IndexMap::new(),
            recovery_suggestions: vec!["Check file permissions and paths".to_string()],
            occurred_at: Utc::now(),
            source: Some(anyhow::anyhow!(e)),
        }
    }
}
