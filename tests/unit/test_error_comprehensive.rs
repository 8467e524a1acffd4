use yamlforge::core::error::{
    AppError, CODE_EMPTY_RESULT, CODE_UNKNOWN_TASK, CODE_WRITE_FAILED,
};
use yamlforge::core::source::SourceError;
use yamlforge::core::types::{ErrorCategory, ErrorSeverity};

#[test]
fn test_error_severity_mapping() {
    let test_cases = vec![
        (ErrorCategory::DataIntegrityError, ErrorSeverity::Error),
        (ErrorCategory::EmptyResultError, ErrorSeverity::Warning),
        (ErrorCategory::WriteError, ErrorSeverity::Error),
        (ErrorCategory::ValidationError, ErrorSeverity::Error),
        (ErrorCategory::SerializationError, ErrorSeverity::Error),
        (ErrorCategory::IoError, ErrorSeverity::Error),
        (ErrorCategory::InternalError, ErrorSeverity::Error),
        (ErrorCategory::Unknown, ErrorSeverity::Info),
    ];

    for (category, expected_severity) in test_cases {
        let error = AppError::new(category, "test");
        assert_eq!(error.category, category);
        assert_eq!(error.severity(), expected_severity);
        assert!(error.context.is_empty());
        assert!(error.source.is_none());
        assert!(error.occurred_at <= chrono::Utc::now());
    }
}

#[test]
fn test_per_definition_categories() {
    assert!(ErrorCategory::DataIntegrityError.is_per_definition());
    assert!(ErrorCategory::EmptyResultError.is_per_definition());
    assert!(ErrorCategory::WriteError.is_per_definition());
    assert!(!ErrorCategory::ValidationError.is_per_definition());
    assert!(!ErrorCategory::InternalError.is_per_definition());
}

#[test]
fn test_error_add_context_keeps_order() {
    let mut error = AppError::write_failed("disk full");
    error.add_context("definition", "build definition 4 'CI'");
    error.add_context("path", "/out/Payments/AzureDevOpsBuilds/CI-4.yml");

    let keys: Vec<&str> = error.context.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["definition", "path"]);
    assert_eq!(error.code, CODE_WRITE_FAILED);
    assert_eq!(error.category, ErrorCategory::WriteError);
}

#[test]
fn test_error_display() {
    let error = AppError::empty_result("release definition 9 'Web'")
        .with_context("definition_id", "9");

    let display = format!("{}", error);
    assert!(display.contains(CODE_EMPTY_RESULT));
    assert!(display.contains("EmptyResultError"));
    assert!(display.contains("release definition 9 'Web'"));
    assert!(display.contains("definition_id"));
}

#[test]
fn test_error_display_with_source() {
    let source = std::io::Error::new(std::io::ErrorKind::Other, "underlying error");
    let error = AppError::with_source(
        ErrorCategory::InternalError,
        "wrapper error",
        Box::new(source),
    );

    let display = format!("{}", error);
    assert!(display.contains("wrapper error"));
    assert!(display.contains("underlying error"));
}

#[test]
fn test_unknown_task_carries_suggestion() {
    let id = uuid::Uuid::new_v4();
    let error = AppError::unknown_task(id, 2);
    assert_eq!(error.code, CODE_UNKNOWN_TASK);
    assert_eq!(error.context.get("major"), Some(&"2".to_string()));
    assert_eq!(error.recovery_suggestions.len(), 1);
}

#[test]
fn test_error_from_anyhow() {
    let app_error = AppError::from(anyhow::anyhow!("anyhow error message"));

    assert_eq!(app_error.category, ErrorCategory::InternalError);
    assert_eq!(app_error.message, "anyhow error message");
    assert_eq!(app_error.severity(), ErrorSeverity::Error);
}

#[test]
fn test_error_from_io_error() {
    let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied");
    let app_error = AppError::from(io_error);

    assert_eq!(app_error.category, ErrorCategory::IoError);
    assert_eq!(app_error.message, "permission denied");
    assert_eq!(
        app_error.recovery_suggestions,
        vec!["Check file permissions and paths".to_string()]
    );
}

#[test]
fn test_source_errors_map_to_codes() {
    let error: AppError = SourceError::NotFound("missing.json".into()).into();
    assert_eq!(error.code, "SRC-001");
    assert_eq!(error.category, ErrorCategory::IoError);

    let error: AppError = SourceError::UnsupportedFormat("xml".to_string()).into();
    assert_eq!(error.code, "SRC-002");
    assert!(error.message.contains("xml"));
}
