use async_graphql::*;

use crate::errors::ConfigError;

/// Structured error builder for consistent error handling
pub struct StructuredError;

impl StructuredError {
    /// Create a "not found" error
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Error {
        Error::new(format!("{} with id '{}' not found", resource, id)).extend_with(|_, e| {
            e.set("code", "NOT_FOUND");
            e.set("resource", resource);
        })
    }

    /// Create a "not found" error with custom message
    pub fn not_found_msg(message: impl Into<String>) -> Error {
        Error::new(message.into()).extend_with(|_, e| {
            e.set("code", "NOT_FOUND");
        })
    }

    /// Create a "validation failed" error
    pub fn validation(field: &str, message: impl Into<String>) -> Error {
        Error::new(format!(
            "Validation failed for '{}': {}",
            field,
            message.into()
        ))
        .extend_with(|_, e| {
            e.set("code", "VALIDATION_FAILED");
            e.set("field", field);
        })
    }

    /// Create a "database error"
    pub fn database(operation: &str, cause: impl std::fmt::Display) -> Error {
        Error::new(format!("Database error during {}: {}", operation, cause)).extend_with(|_, e| {
            e.set("code", "DATABASE_ERROR");
            e.set("operation", operation);
        })
    }

    /// Create a "conflict" error
    pub fn conflict(resource: &str, message: impl Into<String>) -> Error {
        Error::new(format!("{}: {}", resource, message.into())).extend_with(|_, e| {
            e.set("code", "CONFLICT");
            e.set("resource", resource);
        })
    }

    /// Create a "bad request" error
    pub fn bad_request(message: impl Into<String>) -> Error {
        Error::new(message.into()).extend_with(|_, e| {
            e.set("code", "BAD_REQUEST");
        })
    }
}

/// Map a storage error onto the error codes clients see.
pub fn config_error_to_graphql_error(operation: &str, err: ConfigError) -> Error {
    match err {
        ConfigError::NotFound(id) => StructuredError::not_found("Config", id),
        ConfigError::NameNotFound(name) => {
            StructuredError::not_found_msg(format!("Config named '{}' not found", name))
        }
        err @ ConfigError::DuplicateName { .. } => {
            StructuredError::conflict("Config", err.to_string())
        }
        ConfigError::BenchFile(parse_err) => {
            StructuredError::validation("content", parse_err.to_string())
        }
        ConfigError::Database(db_err) => {
            tracing::error!("{} failed: {}", operation, db_err);
            StructuredError::database(operation, db_err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bench_file::ParseError;

    fn code(error: &Error) -> Option<String> {
        let value = error.extensions.as_ref()?.get("code")?.clone();
        match value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[test]
    fn test_not_found_error() {
        let error = StructuredError::not_found("Config", 42);
        assert!(error.message.contains("Config"));
        assert!(error.message.contains("42"));
        assert_eq!(code(&error).as_deref(), Some("NOT_FOUND"));
    }

    #[test]
    fn test_config_errors_keep_their_codes() {
        let cases = [
            (ConfigError::NotFound(1), "NOT_FOUND"),
            (ConfigError::NameNotFound("x".into()), "NOT_FOUND"),
            (
                ConfigError::DuplicateName {
                    name: "x".into(),
                    count: 2,
                },
                "CONFLICT",
            ),
            (
                ConfigError::BenchFile(ParseError::MissingSection),
                "VALIDATION_FAILED",
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.error_code(), expected);
            let gql = config_error_to_graphql_error("test", err);
            assert_eq!(code(&gql).as_deref(), Some(expected));
        }
    }

    #[test]
    fn test_bench_file_error_points_at_content() {
        let error = config_error_to_graphql_error(
            "importConfig",
            ConfigError::BenchFile(ParseError::MissingKey("TAT")),
        );
        assert!(error.message.contains("'content'"));
        assert!(error.message.contains("missing key TAT"));
    }
}
