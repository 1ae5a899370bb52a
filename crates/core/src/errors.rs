use std::num::ParseIntError;

use thiserror::Error;

/// 属性存储和邮件发送共用的错误类型
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Cannot find properties resource {path}!")]
    ResourceNotFound { path: String },

    #[error("Cannot open properties resource {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Properties resource {path} is not valid: {reason}")]
    InvalidProperties { path: String, reason: String },

    #[error("Property {key} doesn't exist!")]
    KeyNotFound { key: String },

    #[error("Property {key} is not an integer: {value}")]
    InvalidInteger {
        key: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Malformed properties content at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

pub type ProjectResult<T> = Result<T, ProjectError>;

impl ProjectError {
    pub fn key_not_found<S: Into<String>>(key: S) -> Self {
        Self::KeyNotFound { key: key.into() }
    }
    pub fn config_error<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }
    pub fn invalid_properties<P: Into<String>, R: Into<String>>(path: P, reason: R) -> Self {
        Self::InvalidProperties {
            path: path.into(),
            reason: reason.into(),
        }
    }
    /// 初始化阶段必须终止的错误
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ProjectError::ResourceNotFound { .. }
                | ProjectError::Io { .. }
                | ProjectError::InvalidProperties { .. }
                | ProjectError::Parse { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_error_display() {
        let missing = ProjectError::key_not_found("smtp_host");
        assert_eq!(missing.to_string(), "Property smtp_host doesn't exist!");

        let not_found = ProjectError::ResourceNotFound {
            path: "project.properties".to_string(),
        };
        assert_eq!(
            not_found.to_string(),
            "Cannot find properties resource project.properties!"
        );

        let invalid = ProjectError::invalid_properties("a.properties", "logger_identifier is empty");
        assert_eq!(
            invalid.to_string(),
            "Properties resource a.properties is not valid: logger_identifier is empty"
        );
    }

    #[test]
    fn test_is_fatal() {
        assert!(ProjectError::ResourceNotFound { path: "x".into() }.is_fatal());
        assert!(ProjectError::invalid_properties("x", "y").is_fatal());
        assert!(!ProjectError::key_not_found("x").is_fatal());
        assert!(!ProjectError::config_error("x").is_fatal());
    }
}
