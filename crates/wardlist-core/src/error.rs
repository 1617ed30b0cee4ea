use thiserror::Error;

/// Core error types for wardlist registry operations
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid {kind} name {value:?}: expected lowercase letters, digits or underscores")]
    InvalidName { kind: String, value: String },

    #[error("Duplicate {kind} slug {slug:?}: an earlier registration already uses it")]
    DuplicateSlug { kind: String, slug: String },

    #[error("Patient list {list:?} declares no schema columns")]
    MissingSchema { list: String },

    #[error("{kind} not found: {slug}")]
    NotFound { kind: String, slug: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoreError {
    /// Create a new InvalidName error
    pub fn invalid_name(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidName {
            kind: kind.into(),
            value: value.into(),
        }
    }

    /// Create a new DuplicateSlug error
    pub fn duplicate_slug(kind: impl Into<String>, slug: impl Into<String>) -> Self {
        Self::DuplicateSlug {
            kind: kind.into(),
            slug: slug.into(),
        }
    }

    /// Create a new MissingSchema error
    pub fn missing_schema(list: impl Into<String>) -> Self {
        Self::MissingSchema { list: list.into() }
    }

    /// Create a new NotFound error
    pub fn not_found(kind: impl Into<String>, slug: impl Into<String>) -> Self {
        Self::NotFound {
            kind: kind.into(),
            slug: slug.into(),
        }
    }

    /// Create a new InvalidArgument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create a new Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this error signals a broken definition set.
    ///
    /// Definition errors are raised while the registry is being declared or
    /// built and should abort startup rather than be handled per request.
    pub fn is_definition_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidName { .. }
                | Self::DuplicateSlug { .. }
                | Self::MissingSchema { .. }
                | Self::Config(_)
        )
    }

    /// Check if this error belongs to a single request.
    ///
    /// Request errors are surfaced to the caller, typically as a "not found"
    /// response or a caller-misuse failure at the boundary.
    pub fn is_request_error(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::InvalidArgument(_))
    }

    /// Get error category for logging/monitoring
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidName { .. } | Self::InvalidArgument(_) => ErrorCategory::Validation,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::DuplicateSlug { .. } | Self::MissingSchema { .. } | Self::Config(_) => {
                ErrorCategory::Configuration
            }
        }
    }
}

/// Error categories for monitoring and classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::NotFound => write!(f, "not_found"),
            Self::Configuration => write!(f, "configuration"),
        }
    }
}

/// Convenience result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_name_error() {
        let err = CoreError::invalid_name("tag", "foo-bar");
        assert_eq!(
            err.to_string(),
            "Invalid tag name \"foo-bar\": expected lowercase letters, digits or underscores"
        );
        assert!(err.is_definition_error());
        assert!(!err.is_request_error());
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn test_not_found_error() {
        let err = CoreError::not_found("patient list", "cardiac");
        assert_eq!(err.to_string(), "patient list not found: cardiac");
        assert!(err.is_request_error());
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn test_duplicate_slug_error() {
        let err = CoreError::duplicate_slug("patient list", "eater-herbivore");
        assert!(err.to_string().contains("eater-herbivore"));
        assert!(err.is_definition_error());
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_missing_schema_error() {
        let err = CoreError::missing_schema("carnivores");
        assert_eq!(
            err.to_string(),
            "Patient list \"carnivores\" declares no schema columns"
        );
        assert!(err.is_definition_error());
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_invalid_argument_error() {
        let err = CoreError::invalid_argument("not a registered patient list: 2");
        assert!(err.is_request_error());
        assert!(!err.is_definition_error());
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn test_config_error() {
        let err = CoreError::config("unknown column \"ct_scans\"");
        assert_eq!(
            err.to_string(),
            "Configuration error: unknown column \"ct_scans\""
        );
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_definition_and_request_split_is_exclusive() {
        let errors = [
            CoreError::invalid_name("slug", "Bad Name"),
            CoreError::duplicate_slug("list group", "ward"),
            CoreError::missing_schema("ward"),
            CoreError::not_found("patient list", "ward"),
            CoreError::invalid_argument("nope"),
            CoreError::config("bad file"),
        ];
        for err in errors {
            assert_ne!(err.is_definition_error(), err.is_request_error(), "{err}");
        }
    }

    #[test]
    fn test_error_categories_display() {
        assert_eq!(ErrorCategory::Validation.to_string(), "validation");
        assert_eq!(ErrorCategory::NotFound.to_string(), "not_found");
        assert_eq!(ErrorCategory::Configuration.to_string(), "configuration");
    }
}
