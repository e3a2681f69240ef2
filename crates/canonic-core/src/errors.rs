use std::fmt;

use thiserror::Error;

/// Result type alias using CanonError
pub type Result<T> = std::result::Result<T, CanonError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing and log assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Normalization
    NotNormalizable,
    NotHashable,

    // Immutable map access
    ImmutableMutation,
    KeyNotFound,

    // Settings / IO
    InvalidInput,
    NotFound,
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::NotNormalizable => "ERR_NOT_NORMALIZABLE",
            ExErrorKind::NotHashable => "ERR_NOT_HASHABLE",
            ExErrorKind::ImmutableMutation => "ERR_IMMUTABLE_MUTATION",
            ExErrorKind::KeyNotFound => "ERR_KEY_NOT_FOUND",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus optional
/// context (operation, key) and a human readable message.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    key: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            key: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add key context (settings key or map key)
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the key context, if any
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ExError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(key) = &self.key {
            write!(f, " (key: {})", key)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Which mutation was attempted on an immutable container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Assignment,
    Deletion,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationKind::Assignment => f.write_str("assignment"),
            MutationKind::Deletion => f.write_str("deletion"),
        }
    }
}

/// Error taxonomy for normalization and immutable-map operations
///
/// Two distinct original keys normalizing to the same key is a destructive
/// collision: the later entry silently wins. It is not reported here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CanonError {
    /// The value has no sound immutable, hashable representation
    #[error("{type_name} cannot be made hashable: {value}")]
    NotNormalizable {
        type_name: &'static str,
        value: String,
    },

    /// The trusting constructor was given a value that is not already hashable
    #[error("Value is not hashable: {value}")]
    NotHashable { value: String },

    /// Assignment or deletion attempted on an immutable map
    #[error("'ImmutableMap' object does not support item {operation}")]
    ImmutableMutation { operation: MutationKind },

    /// Lookup of a key that is not present
    #[error("Key not found: {key}")]
    KeyNotFound { key: String },
}

/// Conversion from CanonError to ExError
impl From<CanonError> for ExError {
    fn from(err: CanonError) -> Self {
        match err {
            CanonError::NotNormalizable { type_name, value } => {
                ExError::new(ExErrorKind::NotNormalizable)
                    .with_op("normalize")
                    .with_message(format!("{} cannot be made hashable: {}", type_name, value))
            }

            CanonError::NotHashable { value } => ExError::new(ExErrorKind::NotHashable)
                .with_op("from_trusted")
                .with_message(format!("Value is not hashable: {}", value)),

            CanonError::ImmutableMutation { operation } => {
                ExError::new(ExErrorKind::ImmutableMutation)
                    .with_op(operation.to_string())
                    .with_message(format!(
                        "'ImmutableMap' object does not support item {}",
                        operation
                    ))
            }

            CanonError::KeyNotFound { key } => ExError::new(ExErrorKind::KeyNotFound)
                .with_op("get")
                .with_key(key)
                .with_message("Key not found"),
        }
    }
}
