//! Error handling types
//!
//! Every failure the container can raise falls into one of three families:
//!
//! | Kind | Raised | Variants |
//! |------|--------|----------|
//! | Configuration | at bootstrap, fatal | `Configuration`, `DuplicateComponent`, `DuplicateJoinPoint`, `MalformedAspect`, `Construction` |
//! | Lookup | at the lookup call site | `ComponentNotFound`, `ComponentTypeMismatch`, `JoinPointNotFound` |
//! | Invocation | inside advice or the real target | `Invocation`, `Generic`, `Json` |
//! | Internal | anywhere | `Infrastructure`, `Internal` |
//!
//! Use [`Error::kind`] to branch on the family instead of matching variants.

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error used as an optional source
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for the Lucky container
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// A component id was registered twice
    #[error(
        "Component registry already contains a component with id '{id}'; duplicate registration is not allowed"
    )]
    DuplicateComponent {
        /// The conflicting component id
        id: String,
    },

    /// A join-point id was claimed by two advice declarations
    #[error(
        "Advice registry already contains join point '{id}'; two aspects declare the same advice slot"
    )]
    DuplicateJoinPoint {
        /// The conflicting join-point id
        id: String,
    },

    /// Aspect declaration does not have the shape it claims
    #[error("Malformed aspect '{type_name}': {message}")]
    MalformedAspect {
        /// Simple name of the offending type
        type_name: String,
        /// What is wrong with it
        message: String,
    },

    /// Instantiating a declared type failed
    #[error("Failed to construct '{type_name}': {message}")]
    Construction {
        /// Simple name of the type being constructed
        type_name: String,
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// Requested component id is not registered
    #[error("No component with id '{id}' found in the component registry")]
    ComponentNotFound {
        /// The missing component id
        id: String,
    },

    /// Component exists but is not of the requested type
    #[error("Component '{id}' is not of the requested type {expected}")]
    ComponentTypeMismatch {
        /// The component id
        id: String,
        /// Name of the type the caller asked for
        expected: &'static str,
    },

    /// Requested join-point id is not registered
    #[error("No advice bound to join point '{id}' in the advice registry")]
    JoinPointNotFound {
        /// The missing join-point id
        id: String,
    },

    /// Failure raised by advice or by the real target invocation
    #[error("Invocation failed: {message}")]
    Invocation {
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// JSON value conversion error
    #[error("JSON error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Generic error from external sources
    #[error("Generic error: {0}")]
    Generic(#[from] BoxError),

    /// Failure in a technical concern around the container (files, logging)
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

/// Error family, see the module table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bootstrap-time configuration problem
    Configuration,
    /// A registry lookup missed
    Lookup,
    /// Advice or target failure
    Invocation,
    /// Bug in the container itself
    Internal,
}

impl Error {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration { .. }
            | Self::DuplicateComponent { .. }
            | Self::DuplicateJoinPoint { .. }
            | Self::MalformedAspect { .. }
            | Self::Construction { .. } => ErrorKind::Configuration,
            Self::ComponentNotFound { .. }
            | Self::ComponentTypeMismatch { .. }
            | Self::JoinPointNotFound { .. } => ErrorKind::Lookup,
            Self::Invocation { .. } | Self::Json { .. } | Self::Generic(_) => ErrorKind::Invocation,
            Self::Infrastructure { .. } | Self::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// True for bootstrap-time configuration errors
    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }

    /// True for registry lookup misses
    pub fn is_lookup(&self) -> bool {
        self.kind() == ErrorKind::Lookup
    }
}

// Basic error creation methods
impl Error {
    /// Create a generic error
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into().into())
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create an infrastructure error with source
    pub fn infrastructure_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a duplicate component error
    pub fn duplicate_component<S: Into<String>>(id: S) -> Self {
        Self::DuplicateComponent { id: id.into() }
    }

    /// Create a duplicate join point error
    pub fn duplicate_join_point<S: Into<String>>(id: S) -> Self {
        Self::DuplicateJoinPoint { id: id.into() }
    }

    /// Create a malformed aspect error
    pub fn malformed_aspect<T: Into<String>, S: Into<String>>(type_name: T, message: S) -> Self {
        Self::MalformedAspect {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// Create a construction error
    pub fn construction<T: Into<String>, S: Into<String>>(type_name: T, message: S) -> Self {
        Self::Construction {
            type_name: type_name.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a construction error wrapping the failure that caused it
    pub fn construction_with_source<T: Into<String>>(type_name: T, source: Error) -> Self {
        Self::Construction {
            type_name: type_name.into(),
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }
}

// Lookup error creation methods
impl Error {
    /// Create a component not found error
    pub fn component_not_found<S: Into<String>>(id: S) -> Self {
        Self::ComponentNotFound { id: id.into() }
    }

    /// Create a component type mismatch error
    pub fn component_type_mismatch<S: Into<String>>(id: S, expected: &'static str) -> Self {
        Self::ComponentTypeMismatch {
            id: id.into(),
            expected,
        }
    }

    /// Create a join point not found error
    pub fn join_point_not_found<S: Into<String>>(id: S) -> Self {
        Self::JoinPointNotFound { id: id.into() }
    }
}

// Invocation error creation methods
impl Error {
    /// Create an invocation error
    pub fn invocation<S: Into<String>>(message: S) -> Self {
        Self::Invocation {
            message: message.into(),
            source: None,
        }
    }

    /// Create an invocation error with source
    pub fn invocation_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Invocation {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
