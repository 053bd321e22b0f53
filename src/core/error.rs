//! Error types for the logging facade

use std::fmt;

pub type Result<T> = std::result::Result<T, FacadeError>;

/// Why a single backend candidate was passed over during discovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRejection {
    pub backend: String,
    pub reason: String,
}

impl CandidateRejection {
    pub fn new(backend: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for CandidateRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.backend, self.reason)
    }
}

fn join_rejections(rejections: &[CandidateRejection]) -> String {
    if rejections.is_empty() {
        return "no candidates configured".to_string();
    }
    rejections
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, thiserror::Error)]
pub enum FacadeError {
    /// A factory implementation or a forced backend could not be constructed
    #[error("Failed to initialize {component}: {message}")]
    Initialization { component: String, message: String },

    /// Cascade discovery ran out of candidates
    #[error("No logging backend available for '{logger}' ({})", join_rejections(.rejections))]
    NoBackendAvailable {
        logger: String,
        rejections: Vec<CandidateRejection>,
    },

    /// More positional arguments than placeholders
    #[error("Format error: pattern has {placeholders} placeholder(s) but {arguments} argument(s) were supplied")]
    FormatMismatch { placeholders: usize, arguments: usize },

    /// An argument's `Display` implementation reported an error
    #[error("Format error: argument #{index} could not be rendered")]
    FormatArgument { index: usize },

    /// Returned by a backend whose prerequisites are missing
    #[error("Backend '{backend}' unavailable: {reason}")]
    BackendUnavailable { backend: String, reason: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (configuration file) error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FacadeError {
    pub fn initialization(component: impl Into<String>, message: impl Into<String>) -> Self {
        FacadeError::Initialization {
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn no_backend(logger: impl Into<String>, rejections: Vec<CandidateRejection>) -> Self {
        FacadeError::NoBackendAvailable {
            logger: logger.into(),
            rejections,
        }
    }

    pub fn format_mismatch(placeholders: usize, arguments: usize) -> Self {
        FacadeError::FormatMismatch {
            placeholders,
            arguments,
        }
    }

    pub fn backend_unavailable(backend: impl Into<String>, reason: impl Into<String>) -> Self {
        FacadeError::BackendUnavailable {
            backend: backend.into(),
            reason: reason.into(),
        }
    }

    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        FacadeError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        FacadeError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Whether this error came out of the message formatter
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            FacadeError::FormatMismatch { .. } | FacadeError::FormatArgument { .. }
        )
    }

    /// Per-candidate reasons carried by [`FacadeError::NoBackendAvailable`]
    pub fn rejections(&self) -> &[CandidateRejection] {
        match self {
            FacadeError::NoBackendAvailable { rejections, .. } => rejections,
            _ => &[],
        }
    }
}
