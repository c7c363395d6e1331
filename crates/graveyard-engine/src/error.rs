//! Engine error types
//!
//! Error definitions with transient/permanent classification driving the
//! retry logic. Transient errors are retried with backoff; permanent
//! errors fail the affected account immediately.

use thiserror::Error;

use crate::ids::{AccountId, GroupId};

/// Result alias used throughout the engine.
pub type EngineResult<T> = Result<T, EngineError>;

/// Error that can occur while reconciling the holding group.
#[derive(Debug, Error)]
pub enum EngineError {
    // Throttling / availability errors (transient)
    /// The directory service is rate limiting requests.
    #[error("directory throttled the request: {message}")]
    Throttled { message: String },

    /// The directory service is temporarily unavailable.
    #[error("directory unavailable: {message}")]
    ServiceUnavailable { message: String },

    /// Failed to reach the directory service.
    #[error("connection failed: {message}")]
    ConnectionFailed {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The request timed out.
    #[error("request timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    // Missing-resource errors (permanent)
    /// No group with the requested name exists anywhere in the tree.
    /// This is the only invocation-fatal condition.
    #[error("could not find group with name: {name}")]
    GroupNotFound { name: String },

    /// The organization root could not be resolved.
    #[error("organization root not found")]
    RootNotFound,

    /// The account vanished between listing and acting on it.
    #[error("account not found: {account_id}")]
    AccountNotFound { account_id: AccountId },

    /// The destination group vanished after it was resolved.
    #[error("destination group not found: {group_id}")]
    DestinationNotFound { group_id: GroupId },

    /// No parent link exists for the account.
    #[error("could not find parent for account: {account_id}")]
    ParentNotFound { account_id: AccountId },

    // Auth errors (permanent)
    /// Invalid credentials.
    #[error("authentication failed: invalid credentials")]
    AuthenticationFailed,

    /// Insufficient permissions for the operation.
    #[error("authorization failed: insufficient permissions for {operation}")]
    AuthorizationFailed { operation: String },

    // Protocol errors (permanent)
    /// The directory returned a response the client could not interpret.
    #[error("invalid directory response: {message}")]
    InvalidResponse { message: String },

    /// Any other directory-side failure.
    #[error("directory error: {message}")]
    Directory {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl EngineError {
    /// Check if this error is transient and the operation should be retried.
    ///
    /// Transient errors are those caused by temporary conditions that may
    /// resolve themselves, such as throttling or a brief outage.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            EngineError::Throttled { .. }
                | EngineError::ServiceUnavailable { .. }
                | EngineError::ConnectionFailed { .. }
                | EngineError::Timeout { .. }
        )
    }

    /// Check if this error is permanent and retry won't help.
    pub fn is_permanent(&self) -> bool {
        !self.is_transient()
    }

    /// Get an error code for classification in logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            EngineError::Throttled { .. } => "THROTTLED",
            EngineError::ServiceUnavailable { .. } => "SERVICE_UNAVAILABLE",
            EngineError::ConnectionFailed { .. } => "CONNECTION_FAILED",
            EngineError::Timeout { .. } => "TIMEOUT",
            EngineError::GroupNotFound { .. } => "GROUP_NOT_FOUND",
            EngineError::RootNotFound => "ROOT_NOT_FOUND",
            EngineError::AccountNotFound { .. } => "ACCOUNT_NOT_FOUND",
            EngineError::DestinationNotFound { .. } => "DESTINATION_NOT_FOUND",
            EngineError::ParentNotFound { .. } => "PARENT_NOT_FOUND",
            EngineError::AuthenticationFailed => "AUTH_FAILED",
            EngineError::AuthorizationFailed { .. } => "AUTHORIZATION_FAILED",
            EngineError::InvalidResponse { .. } => "INVALID_RESPONSE",
            EngineError::Directory { .. } => "DIRECTORY_ERROR",
        }
    }

    // Convenience constructors

    /// Create a throttled error.
    pub fn throttled(message: impl Into<String>) -> Self {
        EngineError::Throttled {
            message: message.into(),
        }
    }

    /// Create a service-unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        EngineError::ServiceUnavailable {
            message: message.into(),
        }
    }

    /// Create a connection-failed error.
    pub fn connection_failed(message: impl Into<String>) -> Self {
        EngineError::ConnectionFailed {
            message: message.into(),
            source: None,
        }
    }

    /// Create a generic directory error.
    pub fn directory(message: impl Into<String>) -> Self {
        EngineError::Directory {
            message: message.into(),
            source: None,
        }
    }

    /// Create a generic directory error wrapping a source error.
    pub fn directory_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        EngineError::Directory {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid-response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        EngineError::InvalidResponse {
            message: message.into(),
        }
    }
}
