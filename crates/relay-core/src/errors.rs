//! Cross-cutting error types for Relay.
//!
//! Domain errors raised by the pure core. Transport errors live in
//! `relay-client`, which wraps [`CoreError`] and adds the transient category.
//! Every error maps onto one [`ErrorKind`] so callers can decide how to
//! surface it without matching on individual variants.

use std::fmt;

use thiserror::Error;

/// User-facing error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Caller-supplied input failed a precondition. Never retried.
    Validation,
    /// The referenced entity does not exist or is not available yet.
    NotFound,
    /// Network or timeout failure talking to the backend.
    Transient,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Transient => "transient",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by the domain core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Input failed validation. `field` names the offending input.
    #[error("Validation error on '{field}': {message}")]
    Validation { field: String, message: String },

    /// A state machine transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// The assignee already dispatched this requirement.
    #[error("Requirement {requirement_id} was already dispatched by {user_id}")]
    AlreadyDispatched {
        requirement_id: String,
        user_id: String,
    },

    /// The user is not an assignee of the requirement.
    #[error("User {user_id} is not assigned to requirement {requirement_id}")]
    NotAssigned {
        requirement_id: String,
        user_id: String,
    },

    /// The conversation log no longer accepts turns.
    #[error("Conversation log for task {task_id} is closed (task is {status})")]
    LogClosed { task_id: String, status: String },

    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },
}

impl CoreError {
    /// Shorthand for a [`CoreError::Validation`].
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Category used to decide how the error is surfaced.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. }
            | Self::InvalidTransition { .. }
            | Self::AlreadyDispatched { .. }
            | Self::NotAssigned { .. }
            | Self::LogClosed { .. } => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
        }
    }

    /// The input field the error is tied to, when there is one.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            Self::AlreadyDispatched { .. } | Self::NotAssigned { .. } => Some("userId"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_errors_are_validation() {
        let err = CoreError::AlreadyDispatched {
            requirement_id: "req-1".into(),
            user_id: "u1".into(),
        };
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.field(), Some("userId"));
    }

    #[test]
    fn not_found_is_its_own_kind() {
        let err = CoreError::NotFound {
            entity_type: "report".into(),
            id: "tsk-1".into(),
        };
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Entity not found: report tsk-1");
    }

    #[test]
    fn validation_message_names_field() {
        let err = CoreError::validation("gitRepos[0].baseBranch", "must not be empty");
        assert!(err.to_string().contains("gitRepos[0].baseBranch"));
        assert_eq!(err.field(), Some("gitRepos[0].baseBranch"));
    }
}
