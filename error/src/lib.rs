use std::fmt;

/// Error taxonomy shared by the store, dao, and REST layers.
///
/// `Validation` and `NotFound` surface to callers as 4xx responses with the
/// contained message. `InvalidState` marks a status-precondition violation
/// (approving a non-pending request). `Store` wraps persistence failures;
/// its detail is for logs only and must not leak to clients.
#[derive(Debug, PartialEq)]
pub enum Error {
    Validation(String),
    NotFound(String),
    InvalidState(String),
    Store(String),
}

impl Error {
    /// Stable machine-readable code for the JSON error body.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::NotFound(_) => "not_found",
            Self::InvalidState(_) => "invalid_state",
            Self::Store(_) => "store_error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Validation(msg)
            | Self::NotFound(msg)
            | Self::InvalidState(msg)
            | Self::Store(msg) => msg,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(Error::Validation("x".to_owned()).code(), "validation_error");
        assert_eq!(Error::NotFound("x".to_owned()).code(), "not_found");
        assert_eq!(Error::InvalidState("x".to_owned()).code(), "invalid_state");
        assert_eq!(Error::Store("x".to_owned()).code(), "store_error");
    }

    #[test]
    fn display_carries_code_and_message() {
        let err = Error::NotFound("project not found".to_owned());
        assert_eq!(err.to_string(), "not_found: project not found");
    }
}
