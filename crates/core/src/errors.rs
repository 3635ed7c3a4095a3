use thiserror::Error;

/// Service-level error taxonomy.
///
/// Every fallible operation in the cart, catalog and order paths resolves to
/// one of these; the route layer maps them to 400/404/500 responses in a
/// single place. Messages are the user-facing ones returned in the
/// `{"error": ...}` body, except for `Storage`, whose detail goes to the
/// logs only.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    NotFound(String),
    #[error("storage unavailable: {0}")]
    Storage(String),
}

impl ServiceError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}
