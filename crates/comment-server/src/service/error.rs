/// Failure kinds of comment operations.
///
/// Messages are safe to show to the caller; store failures are logged
/// before being reduced to a fixed [`CommentError::Persistence`] message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommentError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Persistence(String),
}

impl CommentError {
    pub(crate) fn invalid(message: &str) -> Self {
        Self::InvalidArgument(message.to_string())
    }

    pub(crate) fn not_found(message: &str) -> Self {
        Self::NotFound(message.to_string())
    }

    /// Logs the store failure and hides it behind `action`.
    pub(crate) fn persistence(action: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |err| {
            tracing::error!("{}: {}", action, err);
            Self::Persistence(action.to_string())
        }
    }
}
