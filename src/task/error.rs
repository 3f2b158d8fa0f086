//! Task domain errors.

#[derive(Debug, Clone, thiserror::Error)]
pub enum TaskError {
    #[error("task {0} not found")]
    NotFound(i64),

    #[error("{0}")]
    Validation(String),

    /// Opaque storage failure. The in-memory repository never raises this;
    /// it exists for durable implementations of the repository contract.
    #[error("storage error: {0}")]
    Storage(String),
}

impl TaskError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
