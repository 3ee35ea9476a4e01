#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A submitted value falls outside what the form's widgets can produce
    /// (score out of range, unknown option label, malformed number).
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// The remote worksheet rejected or failed to receive the row.
    #[error("Failed to append row: {0}")]
    Append(String),
}

impl CoreError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}
