/// Errors surfaced by the frame engine.
///
/// The projection itself never fails. These cover decoding an executor
/// payload and the explicit [`Frame::check`](crate::frame::Frame::check).
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("decode result set: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("frame '{frame}': column '{column}' has {actual} rows, expected {expected}")]
    ColumnLength {
        frame: String,
        column: String,
        expected: usize,
        actual: usize,
    },
}

impl FormatError {
    /// Add context to the error.
    ///
    /// For `ColumnLength`, context is prepended to the frame name.
    /// `Decode` keeps the inner serde error untouched.
    pub fn with_context(self, ctx: impl std::fmt::Display) -> Self {
        match self {
            FormatError::ColumnLength {
                frame,
                column,
                expected,
                actual,
            } => FormatError::ColumnLength {
                frame: format!("{ctx}: {frame}"),
                column,
                expected,
                actual,
            },
            other => other,
        }
    }
}
