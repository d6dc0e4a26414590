pub type ConvertResult<T> = Result<T, ConvertError>;

#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    #[error("validation error: {0}")]
    Validation(String),

    /// Strict mode only: unparseable numeric literal, unexpected
    /// character, truncated argument list, or drawing before the first
    /// move command.
    #[error("malformed path at byte {offset}: {message}")]
    MalformedPath { offset: usize, message: String },

    /// Strict mode only: a command recognized by the grammar but not
    /// convertible to geometry (`Q`, `q`, `T`, `t`, `A`, `a`).
    #[error("unsupported path command '{cmd}' at byte {offset}")]
    UnsupportedCommand { cmd: char, offset: usize },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ConvertError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn malformed(offset: usize, message: impl Into<String>) -> Self {
        Self::MalformedPath {
            offset,
            message: message.into(),
        }
    }

    pub fn unsupported(cmd: char, offset: usize) -> Self {
        Self::UnsupportedCommand { cmd, offset }
    }
}
