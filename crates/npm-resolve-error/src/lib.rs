use std::fmt;

#[derive(Debug, Clone)]
pub enum ResolveError {
    /// Registry unreachable, non-2xx, unparseable body, or no version satisfies the descriptor.
    PackageNotFound {
        name: String,
        descriptor: String,
        reason: String,
        cause: Option<String>,
    },
    InvalidArguments(String),
}

impl ResolveError {
    #[must_use]
    pub fn not_found(name: impl Into<String>, descriptor: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PackageNotFound {
            name: name.into(),
            descriptor: descriptor.into(),
            reason: reason.into(),
            cause: None,
        }
    }

    #[must_use]
    pub fn with_cause(mut self, cause: impl fmt::Display) -> Self {
        if let Self::PackageNotFound { cause: slot, .. } = &mut self {
            *slot = Some(cause.to_string());
        }
        self
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PackageNotFound {
                name,
                descriptor,
                reason,
                cause,
            } => {
                write!(f, "package '{name}@{descriptor}' not found: {reason}")?;
                if let Some(cause) = cause {
                    write!(f, " (cause: {cause})")?;
                }
                Ok(())
            }
            Self::InvalidArguments(msg) => write!(f, "invalid arguments: {msg}"),
        }
    }
}

impl std::error::Error for ResolveError {}

pub type Result<T> = std::result::Result<T, ResolveError>;
