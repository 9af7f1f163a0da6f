//! Unified Error Model
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MtrackError {
    #[error("SHAPE/{0}")]
    ShapeError(String),

    #[error("UPSTREAM/{0}")]
    UpstreamError(String),

    #[error("TRANSITION/{0}")]
    TransitionError(String),

    #[error("NOT_FOUND/{0}")]
    NotFound(String),

    #[error("NOT_READY/{0}")]
    NotReady(String),

    #[error("TEMPLATE/{0}")]
    TemplateError(String),

    #[error("CONFIG/{0}")]
    ConfigError(String),
}

impl MtrackError {
    /// The message without its area prefix, for display to operators.
    pub fn detail(&self) -> &str {
        match self {
            Self::ShapeError(m)
            | Self::UpstreamError(m)
            | Self::TransitionError(m)
            | Self::NotFound(m)
            | Self::NotReady(m)
            | Self::TemplateError(m)
            | Self::ConfigError(m) => m,
        }
    }
}
