use std::fmt;
use thiserror::Error;

/// Error raised by a caller-supplied [`ScreenFactory`](crate::screen::ScreenFactory).
pub type FactoryError = Box<dyn std::error::Error + Send + Sync>;

pub type TransitionResult<T> = Result<T, TransitionError>;

/// Everything that can go wrong while building or executing a transition.
///
/// Construction-time variants (`ResourceUnavailable`, `Resource`,
/// `FactoryFailure`) abort node creation. The rest surface from the terminal
/// operation of a node.
#[derive(Error, Debug)]
pub enum TransitionError {
    #[error("origin screen has no resource container to instantiate from")]
    ResourceUnavailable,
    #[error(transparent)]
    Resource(#[from] ResourceError),
    #[error("screen factory failed: {0}")]
    FactoryFailure(#[source] FactoryError),
    #[error("link identifier was not set before execution")]
    MissingLinkIdentifier,
    #[error("link `{identifier}` failed")]
    LinkFailed {
        identifier: String,
        #[source]
        source: LinkError,
    },
    #[error("destination screen was not resolved")]
    NilDestination,
    #[error("destination `{found}` is not a `{expected}`")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("no navigation history entry matched the close target")]
    TargetNotFound,
    #[error("origin screen is not embedded in a {0} container")]
    ContainerUnavailable(ContainerKind),
    #[error("origin screen was released before the transition ran")]
    OriginReleased,
}

/// Failure reported by a [`ResourceContainer`](crate::screen::ResourceContainer).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    #[error("no screen registered under `{identifier}`")]
    NotFound { identifier: String },
    #[error("resource container has no initial screen")]
    NoInitialScreen,
}

/// Failure reported by the host while firing a link.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("no link wired under `{identifier}`")]
    Unknown { identifier: String },
    #[error("screen does not support links")]
    Unsupported,
    #[error("host error: {0}")]
    Host(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Navigation,
    Split,
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerKind::Navigation => write!(f, "navigation"),
            ContainerKind::Split => write!(f, "split"),
        }
    }
}
