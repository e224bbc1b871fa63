use std::{convert::Infallible, fmt, sync::Arc};

use futures::task::SpawnError;
use thiserror::Error;

/// Errors returned synchronously to the caller of emitter operations
#[derive(Debug, Error)]
pub enum EmitterError {
    /// Action has no text ```type``` or the type is empty
    #[error("invalid action: {0}")]
    Validation(&'static str),
    /// ```emit``` was called after ```clear``` or after the source failed
    #[error("event emitter has already been terminated")]
    Terminated,
    #[error("invalid type pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("invalid emitter configuration: {0}")]
    InvalidConfig(&'static str),
    /// Executor refused to run the task driving the liveness ticker and the source
    #[error("failed to spawn emitter task: {0}")]
    Spawn(#[from] SpawnError),
}

impl From<Infallible> for EmitterError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// Terminal error delivered to every subscription. It is passed to
/// [clear](crate::EventEmitter::clear) or produced by the external source.
///
/// Cheap to clone: each subscriber receives a copy referencing the same error.
#[derive(Clone)]
pub struct StreamError(Arc<anyhow::Error>);

impl StreamError {
    pub fn new<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self(Arc::new(anyhow::Error::new(error)))
    }
    /// Error carrying only a message
    pub fn msg<M>(message: M) -> Self
    where
        M: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        Self(Arc::new(anyhow::Error::msg(message)))
    }
    /// Access to the original error if it is of type ```E```
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        self.0.downcast_ref::<E>()
    }
}

impl From<anyhow::Error> for StreamError {
    fn from(error: anyhow::Error) -> Self {
        Self(Arc::new(error))
    }
}

impl fmt::Debug for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

impl std::error::Error for StreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

pub type Result<T, E = EmitterError> = std::result::Result<T, E>;
