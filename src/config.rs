use std::{fmt, time::Duration};

use futures::{
    stream::{self, BoxStream},
    Stream, StreamExt,
};

use crate::{Action, EmitterError, StreamError};

/// Interval between liveness ticks used when none is configured
pub const DEFAULT_PING_TIMEOUT: Duration = Duration::from_millis(1000);
/// Type of liveness tick actions used when none is configured
pub const DEFAULT_ALIVE_TYPE: &str = "KEEP_ALIVE";

/// Options of [EventEmitter](crate::EventEmitter)
///
/// ```
/// use std::time::Duration;
/// use futures::stream;
/// use observable_event_emitter::{Action, EmitterConfig};
///
/// let config = EmitterConfig::new()
///     .ping_timeout(Duration::from_millis(50))
///     .alive_type("PING")
///     .source(stream::iter(vec![Ok(Action::new("BOOT").unwrap())]));
/// assert_eq!(config.get_alive_type(), "PING");
/// ```
pub struct EmitterConfig {
    pub(crate) source: Option<BoxStream<'static, Result<Action, StreamError>>>,
    pub(crate) ping_timeout: Duration,
    pub(crate) alive_type: String,
}

impl EmitterConfig {
    pub fn new() -> Self {
        Self::default()
    }
    /// External stream merged into the broadcast. The emitter only consumes it; an error from it
    /// terminates the emitter as [clear](crate::EventEmitter::clear) with that error would.
    pub fn source<S>(mut self, source: S) -> Self
    where
        S: Stream<Item = Result<Action, StreamError>> + Send + 'static,
    {
        self.source = Some(source.boxed());
        self
    }
    /// Interval between liveness ticks
    pub fn ping_timeout(mut self, ping_timeout: Duration) -> Self {
        self.ping_timeout = ping_timeout;
        self
    }
    /// Type of liveness tick actions
    pub fn alive_type(mut self, alive_type: impl Into<String>) -> Self {
        self.alive_type = alive_type.into();
        self
    }
    pub fn get_ping_timeout(&self) -> Duration {
        self.ping_timeout
    }
    pub fn get_alive_type(&self) -> &str {
        &self.alive_type
    }
    pub(crate) fn validate(&self) -> Result<(), EmitterError> {
        if self.ping_timeout.is_zero() {
            return Err(EmitterError::InvalidConfig("ping timeout must be positive"));
        }
        if self.alive_type.is_empty() {
            return Err(EmitterError::InvalidConfig("alive type must not be empty"));
        }
        Ok(())
    }
    pub(crate) fn take_source(&mut self) -> BoxStream<'static, Result<Action, StreamError>> {
        self.source.take().unwrap_or_else(|| stream::empty().boxed())
    }
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            source: None,
            ping_timeout: DEFAULT_PING_TIMEOUT,
            alive_type: DEFAULT_ALIVE_TYPE.to_owned(),
        }
    }
}

impl fmt::Debug for EmitterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmitterConfig")
            .field("source", &self.source.is_some())
            .field("ping_timeout", &self.ping_timeout)
            .field("alive_type", &self.alive_type)
            .finish()
    }
}
