use async_trait::async_trait;
use futures::{
    future::RemoteHandle,
    task::{Spawn, SpawnExt},
    Stream, StreamExt,
};
use thiserror::Error;
use tracing::warn;

use crate::{event::Event, EmitterError, StreamError};

///
/// Standartized interface for objects reacting to actions. Typically connected to subscription
/// with [spawn_listener]:
///
/// ```
/// # use async_trait::async_trait;
/// # use observable_event_emitter::{ActionSink, Event};
/// # use std::sync::atomic::{AtomicUsize, Ordering};
/// struct Counter(AtomicUsize);
///
/// #[async_trait]
/// impl ActionSink for Counter {
///     type Error = ();
///     async fn on_action(&self, _event: Event) -> Result<(), Self::Error> {
///         self.0.fetch_add(1, Ordering::Relaxed);
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait ActionSink {
    type Error;
    async fn on_action(&self, event: Event) -> Result<(), Self::Error>;
}

/// Reason why listener task stopped before its stream ended
#[derive(Debug, Error)]
pub enum ListenerError<E> {
    #[error("action sink failed: {0}")]
    Sink(E),
    #[error("event stream failed: {0}")]
    Stream(StreamError),
}

async fn run_listener<S, SINK, E>(mut stream: S, sink: SINK) -> Result<(), ListenerError<E>>
where
    S: Stream<Item = Result<Event, StreamError>> + Unpin,
    SINK: ActionSink<Error = E>,
{
    while let Some(event) = stream.next().await {
        let event = event.map_err(ListenerError::Stream)?;
        sink.on_action(event).await.map_err(ListenerError::Sink)?;
    }
    Ok(())
}

/// Connect stream of actions (e.g. returned by [on](crate::EventEmitter::on)) to [ActionSink]: run asynchronous
/// task which reads actions from stream and calls [ActionSink::on_action] for each of them.
/// The task stops when the stream ends, or on first error, which is passed to ```error_handler```.
pub fn spawn_listener<
    E: Send + 'static,
    SPAWNER: Spawn,
    S: Stream<Item = Result<Event, StreamError>> + Send + Unpin + 'static,
    SINK: ActionSink<Error = E> + Send + Sync + 'static,
>(
    spawner: &SPAWNER,
    stream: S,
    sink: SINK,
    error_handler: impl FnOnce(ListenerError<E>) + Send + 'static,
) -> Result<(), EmitterError> {
    spawner.spawn(async move {
        if let Err(e) = run_listener(stream, sink).await {
            warn!("listener stopped on error");
            error_handler(e)
        }
    })?;
    Ok(())
}

/// Same as [spawn_listener], but also returns handle to task spawned by [futures::task::SpawnExt::spawn_with_handle].
/// Dropping the handle cancels the task.
pub fn spawn_listener_with_handle<
    E: Send + 'static,
    SPAWNER: Spawn,
    S: Stream<Item = Result<Event, StreamError>> + Send + Unpin + 'static,
    SINK: ActionSink<Error = E> + Send + Sync + 'static,
>(
    spawner: &SPAWNER,
    stream: S,
    sink: SINK,
    error_handler: impl FnOnce(ListenerError<E>) + Send + 'static,
) -> Result<RemoteHandle<()>, EmitterError> {
    let handle = spawner.spawn_with_handle(async move {
        if let Err(e) = run_listener(stream, sink).await {
            warn!("listener stopped on error");
            error_handler(e)
        }
    })?;
    Ok(handle)
}
