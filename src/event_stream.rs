use std::{
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use futures::{stream::FusedStream, Stream};
use parking_lot::RwLock;

use crate::{event::Event, event_queue::EventQueue, StreamError};

/// Asychronous stream of all actions published by [EventEmitter](crate::EventEmitter) after the stream was created.
///
/// Yields ```Ok(Event)``` while the emitter is alive. If the emitter is cleared with an error, that error is
/// the last item. The stream ends when the emitter is cleared or all its handles are dropped.
/// Dropping the stream unsubscribes it without affecting other subscribers.
pub struct EventStream {
    event_queue: Arc<RwLock<EventQueue>>,
}

impl EventStream {
    pub(crate) fn new(event_queue: Arc<RwLock<EventQueue>>) -> Self {
        Self { event_queue }
    }
}

impl Stream for EventStream {
    type Item = Result<Event, StreamError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.event_queue.write().poll_event(cx.waker())
    }
}

impl FusedStream for EventStream {
    fn is_terminated(&self) -> bool {
        self.event_queue.read().is_terminated()
    }
}
