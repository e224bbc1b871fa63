use std::sync::{Arc, Weak};

use futures::future::AbortHandle;
use parking_lot::RwLock;

use crate::{
    event::Event,
    event_queue::{EventQueue, Terminal},
    event_stream::EventStream,
    EmitterError, StreamError,
};

/// Hot broadcast shared by all subscribers of an emitter. Holds only weak references to
/// subscriber queues, so dropped [EventStream]s just disappear from it.
pub(crate) struct EventStreams {
    state: RwLock<State>,
}

struct State {
    terminal: Option<Terminal>,
    queues: EventQueues,
    driver: Option<AbortHandle>,
}

impl EventStreams {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State {
                terminal: None,
                queues: EventQueues::new(),
                driver: None,
            }),
        }
    }
    /// Register task feeding the broadcast. It is aborted when the broadcast terminates.
    pub fn set_driver(&self, driver: AbortHandle) {
        let mut state = self.state.write();
        if state.terminal.is_some() {
            driver.abort();
        } else {
            state.driver = Some(driver);
        }
    }
    /// Return number of subscribers
    pub fn count(&self) -> usize {
        self.state.read().queues.count()
    }
    pub fn is_terminated(&self) -> bool {
        self.state.read().terminal.is_some()
    }
    /// Subscribe to events published from now on. Subscription to terminated broadcast
    /// replays only the terminal notification.
    pub fn create_event_stream(&self) -> EventStream {
        let mut state = self.state.write();
        let event_queue = Arc::new(RwLock::new(EventQueue::new(state.terminal.clone())));
        if state.terminal.is_none() {
            state.queues.add_queue(Arc::downgrade(&event_queue));
        }
        EventStream::new(event_queue)
    }
    /// Put event to all subscriber queues, in subscription order, before returning.
    /// Holds the state lock during delivery: concurrent posts reach every queue in the same
    /// order, and an accepted event is never overtaken by termination.
    pub fn post_event(&self, event: Event) -> Result<(), EmitterError> {
        let state = self.state.write();
        if state.terminal.is_some() {
            return Err(EmitterError::Terminated);
        }
        state
            .queues
            .snapshot()
            .into_iter()
            .for_each(|queue| queue.write().put_event(event.clone()));
        Ok(())
    }
    pub fn complete(&self) -> bool {
        self.terminate(Terminal::Completed)
    }
    pub fn fail(&self, error: StreamError) -> bool {
        self.terminate(Terminal::Failed(error))
    }
    /// Return ```false``` if the broadcast was already terminated
    fn terminate(&self, terminal: Terminal) -> bool {
        let mut state = self.state.write();
        if state.terminal.is_some() {
            return false;
        }
        state.terminal = Some(terminal.clone());
        if let Some(driver) = state.driver.take() {
            driver.abort();
        }
        state.queues.take().terminate(terminal);
        true
    }
}

impl Drop for EventStreams {
    fn drop(&mut self) {
        let state = self.state.get_mut();
        if let Some(driver) = state.driver.take() {
            driver.abort();
        }
        if state.terminal.is_none() {
            state.queues.take().terminate(Terminal::Completed);
        }
    }
}

struct EventQueues(Vec<Weak<RwLock<EventQueue>>>);

impl EventQueues {
    fn new() -> Self {
        Self(Vec::new())
    }
    fn count(&self) -> usize {
        self.0.iter().filter(|w| w.strong_count() > 0).count()
    }
    fn add_queue(&mut self, event_queue: Weak<RwLock<EventQueue>>) {
        self.0.retain(|w| w.strong_count() > 0);
        self.0.push(event_queue);
    }
    /// Live queues at this moment. Delivery iterates the snapshot, so subscribing or
    /// unsubscribing during delivery is safe.
    fn snapshot(&self) -> Vec<Arc<RwLock<EventQueue>>> {
        self.0.iter().filter_map(Weak::upgrade).collect()
    }
    fn take(&mut self) -> Self {
        Self(std::mem::take(&mut self.0))
    }
    fn terminate(self, terminal: Terminal) {
        self.snapshot()
            .into_iter()
            .for_each(|queue| queue.write().terminate(terminal.clone()));
    }
}
