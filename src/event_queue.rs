use std::{
    collections::VecDeque,
    task::{Poll, Waker},
};

use crate::{event::Event, StreamError};

/// How the broadcast ended
#[derive(Clone, Debug)]
pub(crate) enum Terminal {
    Completed,
    Failed(StreamError),
}

pub(crate) struct EventQueue {
    terminal: Option<Terminal>,
    waker: Option<Waker>,
    events: VecDeque<Event>,
}

impl EventQueue {
    pub fn new(terminal: Option<Terminal>) -> Self {
        Self {
            terminal,
            waker: None,
            events: VecDeque::new(),
        }
    }
    pub fn terminate(&mut self, terminal: Terminal) {
        if self.terminal.is_none() {
            self.terminal = Some(terminal);
        }
        self.wake();
    }
    pub fn wake(&mut self) {
        if let Some(waker) = self.waker.take() {
            waker.wake()
        }
    }
    pub fn put_event(&mut self, event: Event) {
        if self.terminal.is_some() {
            return;
        }
        self.events.push_back(event);
        self.wake();
    }
    /// Queued events first, then the terminal error once, then end of stream
    pub fn poll_event(&mut self, waker: &Waker) -> Poll<Option<Result<Event, StreamError>>> {
        if let Some(event) = self.events.pop_front() {
            return Poll::Ready(Some(Ok(event)));
        }
        match self.terminal.replace(Terminal::Completed) {
            Some(Terminal::Failed(error)) => Poll::Ready(Some(Err(error))),
            Some(Terminal::Completed) => Poll::Ready(None),
            None => {
                self.terminal = None;
                self.waker = Some(waker.clone());
                Poll::Pending
            }
        }
    }
    pub fn is_terminated(&self) -> bool {
        matches!(self.terminal, Some(Terminal::Completed)) && self.events.is_empty()
    }
}

impl Drop for EventQueue {
    fn drop(&mut self) {
        self.wake()
    }
}
