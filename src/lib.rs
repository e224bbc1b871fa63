//!
//! Event emitter publishing actions to multiple consumers as asynchronous streams
//!
//! # Usage sample
//!
//! ```
//! use futures::{executor::LocalPool, StreamExt};
//! use observable_event_emitter::{create_event_emitter, Action, EmitterConfig, Matcher};
//! use serde_json::json;
//!
//! let mut pool = LocalPool::new();
//! let emitter = create_event_emitter(&pool.spawner(), EmitterConfig::default()).unwrap();
//!
//! let mut orders = emitter.on([Matcher::regex("^ORDER_").unwrap()]);
//! let mut first = emitter.once("USER");
//!
//! emitter.emit(json!({ "type": "ORDER_CREATED", "id": 1 })).unwrap();
//! emitter.emit(Action::new("USER_LOGGED_IN").unwrap()).unwrap();
//! emitter.emit(Action::new("USER_LOGGED_OUT").unwrap()).unwrap();
//! assert!(emitter.emit(json!({ "type": 42 })).is_err());
//! emitter.clear(None);
//!
//! pool.run_until(async move {
//!     let order = orders.next().await.unwrap().unwrap();
//!     assert_eq!(order.get("id"), Some(&json!(1)));
//!     assert!(orders.next().await.is_none());
//!
//!     let user = first.next().await.unwrap().unwrap();
//!     assert_eq!(user.action_type(), "USER_LOGGED_IN");
//!     assert!(first.next().await.is_none());
//! });
//! ```
//!
//! # Producers
//!
//! [EventEmitter] merges three producers into one hot broadcast:
//!
//! - actions passed to [emit](EventEmitter::emit). They are put to subscriber streams before ```emit``` returns.
//! - actions of external stream set by [EmitterConfig::source]. The emitter consumes it in a task spawned on the executor
//!   passed at construction, but never owns its lifetime: the stream is just dropped when the emitter terminates.
//! - liveness ticks: actions of type [EmitterConfig::alive_type] generated every [EmitterConfig::ping_timeout] by the same task.
//!   They keep the broadcast busy and are never delivered to subscribers. Actions of the same type coming
//!   from ```emit``` or from the source are delivered as usual.
//!
//! Subscriptions receive only actions published after they were created; nothing is buffered for late subscribers.
//!
//! # Termination
//!
//! [clear](EventEmitter::clear) terminates the emitter irreversibly. Without error all subscription streams end.
//! With error each subscription yields ```Err(error)``` after already queued actions and then ends.
//! An error from the external source terminates the emitter in the same way. After termination
//! [emit](EventEmitter::emit) fails with [EmitterError::Terminated].
//!
//! Dropping all [EventEmitter] handles ends all subscriptions as well.
//!

mod action;
mod config;
mod emitter;
mod error;
mod event;
mod event_queue;
mod event_stream;
mod event_streams;
mod filter;
mod matcher;
mod pipes;

pub use action::{Action, TYPE_FIELD};
pub use config::{EmitterConfig, DEFAULT_ALIVE_TYPE, DEFAULT_PING_TIMEOUT};
pub use emitter::{create_event_emitter, EventEmitter, On, Once};
pub use error::{EmitterError, Result, StreamError};
pub use event::Event;
pub use event_stream::EventStream;
pub use filter::{filter_by_pattern, FilterByPattern, FilterByPatternExt};
pub use matcher::{Matcher, TypePattern};
pub use pipes::{spawn_listener, spawn_listener_with_handle, ActionSink, ListenerError};
