use async_std::future::timeout;
use async_std::sync::RwLock;
use async_trait::async_trait;
use futures::{
    executor::{block_on, LocalPool, ThreadPool},
    StreamExt,
};
use observable_event_emitter::{
    create_event_emitter, spawn_listener, spawn_listener_with_handle, Action, ActionSink,
    EmitterConfig, Event, ListenerError, StreamError,
};
use std::sync::{mpsc::channel, Arc};
use std::time::Duration;

struct Recorder {
    types: Arc<RwLock<Vec<String>>>,
}

#[async_trait]
impl ActionSink for Recorder {
    type Error = String;
    async fn on_action(&self, event: Event) -> Result<(), Self::Error> {
        if event.action_type() == "POISON" {
            return Err(format!("refused {}", event.action_type()));
        }
        self.types.write().await.push(event.action_type().to_owned());
        Ok(())
    }
}

#[test]
fn test_listener_receives_matching_actions() {
    let mut pool = LocalPool::new();
    let emitter = create_event_emitter(&pool.spawner(), EmitterConfig::default()).unwrap();
    let types = Arc::new(RwLock::new(Vec::new()));
    let handle = spawn_listener_with_handle(
        &pool.spawner(),
        emitter.on(["ORDER"]),
        Recorder {
            types: types.clone(),
        },
        |_| panic!("listener must not fail"),
    )
    .unwrap();

    emitter.emit(Action::new("ORDER_CREATED").unwrap()).unwrap();
    emitter.emit(Action::new("USER_CREATED").unwrap()).unwrap();
    emitter.emit(Action::new("ORDER_PAID").unwrap()).unwrap();
    emitter.clear(None);

    pool.run_until(async move {
        timeout(Duration::from_secs(5), handle).await.unwrap();
        assert_eq!(*types.read().await, vec!["ORDER_CREATED", "ORDER_PAID"]);
    });
}

#[test]
fn test_listener_stops_on_sink_error() {
    let mut pool = LocalPool::new();
    let emitter = create_event_emitter(&pool.spawner(), EmitterConfig::default()).unwrap();
    let types = Arc::new(RwLock::new(Vec::new()));
    let (tx, rx) = channel();
    spawn_listener(
        &pool.spawner(),
        emitter.on(["A", "POISON"]),
        Recorder {
            types: types.clone(),
        },
        move |e| tx.send(e.to_string()).unwrap(),
    )
    .unwrap();

    emitter.emit(Action::new("A").unwrap()).unwrap();
    emitter.emit(Action::new("POISON").unwrap()).unwrap();
    emitter.emit(Action::new("A").unwrap()).unwrap();

    pool.run_until_stalled();
    assert_eq!(rx.try_recv().unwrap(), "action sink failed: refused POISON");
    assert_eq!(*pool.run_until(types.read()), vec!["A"]);
    // The listener dropped its subscription when it stopped
    assert_eq!(emitter.subscriber_count(), 0);
}

#[test]
fn test_listener_reports_stream_error() {
    let mut pool = LocalPool::new();
    let emitter = create_event_emitter(&pool.spawner(), EmitterConfig::default()).unwrap();
    let (tx, rx) = channel();
    spawn_listener(
        &pool.spawner(),
        emitter.once("A"),
        Recorder {
            types: Arc::new(RwLock::new(Vec::new())),
        },
        move |e| {
            let stream_error = matches!(e, ListenerError::Stream(_));
            tx.send((stream_error, e.to_string())).unwrap()
        },
    )
    .unwrap();
    emitter.clear(StreamError::msg("shutdown"));

    pool.run_until_stalled();
    let (stream_error, message) = rx.try_recv().unwrap();
    assert!(stream_error);
    assert_eq!(message, "event stream failed: shutdown");
}

#[test]
fn test_dropping_handle_cancels_listener() {
    let mut pool = LocalPool::new();
    let emitter = create_event_emitter(&pool.spawner(), EmitterConfig::default()).unwrap();
    let types = Arc::new(RwLock::new(Vec::new()));
    let handle = spawn_listener_with_handle(
        &pool.spawner(),
        emitter.on(["A"]),
        Recorder {
            types: types.clone(),
        },
        |_| (),
    )
    .unwrap();
    pool.run_until_stalled();
    assert_eq!(emitter.subscriber_count(), 1);
    drop(handle);
    pool.run_until_stalled();
    assert_eq!(emitter.subscriber_count(), 0);
    emitter.emit(Action::new("A").unwrap()).unwrap();
    pool.run_until_stalled();
    assert!(pool.run_until(types.read()).is_empty());
    let mut unused = emitter.on(["A"]);
    emitter.clear(None);
    assert!(pool.run_until(unused.next()).is_none());
}

#[test]
fn test_emitter_on_thread_pool() {
    let pool = ThreadPool::new().unwrap();
    let emitter = create_event_emitter(&pool, EmitterConfig::default()).unwrap();
    let types = Arc::new(RwLock::new(Vec::new()));
    let handle = spawn_listener_with_handle(
        &pool,
        emitter.on(["A"]),
        Recorder {
            types: types.clone(),
        },
        |_| (),
    )
    .unwrap();
    for _ in 0..10 {
        emitter.emit(Action::new("A").unwrap()).unwrap();
    }
    emitter.clear(None);
    block_on(timeout(Duration::from_secs(5), handle)).unwrap();
    assert_eq!(block_on(types.read()).len(), 10);
}
