use std::{
    pin::Pin,
    sync::{Arc, Weak},
    task::{Context, Poll},
    time::Duration,
};

use async_std::task::sleep;
use futures::{
    future::Abortable,
    stream::{self, select, FusedStream},
    task::{Spawn, SpawnExt},
    Stream, StreamExt,
};
use tracing::{debug, info, trace, warn};

use crate::{
    event::Event, event_stream::EventStream, event_streams::EventStreams, Action, EmitterConfig,
    EmitterError, FilterByPattern, FilterByPatternExt, Matcher, Result, StreamError,
};

/// View of the broadcast returned by [EventEmitter::on]
pub type On = FilterByPattern<EventStream, Vec<Matcher>>;

/// Event emitter with asynchronous streams as listeners.
///
/// The emitter merges three producers into one hot broadcast: actions passed to [emit](Self::emit),
/// actions of the external source from [EmitterConfig::source] and liveness ticks generated every
/// ping timeout. Ticks keep the broadcast busy and are never delivered to subscribers.
///
/// Clones of ```EventEmitter``` are handles to the same emitter. When all handles are dropped, all
/// subscriptions end.
#[derive(Clone)]
pub struct EventEmitter {
    streams: Arc<EventStreams>,
    ping_timeout: Duration,
    alive_type: Arc<str>,
}

impl EventEmitter {
    /// Create emitter. The task driving the liveness ticker and the external source is spawned on
    /// ```spawner``` and runs until the emitter is cleared or dropped.
    pub fn new<SPAWNER: Spawn>(spawner: &SPAWNER, mut config: EmitterConfig) -> Result<Self> {
        config.validate()?;
        let tick = Action::new(config.alive_type.clone())?;
        let streams = Arc::new(EventStreams::new());

        let produced = select(
            liveness_ticks(config.ping_timeout, tick).map(Produced::Tick),
            config.take_source().map(Produced::Source),
        );
        let (produced, driver) = stream::abortable(produced);
        streams.set_driver(driver);
        spawner.spawn(drive(Arc::downgrade(&streams), produced))?;

        debug!(
            ping_timeout = ?config.ping_timeout,
            alive_type = %config.alive_type,
            "event emitter created"
        );
        Ok(Self {
            streams,
            ping_timeout: config.ping_timeout,
            alive_type: config.alive_type.into(),
        })
    }

    /// Subscribe to actions which type matches any of ```matchers```. Empty set of matchers gives
    /// stream which never yields an action.
    ///
    /// Each call creates independent subscription receiving actions emitted from now on.
    pub fn on<I>(&self, matchers: I) -> On
    where
        I: IntoIterator,
        I::Item: Into<Matcher>,
    {
        let matchers: Vec<Matcher> = matchers.into_iter().map(Into::into).collect();
        debug!(?matchers, "subscribing");
        self.streams.create_event_stream().filter_by_pattern(matchers)
    }

    /// Subscribe to the first action matching ```matcher```. The stream ends after yielding it.
    pub fn once(&self, matcher: impl Into<Matcher>) -> Once {
        Once(Some(self.on([matcher.into()])))
    }

    /// Deliver action to every current subscriber. Accepts [Action] or anything convertible to it,
    /// e.g. [serde_json::Value].
    ///
    /// Fails with [EmitterError::Validation] if ```action``` has no non-empty text type and with
    /// [EmitterError::Terminated] after [clear](Self::clear). Nothing is delivered on failure.
    pub fn emit<A>(&self, action: A) -> Result<()>
    where
        A: TryInto<Action>,
        EmitterError: From<A::Error>,
    {
        let action = action.try_into()?;
        debug!(action_type = action.action_type(), "emitting");
        self.streams
            .post_event(Event::new(action))
            .inspect_err(|_| warn!("emit called on terminated event emitter"))
    }

    /// Terminate the emitter. Subscriptions end; if ```error``` is given, each of them yields it
    /// as the last item. The liveness ticker and the external source are not polled anymore.
    ///
    /// Terminating is irreversible. Calls after the first have no effect.
    pub fn clear<E: Into<Option<StreamError>>>(&self, error: E) {
        let terminated = match error.into() {
            Some(error) => {
                info!(%error, "event emitter cleared with error");
                self.streams.fail(error)
            }
            None => {
                info!("event emitter cleared");
                self.streams.complete()
            }
        };
        if !terminated {
            debug!("event emitter was already terminated");
        }
    }

    /// Return number of subscribers
    pub fn subscriber_count(&self) -> usize {
        self.streams.count()
    }
    pub fn is_terminated(&self) -> bool {
        self.streams.is_terminated()
    }
    pub fn ping_timeout(&self) -> Duration {
        self.ping_timeout
    }
    pub fn alive_type(&self) -> &str {
        &self.alive_type
    }
}

/// Create [EventEmitter] driven by ```spawner```
pub fn create_event_emitter<SPAWNER: Spawn>(
    spawner: &SPAWNER,
    config: EmitterConfig,
) -> Result<EventEmitter> {
    EventEmitter::new(spawner, config)
}

/// Stream returned by [EventEmitter::once]. Releases its subscription as soon as it yields
/// an item.
pub struct Once(Option<On>);

impl Stream for Once {
    type Item = Result<Event, StreamError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        let Some(on) = this.0.as_mut() else {
            return Poll::Ready(None);
        };
        let item = futures::ready!(on.poll_next_unpin(cx));
        this.0 = None;
        Poll::Ready(item)
    }
}

impl FusedStream for Once {
    fn is_terminated(&self) -> bool {
        self.0.is_none()
    }
}

enum Produced {
    Tick(Action),
    Source(Result<Action, StreamError>),
}

fn liveness_ticks(period: Duration, tick: Action) -> impl Stream<Item = Action> + Send {
    stream::unfold(tick, move |tick| async move {
        sleep(period).await;
        Some((tick.clone(), tick))
    })
}

async fn drive<S>(streams: Weak<EventStreams>, produced: Abortable<S>)
where
    S: Stream<Item = Produced>,
{
    futures::pin_mut!(produced);
    while let Some(item) = produced.next().await {
        let Some(streams) = streams.upgrade() else {
            break;
        };
        match item {
            Produced::Tick(tick) => trace!(action_type = tick.action_type(), "liveness tick"),
            Produced::Source(Ok(action)) => {
                trace!(action_type = action.action_type(), "source action");
                if streams.post_event(Event::new(action)).is_err() {
                    break;
                }
            }
            Produced::Source(Err(error)) => {
                warn!(%error, "event source failed");
                streams.fail(error);
                break;
            }
        }
    }
    trace!("event emitter driver stopped");
}
