use std::{
    pin::Pin,
    task::{Context, Poll},
};

use futures::{ready, Stream, StreamExt};

use crate::{Action, Matcher, TypePattern};

/// Stream passing through only actions which type satisfies the pattern. Errors from upstream
/// are passed unchanged and the stream ends only when upstream ends.
///
/// Created by [filter_by_pattern] or [FilterByPatternExt::filter_by_pattern].
#[derive(Debug)]
pub struct FilterByPattern<S, P> {
    stream: S,
    pattern: P,
}

impl<S, P> FilterByPattern<S, P> {
    pub fn new(stream: S, pattern: P) -> Self {
        Self { stream, pattern }
    }
    pub fn pattern(&self) -> &P {
        &self.pattern
    }
    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S, P, A, E> Stream for FilterByPattern<S, P>
where
    S: Stream<Item = Result<A, E>> + Unpin,
    P: TypePattern + Unpin,
    A: AsRef<Action>,
{
    type Item = Result<A, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            match ready!(this.stream.poll_next_unpin(cx)) {
                Some(Ok(action)) if !this.pattern.matches(action.as_ref().action_type()) => continue,
                item => return Poll::Ready(item),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.stream.size_hint().1)
    }
}

/// Standalone pattern filter operator: returns transformation which narrows any action stream
/// to actions matching ```matcher```. It is the primitive behind [on](crate::EventEmitter::on)
/// and can be used to compose custom pipelines.
///
/// ```
/// use futures::{executor::block_on, stream, StreamExt};
/// use observable_event_emitter::{filter_by_pattern, Action, StreamError};
///
/// let actions = stream::iter(vec![
///     Ok::<_, StreamError>(Action::new("A").unwrap()),
///     Ok(Action::new("B").unwrap()),
/// ]);
/// let only_b = filter_by_pattern("B")(actions);
/// let types: Vec<_> = block_on(only_b.map(|a| a.unwrap().action_type().to_owned()).collect());
/// assert_eq!(types, vec!["B"]);
/// ```
pub fn filter_by_pattern<S>(
    matcher: impl Into<Matcher>,
) -> impl FnOnce(S) -> FilterByPattern<S, Matcher> {
    let matcher = matcher.into();
    move |stream| FilterByPattern::new(stream, matcher)
}

/// Pattern filter as method of any stream of action results
pub trait FilterByPatternExt: Stream + Sized {
    fn filter_by_pattern<P: TypePattern>(self, pattern: P) -> FilterByPattern<Self, P> {
        FilterByPattern::new(self, pattern)
    }
}

impl<S: Stream> FilterByPatternExt for S {}
