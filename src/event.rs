use std::{fmt, ops::Deref, sync::Arc};

use crate::Action;

/// Reference-counting container with action. Each subscription receives clone of ```Event``` referencing the same
/// instance of [Action], so the action is shared between subscribers and can't be modified by any of them.
///
/// Use [Event::into_action] to get owned copy of the action.
#[derive(Clone, PartialEq)]
pub struct Event(Arc<Action>);

impl Event {
    pub(crate) fn new(action: Action) -> Self {
        Self(Arc::new(action))
    }
    /// Take the action out, cloning it only if other subscribers still hold the same event
    pub fn into_action(self) -> Action {
        Arc::try_unwrap(self.0).unwrap_or_else(|shared| (*shared).clone())
    }
}

impl AsRef<Action> for Event {
    fn as_ref(&self) -> &Action {
        &self.0
    }
}

impl Deref for Event {
    type Target = Action;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Event> for Action {
    fn from(event: Event) -> Self {
        event.into_action()
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}
