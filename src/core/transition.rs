//! The result of applying one input or tick.

use smallvec::SmallVec;

use super::event::GameEvent;
use super::state::GameState;
use crate::error::Rejection;

/// Events produced by a single transition.
///
/// Most transitions emit zero to two events, so they stay inline.
pub type Events = SmallVec<[GameEvent; 4]>;

/// New state plus everything the driver needs to react to it.
#[derive(Clone, Debug)]
pub struct Transition {
    /// State after the transition.
    pub state: GameState,
    /// Side-effect requests, in the order they happened.
    pub events: Events,
    /// Set when the action was refused.
    pub rejection: Option<Rejection>,
}

impl Transition {
    /// A transition that produced `state` with no events yet.
    #[must_use]
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            events: SmallVec::new(),
            rejection: None,
        }
    }

    /// A transition that changed nothing.
    #[must_use]
    pub fn unchanged(state: &GameState) -> Self {
        Self::new(state.clone())
    }

    /// A refused action.
    ///
    /// Logged reasons are added to the message log and reported as a
    /// [`GameEvent::Blocked`]; silent ones only set `rejection`.
    #[must_use]
    pub fn rejected(mut state: GameState, reason: Rejection) -> Self {
        tracing::debug!(%reason, "action rejected");
        let mut events = Events::new();
        if reason.is_logged() {
            state.log(reason.to_string());
            events.push(GameEvent::Blocked { reason: reason.clone() });
        }
        Self {
            state,
            events,
            rejection: Some(reason),
        }
    }

    /// Record an event.
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// True if the action was refused.
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        self.rejection.is_some()
    }

    /// Drop the events and keep the state.
    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }
}
