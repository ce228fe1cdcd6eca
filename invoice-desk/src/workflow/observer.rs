//! Synchronous state observers
//!
//! Observers run inline after every successful mutation, in subscription
//! order, and see the state read-only.

use super::state::WorkflowState;

pub trait StateObserver {
    fn on_state_changed(&mut self, state: &WorkflowState);
}

impl<F> StateObserver for F
where
    F: FnMut(&WorkflowState),
{
    fn on_state_changed(&mut self, state: &WorkflowState) {
        self(state)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub(crate) struct ObserverRegistry {
    next_id: u64,
    observers: Vec<(SubscriptionId, Box<dyn StateObserver>)>,
}

impl ObserverRegistry {
    pub(crate) fn subscribe(&mut self, observer: Box<dyn StateObserver>) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.observers.push((id, observer));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    pub(crate) fn notify(&mut self, state: &WorkflowState) {
        for (_, observer) in &mut self.observers {
            observer.on_state_changed(state);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.len()
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.observers.len())
            .finish()
    }
}
