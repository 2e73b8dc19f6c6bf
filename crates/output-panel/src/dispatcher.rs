use crate::actions::Action;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Thread-safe action queue
///
/// Cloned into middleware, registry callbacks, producer threads and the
/// logger; everything they dispatch is processed by the main loop in FIFO
/// order.
#[derive(Clone, Default)]
pub struct Dispatcher {
    queue: Arc<Mutex<VecDeque<Action>>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an action for the next loop iteration
    pub fn dispatch(&self, action: Action) {
        if let Ok(mut queue) = self.queue.lock() {
            queue.push_back(action);
        }
    }

    /// Pop the oldest queued action
    pub fn pop(&self) -> Option<Action> {
        self.queue.lock().ok()?.pop_front()
    }
}
