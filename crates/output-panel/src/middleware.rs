//! Middleware system
//!
//! Middleware sits between action dispatch and the reducer:
//!
//! ```text
//! Action → Middleware Chain → Reducer → State
//! ```
//!
//! Each middleware can inspect actions and state, dispatch follow-up actions,
//! perform side effects, and stop an action from reaching the reducer.

pub mod bootstrap_middleware;
pub mod command_palette_middleware;
pub mod keyboard_middleware;
pub mod logging_middleware;
pub mod output_middleware;

use crate::actions::Action;
use crate::dispatcher::Dispatcher;
use crate::state::AppState;

pub trait Middleware {
    /// Handle an action before it reaches the reducer
    ///
    /// # Returns
    /// - `true`: Continue to next middleware/reducer
    /// - `false`: Block this action from continuing
    fn handle(&mut self, action: &Action, state: &AppState, dispatcher: &Dispatcher) -> bool;
}
