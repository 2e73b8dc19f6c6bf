use crate::actions::Action;
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::reducers::app_reducer;
use crate::state::AppState;

/// Holds the application state and runs actions through middleware and the
/// root reducer
pub struct Store {
    state: AppState,
    middleware: Vec<Box<dyn Middleware>>,
    dispatcher: Dispatcher,
}

impl Store {
    pub fn new(state: AppState, dispatcher: Dispatcher) -> Self {
        Self {
            state,
            middleware: Vec::new(),
            dispatcher,
        }
    }

    /// Append a middleware; middleware runs in insertion order
    pub fn add_middleware(&mut self, middleware: Box<dyn Middleware>) {
        self.middleware.push(middleware);
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Process one action synchronously
    pub fn dispatch(&mut self, action: Action) {
        for middleware in &mut self.middleware {
            if !middleware.handle(&action, &self.state, &self.dispatcher) {
                return;
            }
        }

        let state = std::mem::take(&mut self.state);
        self.state = app_reducer::reduce(state, &action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{GlobalAction, OutputPanelAction};

    struct BlockToggle;

    impl Middleware for BlockToggle {
        fn handle(&mut self, action: &Action, _state: &AppState, _dispatcher: &Dispatcher) -> bool {
            !matches!(
                action,
                Action::OutputPanel(OutputPanelAction::VisibilityToggled)
            )
        }
    }

    #[test]
    fn test_reducer_runs_after_middleware() {
        let mut store = Store::new(AppState::default(), Dispatcher::new());

        store.dispatch(Action::Global(GlobalAction::Quit));

        assert!(!store.state().running);
    }

    #[test]
    fn test_middleware_can_block_action() {
        let mut store = Store::new(AppState::default(), Dispatcher::new());
        store.add_middleware(Box::new(BlockToggle));
        let visible = store.state().output_panel.visible;

        store.dispatch(Action::OutputPanel(OutputPanelAction::VisibilityToggled));

        assert_eq!(store.state().output_panel.visible, visible);
    }
}
