//! Bootstrap Middleware
//!
//! Manages application startup:
//! - Publishes the panel configuration into state on BootstrapStart
//! - Starts the sample output producers when configured
//! - Dispatches BootstrapEnd once everything is wired
//! - Stops the producers on quit

use crate::actions::{Action, BootstrapAction, GlobalAction};
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::producers::Producers;
use crate::state::AppState;
use output_channels::OutputService;
use output_panel_config::PanelConfig;
use std::sync::Arc;

pub struct BootstrapMiddleware {
    config: PanelConfig,
    registry: Arc<OutputService>,
    producers: Option<Producers>,
}

impl BootstrapMiddleware {
    pub fn new(config: PanelConfig, registry: Arc<OutputService>) -> Self {
        Self {
            config,
            registry,
            producers: None,
        }
    }
}

impl Middleware for BootstrapMiddleware {
    fn handle(&mut self, action: &Action, _state: &AppState, dispatcher: &Dispatcher) -> bool {
        match action {
            Action::Bootstrap(BootstrapAction::Start) => {
                log::info!("BootstrapMiddleware: Bootstrap starting");
                dispatcher.dispatch(Action::Bootstrap(BootstrapAction::ConfigLoaded(
                    self.config.clone(),
                )));

                if self.config.demo_producers && self.producers.is_none() {
                    self.producers = Some(Producers::start(self.registry.clone()));
                    log::debug!("Bootstrap: Sample producers started");
                }

                dispatcher.dispatch(Action::Bootstrap(BootstrapAction::End));
                true
            }

            Action::Bootstrap(BootstrapAction::End) => {
                log::info!("BootstrapMiddleware: Bootstrap ended");
                true
            }

            Action::Global(GlobalAction::Quit) => {
                if let Some(producers) = self.producers.take() {
                    producers.stop();
                }
                true
            }

            _ => true,
        }
    }
}
