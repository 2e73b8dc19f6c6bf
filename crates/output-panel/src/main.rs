use output_channels::OutputService;
use output_panel_config::PanelConfig;
use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    Terminal,
};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

mod actions;
mod capabilities;
mod command_id;
mod commands;
mod dispatcher;
mod keybindings;
mod keymap;
mod logger;
mod middleware;
mod producers;
mod reducers;
mod state;
mod store;
mod view_models;
mod views;

use actions::{Action, BootstrapAction, GlobalAction, OutputPanelAction};
use dispatcher::Dispatcher;
use middleware::{
    bootstrap_middleware::BootstrapMiddleware,
    command_palette_middleware::CommandPaletteMiddleware,
    keyboard_middleware::KeyboardMiddleware, logging_middleware::LoggingMiddleware,
    output_middleware::OutputMiddleware,
};
use state::AppState;
use store::Store;

fn main() -> anyhow::Result<()> {
    // A broken config file is reported once the logger is up
    let (config, config_error) = match PanelConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (PanelConfig::default(), Some(e)),
    };
    let dispatcher = Dispatcher::new();

    // Initialize file and channel logger (returns log file path)
    let log_file = logger::init(&config, dispatcher.clone())?;
    log::info!("Starting output panel, logging to {}", log_file.display());
    if let Some(e) = config_error {
        log::warn!("{:#}, using defaults", e);
    }
    log::debug!("Panel config: {:?}", config);

    let runtime = tokio::runtime::Runtime::new()?;

    // The log channel goes first so early records have somewhere to land
    let mut registry = OutputService::with_max_lines(config.max_lines);
    if let Some(default_channel) = &config.default_channel {
        registry = registry.with_default_channel(default_channel.as_str());
    }
    let registry = Arc::new(registry);
    registry.register_channel(logger::LOG_CHANNEL_ID, logger::LOG_CHANNEL_LABEL)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut store = Store::new(AppState::default(), dispatcher.clone());

    // Add middleware in order (they execute in this order)
    store.add_middleware(Box::new(LoggingMiddleware::new()));
    store.add_middleware(Box::new(BootstrapMiddleware::new(
        config.clone(),
        registry.clone(),
    )));
    store.add_middleware(Box::new(KeyboardMiddleware::new()));
    store.add_middleware(Box::new(CommandPaletteMiddleware::new()));
    store.add_middleware(Box::new(OutputMiddleware::new(
        registry,
        runtime.handle().clone(),
        dispatcher,
    )));

    // Main event loop
    let result = run_app(&mut terminal, &mut store);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        eprintln!("Error: {}", err);
    }

    log::info!("Exiting output panel");
    result
}

/// Maximum time budget for processing actions before rendering
/// This keeps the UI responsive while producers flood the queue
const ACTION_BUDGET: Duration = Duration::from_millis(16); // ~60fps frame budget

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    store: &mut Store,
) -> anyhow::Result<()> {
    // Queue bootstrap to be processed by the main loop (not synchronously)
    store
        .dispatcher()
        .dispatch(Action::Bootstrap(BootstrapAction::Start));

    loop {
        // Process pending actions with a time budget to avoid blocking renders
        let start = Instant::now();

        while let Some(action) = store.dispatcher().pop() {
            store.dispatch(action);

            // Check budget after each action - remaining actions stay in queue
            if start.elapsed() >= ACTION_BUDGET {
                break;
            }
        }

        // Render
        let mut content_height = 0;
        terminal.draw(|frame| {
            let area = frame.area();
            content_height = views::output_content_height(area, store.state());
            views::render(store.state(), area, frame);
        })?;

        // Keep scroll bounds in sync with the terminal size
        if store.state().output_panel.visible_height != content_height {
            store.dispatch(Action::OutputPanel(OutputPanelAction::SetVisibleHeight(
                content_height,
            )));
        }

        // Check if we should quit
        if !store.state().running {
            break;
        }

        // Handle events
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    store.dispatch(Action::Global(GlobalAction::KeyPressed(key)));
                }
            }
        }
    }

    Ok(())
}
