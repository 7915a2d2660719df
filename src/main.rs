mod config;
mod controller;
mod logging;
mod model;
mod player;
mod view;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{
        DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
        EventStream,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::MissedTickBehavior;

use config::AppConfig;
use controller::{AppController, TrimController};
use model::{Catalog, FileStorage, KeyValueStorage, TrimStore};
use player::{ApiBootstrap, PlayerAdapter, PlayerSdk, SessionEvent, SimulatedSdk};
use view::AppView;

/// Redraw cadence when nothing else happens.
const FRAME_INTERVAL: Duration = Duration::from_millis(100);

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== trimdeck starting ===");

    let config = AppConfig::load()?;
    let catalog = Catalog::load_or_builtin(&config.catalog_path);
    let store = TrimStore::new(FileStorage::new(&config.storage_path));
    tracing::debug!(storage = %config.storage_path.display(), videos = catalog.len(), "Collaborators ready");

    let bootstrap = ApiBootstrap::new(SimulatedSdk::new(config.api_latency(), config.ready_latency()));
    let (player, session_events) = PlayerAdapter::new(bootstrap, config.player_settings());
    let mut controller = AppController::new(
        player,
        TrimController::new(store),
        catalog,
        config.input_settings(),
    );
    controller.select_first();

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut controller, session_events).await;
    controller.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("trimdeck shutting down");
    Ok(())
}

/// Single loop for terminal input, player session events and redraws.
async fn run_app<S: PlayerSdk, K: KeyValueStorage>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: &mut AppController<S, K>,
    mut session_events: UnboundedReceiver<SessionEvent>,
) -> io::Result<()> {
    let mut input = EventStream::new();
    let mut redraw = tokio::time::interval(FRAME_INTERVAL);
    redraw.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        let mut track = None;
        terminal.draw(|f| {
            track = AppView::render(f, controller);
        })?;
        controller.set_track(track);

        if controller.should_quit() {
            break;
        }

        tokio::select! {
            Some(event) = session_events.recv() => controller.handle_session_event(event),
            maybe_event = input.next() => match maybe_event {
                Some(Ok(Event::Key(key))) => controller.handle_key_event(key),
                Some(Ok(Event::Mouse(mouse))) => controller.handle_mouse_event(mouse),
                // Pointer left the terminal mid gesture
                Some(Ok(Event::FocusLost)) => controller.cancel_drag(),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e),
                None => break,
            },
            _ = redraw.tick() => {}
        }
    }

    Ok(())
}
