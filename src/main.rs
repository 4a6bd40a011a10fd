//! marquee — a terminal client for daily, hot, upcoming, and taste-matched
//! movie picks.
//!
//! Architecture:
//! - **UI thread** (main): runs the ratatui render loop, processes key and
//!   mouse events.
//! - **API worker** (tokio task): owns the HTTP client, talks to the movie
//!   backend.
//! - Two `mpsc` channels bridge them: `ApiCommand` (UI→Worker), `ApiEvent`
//!   (Worker→UI).
//!
//! The UI thread never touches the network. The worker never touches the
//! terminal.

mod api;
mod app;
mod config;
mod event;
mod theme;
mod tui;
mod ui;

use color_eyre::Result;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use api::types::{ApiCommand, ApiEvent};
use app::{App, AppAction};
use event::Event;

#[tokio::main]
async fn main() -> Result<()> {
    // ── Error handling & logging ─────────────────────────────────────────
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr) // TUI owns stdout; logs go to stderr
        .init();

    // ── Configuration ───────────────────────────────────────────────────
    config::init()?;

    info!("marquee starting");

    // ── Channel setup ───────────────────────────────────────────────────
    let (api_cmd_tx, api_cmd_rx) = mpsc::channel::<ApiCommand>(32);
    let (api_evt_tx, api_evt_rx) = mpsc::channel::<ApiEvent>(64);

    // ── Spawn API worker ────────────────────────────────────────────────
    tokio::spawn(async move {
        api::worker::run(api_cmd_rx, api_evt_tx).await;
    });

    // ── Initialise terminal ─────────────────────────────────────────────
    let mut terminal = tui::init()?;

    // ── App state ───────────────────────────────────────────────────────
    let mut app = App::new();
    let mut events = event::EventHandler::new(api_evt_rx);

    // The daily section loads eagerly, before any tab interaction.
    let _ = api_cmd_tx.try_send(app.startup());

    // ── Main event loop ─────────────────────────────────────────────────
    while app.running {
        // Keep the hit-testing viewport in sync with the terminal size.
        let size = terminal.size()?;
        app.viewport = ratatui::layout::Rect::new(0, 0, size.width, size.height);

        // Render.
        terminal.draw(|frame| ui::render(frame, &app))?;

        // Await next event (key / mouse / tick / API).
        match events.next().await? {
            Event::Key(key) => {
                let action = app.handle_key(key);
                match action {
                    AppAction::Quit => {
                        app.running = false;
                    }
                    AppAction::Api(cmd) => {
                        // Non-blocking send; drop if worker is backed up.
                        let _ = api_cmd_tx.try_send(cmd);
                    }
                    AppAction::Consumed => {}
                }
            }
            Event::Mouse(mouse) => {
                if let AppAction::Api(cmd) = app.handle_mouse(mouse) {
                    let _ = api_cmd_tx.try_send(cmd);
                }
            }
            Event::Tick => {
                app.on_tick();
            }
            Event::Api(api_event) => {
                app.handle_api_event(api_event);
            }
            Event::Resize(_, _) => {
                // ratatui handles resize automatically on next draw.
            }
        }
    }

    // ── Cleanup ─────────────────────────────────────────────────────────
    tui::restore()?;
    info!("marquee exiting");
    Ok(())
}
