//! Terminal lifecycle management.
//!
//! Handles entering/leaving the alternate screen, enabling/disabling raw mode
//! and mouse capture, and installing a panic hook that restores the terminal
//! before printing the backtrace. This prevents leaving the user's shell in a
//! broken state. Mouse capture is on because tab selection, card clicks, and
//! modal backdrop dismissal are all click-driven.

use std::io::{stdout, Stdout};

use color_eyre::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

/// Convenience alias.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Enter the alternate screen, enable raw mode + mouse capture, and install
/// the panic hook.
pub fn init() -> Result<Tui> {
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    enable_raw_mode()?;
    install_panic_hook();
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Leave the alternate screen and disable raw mode + mouse capture.
pub fn restore() -> Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

/// Install a panic hook that restores the terminal *before* printing the
/// default panic message. Without this, a panic leaves raw mode active and
/// the alternate screen visible, making the error unreadable.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort restore — ignore errors since we're already panicking.
        let _ = restore();
        original_hook(panic_info);
    }));
}
