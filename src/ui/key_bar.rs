//! Persistent key instruction bar at the bottom of the screen.
//!
//! Shows context-aware keybindings in a compact, styled row that adapts
//! to the current input mode.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, InputMode};
use crate::theme;

/// Render the key-hint bar into the given area.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let spans = match app.input_mode {
        InputMode::Browse => browse_hints(),
        InputMode::Genres => genre_hints(),
        InputMode::Detail => detail_hints(),
        InputMode::Dialog => dialog_hints(),
    };

    let line = Line::from(spans);
    let bar = Paragraph::new(line);
    frame.render_widget(bar, area);
}

/// Key style: accented, bold.
fn key(s: &str) -> Span<'_> {
    Span::styled(
        s,
        Style::default()
            .fg(theme::accent())
            .add_modifier(Modifier::BOLD),
    )
}

/// Description style: dimmed.
fn desc(s: &str) -> Span<'_> {
    Span::styled(s, theme::dim())
}

/// Separator between groups.
fn sep() -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(theme::accent_secondary()))
}

fn browse_hints() -> Vec<Span<'static>> {
    vec![
        Span::raw(" "),
        key("j/k"),
        desc(" Cards "),
        sep(),
        key("Tab/1-4"),
        desc(" Sections "),
        sep(),
        key("⏎"),
        desc(" Details "),
        sep(),
        key("p"),
        desc(" Genres "),
        key("r"),
        desc(" Refresh "),
        sep(),
        key("?"),
        desc(" Help "),
        key("q"),
        desc(" Quit "),
    ]
}

fn genre_hints() -> Vec<Span<'static>> {
    vec![
        Span::raw(" "),
        key("j/k"),
        desc(" Move "),
        sep(),
        key("Space"),
        desc(" Toggle "),
        sep(),
        key("⏎"),
        desc(" Get Picks "),
        sep(),
        key("Esc"),
        desc(" Close "),
    ]
}

fn detail_hints() -> Vec<Span<'static>> {
    vec![
        Span::raw(" "),
        key("Esc"),
        desc(" Close "),
        sep(),
        desc("Click outside the card to close"),
    ]
}

fn dialog_hints() -> Vec<Span<'static>> {
    vec![Span::raw(" "), key("Esc"), desc(" Dismiss ")]
}
