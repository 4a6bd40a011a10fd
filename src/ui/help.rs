//! Help overlay — keybinding reference.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::App;
use crate::theme;

/// Render the help overlay.
pub fn render(frame: &mut Frame, _app: &App) {
    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(Span::styled(" 󰋖 Keybindings ", theme::title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::accent_secondary()));

    let keybindings = vec![
        (
            "Sections",
            vec![
                ("Tab / BackTab", "Next / previous section"),
                ("1-4", "Jump to a section"),
                ("r", "Reload the current section"),
            ],
        ),
        (
            "Cards",
            vec![
                ("j / ↓", "Move cursor down"),
                ("k / ↑", "Move cursor up"),
                ("g / G", "Jump to top / bottom"),
                ("Enter", "Open movie detail"),
            ],
        ),
        (
            "Recommendations",
            vec![
                ("p", "Open the genre picker"),
                ("Space", "Toggle a genre"),
                ("Enter", "Fetch picks for checked genres"),
            ],
        ),
        (
            "Mouse",
            vec![
                ("Click a tab", "Switch section"),
                ("Click a card", "Open movie detail"),
                ("Click backdrop", "Close the detail overlay"),
            ],
        ),
        (
            "Other",
            vec![
                ("?", "Toggle this help"),
                ("q", "Quit marquee"),
                ("Esc", "Dismiss popup / close overlay"),
            ],
        ),
    ];

    let mut lines = vec![Line::from("")];

    for (section, bindings) in &keybindings {
        lines.push(Line::from(Span::styled(
            format!("  ── {section} ──"),
            Style::default()
                .fg(theme::accent())
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));

        for (key, desc) in bindings {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("    {key:<16}"),
                    Style::default()
                        .fg(theme::accent_secondary())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(*desc, theme::list_item()),
            ]));
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "  Press ESC or ? to close",
        theme::dim(),
    )));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

/// Compute a centered rectangle (safe — no raw indexing).
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = (area.width as u32 * percent_x.min(100) as u32 / 100) as u16;
    let height = (area.height as u32 * percent_y.min(100) as u32 / 100) as u16;
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width,
        height,
    }
}
