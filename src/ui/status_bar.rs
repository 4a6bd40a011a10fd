//! Status bar at the top of the screen: app title, today's date, and the
//! active section's load state.

use chrono::Local;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{App, SectionState};
use crate::theme;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(" 󰎁 marquee ", theme::title()),
        Span::styled("│ ", theme::dim()),
        Span::styled(
            Local::now().format("%A, %B %e %Y").to_string(),
            theme::list_item(),
        ),
        Span::styled(" │ ", theme::dim()),
    ];

    // Active section state.
    match app.section_state(app.active) {
        SectionState::Loading => {
            let frame_char = theme::spinner_frame(app.tick_count);
            spans.push(Span::styled(
                format!("{frame_char} Loading "),
                Style::default()
                    .fg(theme::accent())
                    .add_modifier(Modifier::BOLD),
            ));
        }
        SectionState::Loaded(movies) => {
            spans.push(Span::styled(
                format!("{} movies ", movies.len()),
                theme::dim(),
            ));
        }
        SectionState::Failed(_) => {
            spans.push(Span::styled("load failed ", theme::error()));
        }
        SectionState::Unloaded => {
            spans.push(Span::styled("idle ", theme::dim()));
        }
    }

    let line = Line::from(spans);
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(theme::border_inactive());

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}
