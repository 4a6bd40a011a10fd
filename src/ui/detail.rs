//! Detail overlay for one movie.
//!
//! A single shared modal: `App::detail` holds the movie (cloned from the
//! already-fetched list, never re-fetched) and `InputMode::Detail` makes it
//! visible. A click outside `modal_rect` dismisses it; a click inside does
//! not.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::api::types::DETAIL_POSTER_PLACEHOLDER;
use crate::app::App;
use crate::theme;

/// The modal's screen rectangle — also the backdrop-click boundary.
pub fn modal_rect(area: Rect) -> Rect {
    let width = (area.width as u32 * 70 / 100) as u16;
    let height = (area.height as u32 * 80 / 100) as u16;
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Render the detail overlay.
pub fn render(frame: &mut Frame, app: &App) {
    let Some(movie) = &app.detail else {
        return;
    };

    let area = modal_rect(frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(Span::styled(" 󰎁 Movie Detail ", theme::title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::accent_secondary()));

    let rating_color = theme::rating_color(movie.rating);
    let field = |name: &str| Span::styled(format!("  {name:<10}"), theme::dim());

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", movie.title),
            theme::title().add_modifier(Modifier::UNDERLINED),
        )),
        Line::from(""),
        Line::from(vec![
            field("Rating:"),
            Span::styled(
                format!("★ {} / 10  {}", movie.rating_label(), theme::rating_bar(movie.rating)),
                Style::default().fg(rating_color),
            ),
        ]),
        Line::from(vec![
            field("Released:"),
            Span::styled(movie.release_date_label().to_string(), theme::list_item()),
        ]),
        Line::from(vec![
            field("Source:"),
            Span::styled(movie.source_label().to_string(), theme::list_item()),
        ]),
        Line::from(vec![
            field("Poster:"),
            Span::styled(
                movie.poster_url(DETAIL_POSTER_PLACEHOLDER).to_string(),
                theme::dim(),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled("  Overview", theme::title())),
        Line::from(""),
    ];

    for wrapped in movie.overview_text().lines() {
        lines.push(Line::from(Span::styled(
            format!("  {wrapped}"),
            theme::list_item(),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Esc to close — clicking outside also closes",
        theme::dim(),
    )));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Position;

    #[test]
    fn modal_is_centered_and_leaves_a_backdrop() {
        let screen = Rect::new(0, 0, 80, 24);
        let modal = modal_rect(screen);
        assert!(modal.width < screen.width);
        assert!(modal.height < screen.height);
        // Corners of the screen are backdrop.
        assert!(!modal.contains(Position::new(0, 0)));
        assert!(!modal.contains(Position::new(79, 23)));
        // The centre is content.
        assert!(modal.contains(Position::new(40, 12)));
    }
}
