//! Card list for the active section: spinner while loading, inline error
//! text on failure, otherwise one three-line card per movie in response
//! order.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::api::types::{Movie, Section};
use crate::app::{App, SectionState};
use crate::theme;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.section_state(app.active);

    let title = if state.is_loading() {
        let spinner = theme::spinner_frame(app.tick_count);
        format!(" {spinner} {} ", app.active.title())
    } else {
        format!(" {} {} ", theme::section_icon(app.active), app.active.title())
    };

    let block = Block::default()
        .title(Span::styled(title, theme::title()))
        .borders(Borders::ALL)
        .border_style(theme::border_active());

    match state {
        SectionState::Unloaded => {
            let hint = if app.active == Section::Preference {
                "  Pick some genres to get recommendations (press p)"
            } else {
                "  Not loaded yet"
            };
            let paragraph =
                Paragraph::new(Line::from(Span::styled(hint, theme::dim()))).block(block);
            frame.render_widget(paragraph, area);
        }

        SectionState::Loading => {
            let spinner = theme::spinner_frame(app.tick_count);
            let line = Line::from(Span::styled(
                format!("  {spinner} Loading…"),
                Style::default().fg(theme::accent()),
            ));
            frame.render_widget(Paragraph::new(line).block(block), area);
        }

        SectionState::Failed(error) => {
            let line = Line::from(Span::styled(format!("  {}", error.message()), theme::error()));
            frame.render_widget(Paragraph::new(line).block(block), area);
        }

        SectionState::Loaded(movies) if movies.is_empty() => {
            let line = Line::from(Span::styled("  No movies to show", theme::dim()));
            frame.render_widget(Paragraph::new(line).block(block), area);
        }

        SectionState::Loaded(movies) => {
            let items: Vec<ListItem> = movies.iter().map(card_item).collect();
            let list = List::new(items)
                .block(block)
                .highlight_style(theme::selected())
                .highlight_symbol("▸ ");

            let mut list_state = ListState::default();
            *list_state.offset_mut() = app.active_scroll();
            list_state.select(Some(app.active_selected()));
            frame.render_stateful_widget(list, area, &mut list_state);
        }
    }
}

/// One card: title line, meta line (rating + year), spacer. Exactly
/// `layout::CARD_HEIGHT` lines so mouse hit-testing stays honest.
fn card_item(movie: &Movie) -> ListItem<'_> {
    let rating_color = theme::rating_color(movie.rating);

    let title_line = Line::from(Span::styled(movie.title.as_str(), theme::list_item()));

    let mut meta = vec![
        Span::styled("★ ", Style::default().fg(rating_color)),
        Span::styled(
            format!("{:<5}", movie.rating_label()),
            Style::default().fg(rating_color),
        ),
        Span::styled(theme::rating_bar(movie.rating), Style::default().fg(rating_color)),
    ];
    let year = movie.release_year();
    if !year.is_empty() {
        meta.push(Span::styled(format!("   {year}"), theme::dim()));
    }

    ListItem::new(vec![title_line, Line::from(meta), Line::from("")])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::layout::CARD_HEIGHT;

    #[test]
    fn card_item_is_exactly_card_height_lines() {
        crate::config::ensure_test_defaults();
        let movie = Movie {
            id: Some(1),
            title: "Heat".into(),
            poster: None,
            rating: Some(8.3),
            release_date: Some("1995-12-15".into()),
            overview: None,
            source: Some("TMDB".into()),
        };
        let item = card_item(&movie);
        assert_eq!(item.height(), CARD_HEIGHT as usize);
    }
}
