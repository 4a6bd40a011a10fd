//! Section tab bar.
//!
//! Hand-rolled instead of `ratatui::widgets::Tabs` so every label's exact
//! column range is known, making mouse hit-testing a mirror of rendering.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::api::types::Section;
use crate::app::App;
use crate::theme;

/// Label text for one tab. ASCII only — hit-testing assumes one column per
/// character.
fn label(section: Section) -> String {
    format!(" {} {} ", section.index() + 1, section.title())
}

/// Render the tab row.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    for (i, section) in Section::ALL.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("│", theme::dim()));
        }
        let style = if section == app.active {
            theme::title()
        } else {
            theme::dim()
        };
        spans.push(Span::styled(label(section), style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Which section's label covers the given column, if any. Walks the same
/// label construction as `render`.
pub fn section_at(area: Rect, x: u16) -> Option<Section> {
    let mut cursor = area.x + 1; // leading space
    for (i, section) in Section::ALL.into_iter().enumerate() {
        if i > 0 {
            cursor += 1; // divider
        }
        let width = label(section).chars().count() as u16;
        if x >= cursor && x < cursor + width {
            return Some(section);
        }
        cursor += width;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_label_start_hits_its_own_section() {
        let area = Rect::new(0, 3, 120, 1);
        let mut cursor = 1u16;
        for (i, section) in Section::ALL.into_iter().enumerate() {
            if i > 0 {
                cursor += 1;
            }
            assert_eq!(section_at(area, cursor), Some(section));
            cursor += label(section).chars().count() as u16;
        }
    }

    #[test]
    fn leading_space_and_far_right_hit_nothing() {
        let area = Rect::new(0, 3, 120, 1);
        assert_eq!(section_at(area, 0), None);
        assert_eq!(section_at(area, 119), None);
    }
}
