//! # Category Tabs
//!
//! One row of tabs in `Category::ORDERED` order, the active one highlighted.
//! Render records where each tab landed so a click can be mapped back to
//! a category.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::core::feed::Category;
use crate::tui::component::Component;

const GAP: u16 = 1;

pub struct CategoryTabs {
    pub selected: Category,
    /// Screen rects of the tabs drawn last frame.
    pub hit_areas: Vec<(Category, Rect)>,
}

impl CategoryTabs {
    pub fn new(selected: Category) -> Self {
        Self {
            selected,
            hit_areas: Vec::new(),
        }
    }
}

/// Which tab, if any, covers the cell.
pub fn tab_at(hit_areas: &[(Category, Rect)], col: u16, row: u16) -> Option<Category> {
    hit_areas
        .iter()
        .find(|(_, rect)| rect.contains((col, row).into()))
        .map(|(category, _)| *category)
}

impl Component for CategoryTabs {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.hit_areas.clear();

        // Keep the selected tab on screen when the row is too narrow.
        let widths: Vec<u16> = Category::ORDERED
            .iter()
            .map(|c| c.label().width() as u16 + 2)
            .collect();
        let selected = self.selected.position();
        let mut first = 0;
        while first < selected
            && widths[first..=selected].iter().map(|w| w + GAP).sum::<u16>() > area.width
        {
            first += 1;
        }

        let mut spans = Vec::new();
        let mut x = area.x;
        let right = area.x + area.width;
        if first > 0 {
            spans.push(Span::styled("‹", Style::default().fg(Color::DarkGray)));
            x += 1;
        }
        for (category, width) in Category::ORDERED.iter().zip(&widths).skip(first) {
            if x + width > right {
                break;
            }
            let style = if *category == self.selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(format!(" {} ", category.label()), style));
            spans.push(Span::raw(" ".repeat(GAP as usize)));
            self.hit_areas
                .push((*category, Rect::new(x, area.y, *width, 1.min(area.height))));
            x += width + GAP;
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
