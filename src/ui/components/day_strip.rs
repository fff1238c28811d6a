use crate::config::Units;
use crate::models::{round_temperature, DayKey, DaySummary};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Row of selectable days with their max/min temperatures
pub struct DayStrip<'a> {
    days: &'a [DaySummary],
    selected: Option<DayKey>,
    units: Units,
}

impl<'a> DayStrip<'a> {
    pub fn new(days: &'a [DaySummary], units: Units) -> Self {
        Self {
            days,
            selected: None,
            units,
        }
    }

    pub fn selected(mut self, key: Option<DayKey>) -> Self {
        self.selected = key;
        self
    }
}

/// "22/8°C", rounded like the current-conditions panel
pub fn format_range(day: &DaySummary, units: Units) -> String {
    format!(
        "{}/{}{}",
        round_temperature(day.range.max),
        round_temperature(day.range.min),
        units.temperature_suffix()
    )
}

impl Widget for DayStrip<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.days.is_empty() || area.height < 4 {
            return;
        }

        let constraints: Vec<Constraint> = self
            .days
            .iter()
            .map(|_| Constraint::Ratio(1, self.days.len() as u32))
            .collect();

        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        for (index, (day, cell)) in self.days.iter().zip(cells.iter()).enumerate() {
            let is_selected = self.selected == Some(day.key);

            let (border_style, label_style) = if is_selected {
                (Theme::border_focused(), Theme::selected())
            } else {
                (Theme::border(), Theme::normal())
            };

            let block = Block::default()
                .title(Span::styled(format!("[{}]", index + 1), Theme::nav_key()))
                .borders(Borders::ALL)
                .border_style(border_style);

            let lines = vec![
                Line::from(Span::styled(day.key.to_string(), label_style)),
                Line::from(Span::styled(
                    format_range(day, self.units),
                    Style::default().fg(Theme::temp_color(day.range.max, self.units)),
                )),
            ];

            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(block)
                .render(*cell, buf);
        }
    }
}
