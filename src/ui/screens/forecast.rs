use crate::app::WeatherView;
use crate::logic::icon_for;
use crate::models::round_temperature;
use crate::ui::components::{humidity_gauge, temperature_gauge, wind_gauge, DayStrip};
use crate::ui::Theme;
use chrono::Local;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget, Wrap},
};

pub struct ForecastScreen<'a> {
    pub view: &'a WeatherView<'a>,
    pub status_message: Option<&'a str>,
}

impl<'a> ForecastScreen<'a> {
    pub fn new(view: &'a WeatherView<'a>) -> Self {
        Self {
            view,
            status_message: None,
        }
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status_message = status;
        self
    }
}

impl Widget for ForecastScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(5), // Current conditions
                Constraint::Min(6),    // Hourly for the selected day
                Constraint::Length(4), // Day strip
                Constraint::Length(1), // Status message
                Constraint::Length(1), // Nav bar
            ])
            .split(area);

        self.render_header(chunks[0], buf);

        if let Some(error) = self.view.error {
            // No partial results: an error replaces the whole forecast area
            let body = Rect {
                height: chunks[1].height + chunks[2].height + chunks[3].height,
                ..chunks[1]
            };
            self.render_error(error, body, buf);
        } else if self.view.current_weather.is_some() {
            self.render_current(chunks[1], buf);
            self.render_hourly(chunks[2], buf);
            DayStrip::new(&self.view.days, self.view.units)
                .selected(self.view.selected)
                .render(chunks[3], buf);
        } else {
            let para = Paragraph::new(Span::styled("Loading forecast...", Theme::dim()));
            para.render(chunks[1], buf);
        }

        self.render_status_message(chunks[4], buf);
        self.render_nav(chunks[5], buf);
    }
}

impl ForecastScreen<'_> {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let city = if self.view.geo_city.is_empty() {
            "Unknown location"
        } else {
            self.view.geo_city
        };

        let block = Block::default()
            .title(Span::styled(format!("skyglance - {}", city), Theme::title()))
            .borders(Borders::BOTTOM)
            .border_style(Theme::border());

        let last_updated = self
            .view
            .fetched_at
            .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "Never".to_string());

        let info = format!("Last updated: {}", last_updated);
        Paragraph::new(Span::styled(info, Theme::dim()))
            .block(block)
            .render(area, buf);
    }

    fn render_error(&self, error: &str, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Error")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::ERROR));

        Paragraph::new(Span::styled(error.to_string(), Theme::error()))
            .wrap(Wrap { trim: true })
            .block(block)
            .render(area, buf);
    }

    fn render_current(&self, area: Rect, buf: &mut Buffer) {
        let Some(current) = self.view.current_weather else {
            return;
        };
        let units = self.view.units;

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Percentage(20),
                Constraint::Percentage(20),
                Constraint::Percentage(20),
            ])
            .split(area);

        let icon = icon_for(&current.condition_description);
        let block = Block::default()
            .title("Now")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let lines = vec![
            Line::from(vec![
                Span::styled(
                    format!("{} ", icon.symbol()),
                    Style::default().fg(Theme::icon_color(icon)),
                ),
                Span::styled(
                    format!(
                        "{}{}",
                        round_temperature(current.temperature),
                        units.temperature_suffix()
                    ),
                    Style::default().fg(Theme::temp_color(current.temperature, units)),
                ),
                Span::styled(format!("  {}", current.condition_description), Theme::normal()),
            ]),
            Line::from(vec![
                Span::styled("Feels like: ", Theme::dim()),
                Span::styled(
                    format!(
                        "{}{}",
                        round_temperature(current.feels_like),
                        units.temperature_suffix()
                    ),
                    Theme::normal(),
                ),
            ]),
        ];
        Paragraph::new(lines).block(block).render(cols[0], buf);

        temperature_gauge("Feels Like", Some(current.feels_like), units).render(cols[1], buf);
        humidity_gauge("Humidity", Some(current.humidity)).render(cols[2], buf);
        wind_gauge("Wind", Some(current.wind_speed), units).render(cols[3], buf);
    }

    fn render_hourly(&self, area: Rect, buf: &mut Buffer) {
        let title = match (self.view.selected, self.view.selected_range) {
            (Some(key), Some(range)) => format!(
                "Hourly - {} ({}/{}{})",
                key,
                round_temperature(range.max),
                round_temperature(range.min),
                self.view.units.temperature_suffix()
            ),
            (Some(key), None) => format!("Hourly - {}", key),
            (None, _) => "Hourly".to_string(),
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        if self.view.hourly.is_empty() {
            Paragraph::new(Span::styled("No forecast for this day", Theme::dim()))
                .render(inner, buf);
            return;
        }

        let units = self.view.units;
        let header = Row::new(vec![
            Cell::from("Time"),
            Cell::from(""),
            Cell::from("Temp"),
            Cell::from("Feels"),
            Cell::from("Humidity"),
            Cell::from("Wind"),
            Cell::from("Conditions"),
        ])
        .style(Theme::header());

        let rows: Vec<Row> = self
            .view
            .hourly
            .iter()
            .map(|entry| {
                let sample = entry.sample;
                let icon = icon_for(&sample.condition_description);
                Row::new(vec![
                    Cell::from(format!("{}:00", entry.hour)),
                    Cell::from(icon.symbol()).style(Style::default().fg(Theme::icon_color(icon))),
                    Cell::from(format!(
                        "{}{}",
                        round_temperature(sample.temperature),
                        units.temperature_suffix()
                    ))
                    .style(Style::default().fg(Theme::temp_color(sample.temperature, units))),
                    Cell::from(format!(
                        "{}{}",
                        round_temperature(sample.feels_like),
                        units.temperature_suffix()
                    )),
                    Cell::from(format!("{:.0}%", sample.humidity)),
                    Cell::from(format!("{:.1} {}", sample.wind_speed, units.speed_suffix())),
                    Cell::from(sample.condition_description.clone()),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(6),
            Constraint::Length(3),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(9),
            Constraint::Length(10),
            Constraint::Min(10),
        ];

        Table::new(rows, widths).header(header).render(inner, buf);
    }

    fn render_status_message(&self, area: Rect, buf: &mut Buffer) {
        if let Some(msg) = self.status_message {
            Paragraph::new(Span::styled(msg, Theme::dim())).render(area, buf);
        }
    }

    fn render_nav(&self, area: Rect, buf: &mut Buffer) {
        let nav = Line::from(vec![
            Span::styled("[←/→]", Theme::nav_key()),
            Span::styled("Day ", Theme::nav_label()),
            Span::styled("[1-9]", Theme::nav_key()),
            Span::styled("Jump ", Theme::nav_label()),
            Span::styled("[r]", Theme::nav_key()),
            Span::styled("Refresh ", Theme::nav_label()),
            Span::styled("[q]", Theme::nav_key()),
            Span::styled("Quit", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(area, buf);
    }
}
