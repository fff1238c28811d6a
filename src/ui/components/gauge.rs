use crate::config::Units;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct GaugeWidget<'a> {
    title: &'a str,
    value: Option<f64>,
    unit: &'a str,
    min: f64,
    max: f64,
    thresholds: Vec<(f64, Color)>,
    precision: usize,
}

impl<'a> GaugeWidget<'a> {
    pub fn new(title: &'a str, value: Option<f64>, unit: &'a str) -> Self {
        Self {
            title,
            value,
            unit,
            min: 0.0,
            max: 100.0,
            thresholds: Vec::new(),
            precision: 1,
        }
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn thresholds(mut self, thresholds: Vec<(f64, Color)>) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    fn get_color(&self, value: f64) -> Color {
        for (threshold, color) in self.thresholds.iter().rev() {
            if value >= *threshold {
                return *color;
            }
        }
        Theme::FG
    }
}

impl Widget for GaugeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 10 {
            return;
        }

        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        match self.value {
            Some(value) => {
                let color = self.get_color(value);
                let value_str = format!("{:.prec$}{}", value, self.unit, prec = self.precision);

                let value_line =
                    Line::from(vec![Span::styled(value_str, Style::default().fg(color))]);
                Paragraph::new(value_line).render(inner, buf);

                // Render bar if space allows
                if inner.height >= 2 {
                    let bar_area = Rect {
                        x: inner.x,
                        y: inner.y + 1,
                        width: inner.width,
                        height: 1,
                    };

                    let ratio = ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0);
                    let filled = (bar_area.width as f64 * ratio) as u16;

                    for x in bar_area.x..bar_area.x + bar_area.width {
                        let ch = if x < bar_area.x + filled {
                            '█'
                        } else {
                            '░'
                        };
                        buf[(x, bar_area.y)].set_char(ch).set_fg(color);
                    }
                }
            }
            None => {
                let na_line = Line::from(vec![Span::styled("N/A", Theme::dim())]);
                Paragraph::new(na_line).render(inner, buf);
            }
        }
    }
}

pub fn temperature_gauge(title: &str, value: Option<f64>, units: Units) -> GaugeWidget<'_> {
    let (min, max) = match units {
        Units::Metric => (-20.0, 45.0),
        Units::Imperial => (-4.0, 113.0),
    };
    // Thresholds follow Theme::temp_color
    let steps = [-100.0, 0.0, 10.0, 20.0, 28.0].map(|c| match units {
        Units::Metric => c,
        Units::Imperial => c * 9.0 / 5.0 + 32.0,
    });

    GaugeWidget::new(title, value, units.temperature_suffix())
        .range(min, max)
        .precision(0)
        .thresholds(vec![
            (steps[0], Theme::TEMP_FREEZING),
            (steps[1], Theme::TEMP_COOL),
            (steps[2], Theme::TEMP_MILD),
            (steps[3], Theme::TEMP_WARM),
            (steps[4], Theme::TEMP_HOT),
        ])
}

pub fn humidity_gauge(title: &str, value: Option<f64>) -> GaugeWidget<'_> {
    GaugeWidget::new(title, value, "%")
        .range(0.0, 100.0)
        .precision(0)
        .thresholds(vec![
            (0.0, Theme::WARNING),
            (30.0, Theme::SUCCESS),
            (70.0, Theme::TEMP_COOL),
        ])
}

pub fn wind_gauge(title: &str, value: Option<f64>, units: Units) -> GaugeWidget<'_> {
    // Beaufort 4 ("moderate breeze") and 7 ("near gale")
    let (moderate, strong, max) = match units {
        Units::Metric => (5.5, 13.9, 25.0),
        Units::Imperial => (13.0, 32.0, 55.0),
    };

    GaugeWidget::new(title, value, units.speed_suffix())
        .range(0.0, max)
        .thresholds(vec![
            (0.0, Theme::SUCCESS),
            (moderate, Theme::WARNING),
            (strong, Theme::ERROR),
        ])
}
