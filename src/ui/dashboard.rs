use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::model::trend::Trend;
use crate::sim::run_loop::RunState;

pub struct PortfolioPanel<'a> {
    summary: &'a str,
    price: f64,
    quantity_input: &'a str,
    focused: Option<(usize, f64)>,
}

impl<'a> PortfolioPanel<'a> {
    pub fn new(summary: &'a str, price: f64, quantity_input: &'a str) -> Self {
        Self {
            summary,
            price,
            quantity_input,
            focused: None,
        }
    }

    pub fn focused(mut self, focused: Option<(usize, f64)>) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for PortfolioPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = vec![Line::from(vec![
            Span::styled("Price: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("${:.2}", self.price),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ])];
        for row in self.summary.lines() {
            lines.push(Line::from(Span::styled(
                row.to_string(),
                Style::default().fg(Color::White),
            )));
        }
        let qty = if self.quantity_input.is_empty() {
            "1"
        } else {
            self.quantity_input
        };
        lines.push(Line::from(vec![
            Span::styled("Qty:   ", Style::default().fg(Color::DarkGray)),
            Span::styled(qty.to_string(), Style::default().fg(Color::Yellow)),
        ]));
        if let Some((index, price)) = self.focused {
            lines.push(Line::from(vec![
                Span::styled("Point: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("#{} @ {:.2}", index + 1, price),
                    Style::default().fg(Color::Yellow),
                ),
            ]));
        }

        let block = Block::default()
            .title(" Portfolio ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

pub struct LogPanel<'a> {
    messages: &'a [String],
}

impl<'a> LogPanel<'a> {
    pub fn new(messages: &'a [String]) -> Self {
        Self { messages }
    }
}

impl Widget for LogPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let visible = area.height.saturating_sub(2) as usize;
        let start = self.messages.len().saturating_sub(visible);
        let lines: Vec<Line> = self.messages[start..]
            .iter()
            .map(|msg| {
                let color = if msg.starts_with("[WARN]") {
                    Color::Yellow
                } else {
                    Color::Gray
                };
                Line::from(Span::styled(msg.as_str(), Style::default().fg(color)))
            })
            .collect();

        let block = Block::default()
            .title(" Announcements ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

pub struct StatusBar {
    pub run_state: RunState,
    pub trend: Trend,
    pub volatility: f64,
    pub speed: f64,
    pub tick_count: u64,
    pub controls_visible: bool,
}

impl Widget for StatusBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let run_status = match self.run_state {
            RunState::Paused => Span::styled(
                " PAUSED ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            RunState::Running => Span::styled(" RUNNING ", Style::default().fg(Color::Green)),
        };
        let lock_status = if self.controls_visible {
            Span::styled("UNLOCKED", Style::default().fg(Color::Green))
        } else {
            Span::styled("LOCKED", Style::default().fg(Color::Red))
        };

        let line = Line::from(vec![
            Span::styled(
                " sandbox-chart ",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("| ", Style::default().fg(Color::DarkGray)),
            run_status,
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("trend: {}", self.trend), Style::default().fg(Color::Cyan)),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("vol: {}  speed: {}x", self.volatility, self.speed),
                Style::default().fg(Color::White),
            ),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            lock_status,
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("ticks: {}", self.tick_count),
                Style::default().fg(Color::DarkGray),
            ),
        ]);

        buf.set_line(area.x, area.y, &line, area.width);
    }
}

pub struct KeybindBar {
    pub focus_mode: bool,
    pub controls_visible: bool,
}

impl Widget for KeybindBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));
        let text = |t: &'static str| Span::styled(t, Style::default().fg(Color::DarkGray));

        let spans = if self.focus_mode {
            vec![
                key(" [←/→]"),
                text(" point  "),
                key("[↑/↓]"),
                text(" adjust  "),
                key("[Enter]"),
                text(" read  "),
                key("[Esc]"),
                text(" back"),
            ]
        } else if self.controls_visible {
            vec![
                key(" [Q]"),
                text("uit  "),
                key("[Space]"),
                text(" play/pause  "),
                key("[→]"),
                text(" step  "),
                key("[X]"),
                text(" reset  "),
                key("[B]"),
                text("uy  "),
                key("[S]"),
                text("ell  "),
                key("[T]"),
                text("rend  "),
                key("[G]"),
                text("rid  "),
                key("[+/-]"),
                text(" vol  "),
                key("[[]]"),
                text(" speed  "),
                key("[F]"),
                text("ocus  "),
                key("[L]"),
                text("ock"),
            ]
        } else {
            vec![
                key(" [Q]"),
                text("uit  "),
                key("[Space]"),
                text(" play/pause  "),
                key("[→]"),
                text(" step  "),
                key("[F]"),
                text("ocus  "),
                key("[L]"),
                text(" unlock controls"),
            ]
        };

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}
