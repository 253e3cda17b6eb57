pub mod chart;
pub mod dashboard;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;

use crate::controller::{Command, Controller};
use crate::event::AppEvent;
use crate::gate::StaticGate;
use crate::input::{FocusCommand, PointerAction, UiCommand};

use self::chart::{cell_radius, cell_to_scene, chart_inner, PriceChart};
use self::dashboard::{KeybindBar, LogPanel, PortfolioPanel, StatusBar};

const MAX_LOG_MESSAGES: usize = 200;
const MAX_QUANTITY_DIGITS: usize = 6;
const VOLATILITY_STEP: f64 = 5.0;
const MAX_VOLATILITY: f64 = 100.0;
const SPEED_STEP: f64 = 0.5;
const MIN_SPEED: f64 = 0.5;
const MAX_SPEED: f64 = 10.0;
/// Vertical scene pixels moved per keyboard nudge of a focused point.
const NUDGE_PX: f64 = 4.0;

/// Terminal front end state wrapped around the controller.
pub struct AppState {
    pub controller: Controller,
    pub gate: StaticGate,
    pub log_messages: Vec<String>,
    pub last_announcement: String,
    pub portfolio_summary: String,
    pub quantity_input: String,
    pub focus_mode: bool,
    pub controls_visible: bool,
    pub tick_count: u64,
    pub trade_count: u64,
}

impl AppState {
    pub fn new(controller: Controller, gate: StaticGate, default_quantity: u64) -> Self {
        let mut state = Self {
            portfolio_summary: controller.portfolio_summary(),
            controls_visible: controller.controls_visible(),
            controller,
            gate,
            log_messages: Vec::new(),
            last_announcement: String::new(),
            quantity_input: default_quantity.max(1).to_string(),
            focus_mode: false,
            tick_count: 0,
            trade_count: 0,
        };
        state.drain();
        state
    }

    pub fn push_log(&mut self, msg: String) {
        self.log_messages.push(msg);
        if self.log_messages.len() > MAX_LOG_MESSAGES {
            self.log_messages.remove(0);
        }
    }

    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::Announce(msg) => {
                // Price ticks arrive every step; keep them out of the log.
                if !msg.starts_with("Price:") {
                    self.push_log(msg.clone());
                }
                self.last_announcement = msg;
            }
            AppEvent::TickAppended(_) => {
                self.tick_count += 1;
            }
            AppEvent::PointEdited { .. } => {}
            AppEvent::TradeExecuted(_) => {
                self.trade_count += 1;
            }
            AppEvent::TradeRejected(reason) => {
                tracing::debug!(%reason, "Trade rejected");
            }
            AppEvent::PortfolioSummary(summary) => {
                self.portfolio_summary = summary;
            }
            AppEvent::RunStateChanged(_) => {}
            AppEvent::ControlsVisibility(visible) => {
                self.controls_visible = visible;
                self.push_log(if visible {
                    "Controls unlocked".to_string()
                } else {
                    "[WARN] Controls locked".to_string()
                });
            }
            AppEvent::SimulationReset { .. } => {
                self.tick_count = 0;
            }
        }
    }

    fn drain(&mut self) {
        for event in self.controller.drain_events() {
            self.apply(event);
        }
    }

    fn send(&mut self, command: Command) {
        self.controller.apply(command);
        self.drain();
    }

    /// Advance the run loop for one display frame.
    pub fn frame(&mut self, now_secs: f64) {
        self.controller.frame(now_secs);
        self.drain();
    }

    pub fn dispatch(&mut self, command: UiCommand) {
        let ctx = self.controller.context();
        let simulation = ctx.simulation;
        let show_grid = ctx.render.show_grid;
        match command {
            UiCommand::TogglePlay => self.send(Command::TogglePlay),
            UiCommand::Play => self.send(Command::Play),
            UiCommand::Pause => self.send(Command::Pause),
            UiCommand::Step => self.send(Command::Step),
            UiCommand::Reset => self.send(Command::Reset),
            UiCommand::Buy => self.send(Command::Buy(self.quantity_input.clone())),
            UiCommand::Sell => self.send(Command::Sell(self.quantity_input.clone())),
            UiCommand::ToggleGrid => self.send(Command::SetGrid(!show_grid)),
            UiCommand::CycleTrend => self.send(Command::SetTrend(simulation.trend.next())),
            UiCommand::VolatilityUp => self.send(Command::SetVolatility(
                (simulation.volatility + VOLATILITY_STEP).min(MAX_VOLATILITY),
            )),
            UiCommand::VolatilityDown => self.send(Command::SetVolatility(
                (simulation.volatility - VOLATILITY_STEP).max(0.0),
            )),
            UiCommand::SpeedUp => {
                self.send(Command::SetSpeed((simulation.speed + SPEED_STEP).min(MAX_SPEED)))
            }
            UiCommand::SpeedDown => {
                self.send(Command::SetSpeed((simulation.speed - SPEED_STEP).max(MIN_SPEED)))
            }
            UiCommand::FocusChart => {
                self.focus_mode = true;
                let index = self
                    .controller
                    .editor()
                    .focused()
                    .unwrap_or_else(|| self.controller.series().len().saturating_sub(1));
                self.send(Command::Focus(index));
            }
            UiCommand::ToggleLock => {
                self.gate.toggle();
                self.controller.refresh_gate();
                self.drain();
            }
            UiCommand::QuantityDigit(c) => {
                if self.quantity_input.len() < MAX_QUANTITY_DIGITS {
                    self.quantity_input.push(c);
                }
            }
            UiCommand::QuantityBackspace => {
                self.quantity_input.pop();
            }
        }
    }

    pub fn dispatch_focus(&mut self, command: FocusCommand) {
        match command {
            FocusCommand::Previous => self.send(Command::FocusNavigate(-1)),
            FocusCommand::Next => self.send(Command::FocusNavigate(1)),
            FocusCommand::Select => self.send(Command::AnnounceFocused),
            FocusCommand::NudgeUp => self.nudge_focused(-NUDGE_PX),
            FocusCommand::NudgeDown => self.nudge_focused(NUDGE_PX),
            FocusCommand::Exit => {
                self.focus_mode = false;
                self.send(Command::Blur);
            }
        }
    }

    /// Keyboard equivalent of a short drag on the focused point.
    fn nudge_focused(&mut self, dy: f64) {
        let Some(index) = self.controller.editor().focused() else {
            return;
        };
        let Some(marker) = self.controller.scene().marker(index) else {
            return;
        };
        let y = marker.center.y + dy;
        self.send(Command::BeginDrag(index));
        self.send(Command::DragTo(y));
        self.send(Command::EndDrag);
    }

    /// Route a pointer gesture over the terminal area `screen`.
    pub fn pointer(&mut self, action: PointerAction, screen: Rect) {
        let inner = chart_inner(chart_area(screen));
        let viewport = self.controller.scene().viewport;
        match action {
            PointerAction::Press { column, row } => {
                let Some(p) = cell_to_scene(inner, viewport, column, row) else {
                    return;
                };
                let radius = cell_radius(inner, viewport);
                if let Some(index) = self.controller.scene().marker_at(p.x, p.y, radius) {
                    self.focus_mode = true;
                    self.send(Command::BeginDrag(index));
                }
            }
            PointerAction::Drag { column, row } => {
                if self.controller.editor().dragging().is_none()
                    || inner.width == 0
                    || inner.height == 0
                {
                    return;
                }
                // Rows above or below the chart still drag; the editor clamps.
                let row = row.clamp(inner.y, (inner.y + inner.height).saturating_sub(1));
                let column = column.clamp(inner.x, (inner.x + inner.width).saturating_sub(1));
                if let Some(p) = cell_to_scene(inner, viewport, column, row) {
                    self.send(Command::DragTo(p.y));
                }
            }
            PointerAction::Release => {
                if self.controller.editor().dragging().is_some() {
                    self.send(Command::EndDrag);
                }
            }
        }
    }
}

fn split_screen(area: Rect) -> (Rect, Rect, Rect, Rect, Rect) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(10),   // chart + portfolio
            Constraint::Length(7), // announcements
            Constraint::Length(1), // keybinds
        ])
        .split(area);
    let main_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(30)])
        .split(outer[1]);
    (outer[0], main_area[0], main_area[1], outer[2], outer[3])
}

/// Rect the price chart occupies within a frame of size `area`.
pub fn chart_area(area: Rect) -> Rect {
    split_screen(area).1
}

pub fn render(frame: &mut Frame, state: &AppState) {
    let (status_area, chart_rect, portfolio_area, log_area, keybind_area) =
        split_screen(frame.area());
    let controller = &state.controller;
    let ctx = controller.context();

    frame.render_widget(
        StatusBar {
            run_state: controller.run_state(),
            trend: ctx.simulation.trend,
            volatility: ctx.simulation.volatility,
            speed: ctx.simulation.speed,
            tick_count: state.tick_count,
            controls_visible: state.controls_visible,
        },
        status_area,
    );

    let focused = controller.editor().focused();
    frame.render_widget(
        PriceChart::new(controller.scene())
            .title(format!(
                " Price ({}) ${:.2} ",
                ctx.simulation.trend,
                controller.latest_price()
            ))
            .focused(if state.focus_mode { focused } else { None })
            .dragging(controller.editor().dragging()),
        chart_rect,
    );

    let focused_point = focused
        .filter(|_| state.focus_mode)
        .and_then(|i| controller.series().get(i).map(|t| (i, t.price)));
    frame.render_widget(
        PortfolioPanel::new(
            &state.portfolio_summary,
            controller.latest_price(),
            &state.quantity_input,
        )
        .focused(focused_point),
        portfolio_area,
    );

    frame.render_widget(LogPanel::new(&state.log_messages), log_area);

    frame.render_widget(
        KeybindBar {
            focus_mode: state.focus_mode,
            controls_visible: state.controls_visible,
        },
        keybind_area,
    );
}
