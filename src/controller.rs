//! Session controller: the single owner of the series, knobs, run state and
//! portfolio. Every user input is a [`Command`] applied here; the
//! presentation layer only reads the current [`Scene`] and drains
//! [`AppEvent`]s.

use crate::chart::renderer::render;
use crate::chart::scene::Scene;
use crate::chart::{ChartType, RenderConfig, Viewport};
use crate::config::Config;
use crate::editor::{focus_announcement, select_announcement, PointEditor};
use crate::event::AppEvent;
use crate::gate::AccessGate;
use crate::ledger::{coerce_quantity, Portfolio, DEFAULT_STARTING_CASH};
use crate::model::series::{
    SeriesBuffer, DEFAULT_CAPACITY, DEFAULT_SEED_SPACING_MS, DEFAULT_SEED_TICKS,
};
use crate::model::tick::Tick;
use crate::model::trend::Trend;
use crate::sim::clock::Clock;
use crate::sim::run_loop::{RunState, Scheduler};
use crate::sim::sampler::NormalSampler;
use crate::sim::stepper::{Stepper, DEFAULT_BASE_PRICE};
use crate::sim::SimulationConfig;

pub const LOCKED_MESSAGE: &str = "Controls are locked";

/// Everything needed to start a session.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub base_price: f64,
    pub capacity: usize,
    pub seed_ticks: usize,
    pub seed_spacing_ms: i64,
    pub rng_seed: Option<u64>,
    pub simulation: SimulationConfig,
    pub render: RenderConfig,
    pub viewport: Viewport,
    pub starting_cash: f64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            base_price: DEFAULT_BASE_PRICE,
            capacity: DEFAULT_CAPACITY,
            seed_ticks: DEFAULT_SEED_TICKS,
            seed_spacing_ms: DEFAULT_SEED_SPACING_MS,
            rng_seed: None,
            simulation: SimulationConfig::default(),
            render: RenderConfig::default(),
            viewport: Viewport::default(),
            starting_cash: DEFAULT_STARTING_CASH,
        }
    }
}

impl From<&Config> for SessionSettings {
    fn from(config: &Config) -> Self {
        Self {
            base_price: config.simulation.base_price,
            capacity: config.simulation.capacity,
            seed_ticks: config.simulation.seed_ticks,
            seed_spacing_ms: config.simulation.seed_spacing_ms,
            rng_seed: config.simulation.rng_seed,
            simulation: SimulationConfig {
                volatility: config.simulation.volatility,
                speed: config.simulation.speed,
                trend: config.simulation.trend,
            },
            render: RenderConfig {
                show_grid: config.chart.show_grid,
                chart_type: config.chart.chart_type,
            },
            viewport: Viewport::clamped_with_height(config.chart.width, config.chart.height),
            starting_cash: config.portfolio.starting_cash,
        }
    }
}

/// Mutable session state, owned by exactly one [`Controller`].
#[derive(Debug, Clone)]
pub struct SimulationContext {
    pub series: SeriesBuffer,
    pub simulation: SimulationConfig,
    pub render: RenderConfig,
    pub portfolio: Portfolio,
    pub scheduler: Scheduler,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Play,
    Pause,
    TogglePlay,
    Step,
    Reset,
    SetVolatility(f64),
    SetSpeed(f64),
    SetTrend(Trend),
    SetChartType(ChartType),
    SetGrid(bool),
    /// Raw quantity text; coerced to a positive integer.
    Buy(String),
    Sell(String),
    BeginDrag(usize),
    /// Vertical pixel position in scene coordinates.
    DragTo(f64),
    EndDrag,
    Focus(usize),
    FocusNavigate(isize),
    AnnounceFocused,
    Blur,
}

impl Command {
    /// Commands that change state and are therefore hidden behind the gate.
    /// The space and right-arrow shortcuts (`TogglePlay`, `Step`) stay live
    /// because the gate only hides the control surface.
    pub fn requires_controls(&self) -> bool {
        !matches!(
            self,
            Command::TogglePlay
                | Command::Step
                | Command::Focus(_)
                | Command::FocusNavigate(_)
                | Command::AnnounceFocused
                | Command::Blur
        )
    }
}

pub struct Controller {
    ctx: SimulationContext,
    settings: SessionSettings,
    stepper: Stepper,
    sampler: NormalSampler,
    clock: Box<dyn Clock>,
    gate: Box<dyn AccessGate>,
    editor: PointEditor,
    scene: Scene,
    controls_visible: bool,
    events: Vec<AppEvent>,
}

impl Controller {
    pub fn new(
        settings: SessionSettings,
        clock: Box<dyn Clock>,
        gate: Box<dyn AccessGate>,
    ) -> Self {
        let sampler = match settings.rng_seed {
            Some(seed) => NormalSampler::seeded(seed),
            None => NormalSampler::from_entropy(),
        };
        let ctx = SimulationContext {
            series: SeriesBuffer::new(settings.capacity),
            simulation: settings.simulation,
            render: settings.render,
            portfolio: Portfolio::new(settings.starting_cash),
            scheduler: Scheduler::new(),
        };
        let controls_visible = gate.is_authorized();
        let mut controller = Self {
            ctx,
            stepper: Stepper::new(settings.base_price),
            scene: Scene::empty(settings.viewport),
            settings,
            sampler,
            clock,
            gate,
            editor: PointEditor::new(),
            controls_visible,
            events: Vec::new(),
        };
        controller.seed_series();
        controller
    }

    /// Replace the window with the supplied ticks instead of a seeded walk.
    pub fn with_series(mut self, ticks: impl IntoIterator<Item = Tick>) -> Self {
        self.ctx.series = SeriesBuffer::from_ticks(self.settings.capacity, ticks);
        self.editor.reset();
        self.rerender();
        self
    }

    pub fn with_portfolio(mut self, portfolio: Portfolio) -> Self {
        self.ctx.portfolio = portfolio;
        self
    }

    pub fn context(&self) -> &SimulationContext {
        &self.ctx
    }

    pub fn series(&self) -> &SeriesBuffer {
        &self.ctx.series
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.ctx.portfolio
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn editor(&self) -> &PointEditor {
        &self.editor
    }

    pub fn run_state(&self) -> RunState {
        self.ctx.scheduler.state()
    }

    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    pub fn latest_price(&self) -> f64 {
        self.ctx.series.last_price_or(self.stepper.base_price())
    }

    pub fn portfolio_summary(&self) -> String {
        self.ctx.portfolio.summary(self.latest_price())
    }

    pub fn drain_events(&mut self) -> Vec<AppEvent> {
        std::mem::take(&mut self.events)
    }

    /// Run-loop entry point, called on every display frame with a monotonic
    /// timestamp in seconds. Returns how many steps were taken.
    pub fn frame(&mut self, now_secs: f64) -> usize {
        self.refresh_gate();
        let steps = self
            .ctx
            .scheduler
            .frame(now_secs, self.ctx.simulation.speed);
        if steps == 0 {
            return 0;
        }
        tracing::trace!(steps, "Frame stepping");
        for _ in 0..steps {
            self.step_once();
        }
        self.after_steps();
        steps
    }

    pub fn apply(&mut self, command: Command) {
        self.refresh_gate();
        if command.requires_controls() && !self.controls_visible {
            tracing::debug!(?command, "Command ignored while controls are locked");
            self.announce(LOCKED_MESSAGE.to_string());
            return;
        }

        match command {
            Command::Play => self.set_running(true),
            Command::Pause => self.set_running(false),
            Command::TogglePlay => {
                let running = !self.ctx.scheduler.is_running();
                self.set_running(running);
            }
            Command::Step => {
                self.step_once();
                self.after_steps();
            }
            Command::Reset => {
                self.seed_series();
                tracing::info!(ticks = self.ctx.series.len(), "Simulation reset");
                self.announce("Simulation reset".to_string());
            }
            Command::SetVolatility(value) => {
                let volatility = if value.is_finite() { value.max(0.0) } else { 0.0 };
                self.ctx.simulation.volatility = volatility;
                tracing::debug!(volatility, "Volatility changed");
                self.announce(format!("Volatility: {}", volatility));
            }
            Command::SetSpeed(value) => {
                if value.is_finite() && value > 0.0 {
                    self.ctx.simulation.speed = value;
                    tracing::debug!(speed = value, "Speed changed");
                    self.announce(format!("Speed: {}x", value));
                } else {
                    tracing::warn!(speed = value, "Ignoring non-positive speed");
                }
            }
            Command::SetTrend(trend) => {
                self.ctx.simulation.trend = trend;
                tracing::debug!(%trend, "Trend changed");
                self.announce(format!("Trend: {}", trend));
            }
            Command::SetChartType(chart_type) => {
                self.ctx.render.chart_type = chart_type;
                self.rerender();
                self.announce(format!("Chart type: {}", chart_type));
            }
            Command::SetGrid(show_grid) => {
                self.ctx.render.show_grid = show_grid;
                self.rerender();
                self.announce(if show_grid { "Grid on" } else { "Grid off" }.to_string());
            }
            Command::Buy(raw_qty) => self.trade(true, &raw_qty),
            Command::Sell(raw_qty) => self.trade(false, &raw_qty),
            Command::BeginDrag(index) => {
                if self.editor.begin_drag(index, &self.scene) {
                    self.editor.focus(index, self.ctx.series.len());
                }
            }
            Command::DragTo(y) => {
                if let Some(edit) = self.editor.drag_to(&mut self.ctx.series, y) {
                    tracing::debug!(index = edit.index, price = edit.price, "Point adjusted");
                    self.rerender();
                    self.events.push(AppEvent::PointEdited {
                        index: edit.index,
                        price: edit.price,
                    });
                    self.announce(edit.announcement());
                    self.push_summary();
                }
            }
            Command::EndDrag => {
                self.editor.end_drag();
            }
            Command::Focus(index) => {
                if let Some(i) = self.editor.focus(index, self.ctx.series.len()) {
                    self.announce(focus_announcement(i, self.ctx.series[i].price));
                }
            }
            Command::FocusNavigate(delta) => {
                if let Some(i) = self.editor.navigate(delta, self.ctx.series.len()) {
                    self.announce(focus_announcement(i, self.ctx.series[i].price));
                }
            }
            Command::AnnounceFocused => {
                if let Some(i) = self.editor.focused() {
                    self.announce(select_announcement(i, self.ctx.series[i].price));
                }
            }
            Command::Blur => self.editor.clear_focus(),
        }
    }

    fn set_running(&mut self, running: bool) {
        let changed = if running {
            self.ctx.scheduler.play()
        } else {
            self.ctx.scheduler.pause()
        };
        let state = self.ctx.scheduler.state();
        if changed {
            tracing::info!(%state, "Run state changed");
            self.events.push(AppEvent::RunStateChanged(state));
        }
        self.announce(
            if running {
                "Simulation started"
            } else {
                "Simulation paused"
            }
            .to_string(),
        );
    }

    fn trade(&mut self, buy: bool, raw_qty: &str) {
        let qty = coerce_quantity(raw_qty);
        let price = self.latest_price();
        let result = if buy {
            self.ctx.portfolio.buy(qty, price)
        } else {
            self.ctx.portfolio.sell(qty, price)
        };
        match result {
            Ok(trade) => {
                tracing::info!(side = ?trade.side, qty, price, amount = trade.amount, "Trade executed");
                self.announce(trade.to_string());
                self.events.push(AppEvent::TradeExecuted(trade));
                self.push_summary();
            }
            Err(e) => {
                tracing::info!(error = %e, qty, price, "Trade rejected");
                self.announce(e.to_string());
                self.events.push(AppEvent::TradeRejected(e.to_string()));
            }
        }
    }

    fn step_once(&mut self) {
        let evicts = self.ctx.series.len() >= self.ctx.series.capacity();
        let tick = self.stepper.step(
            &mut self.ctx.series,
            &self.ctx.simulation,
            &mut self.sampler,
            1.0,
            self.clock.now_ms(),
        );
        if evicts {
            self.editor.shift_after_eviction();
        }
        self.events.push(AppEvent::TickAppended(tick));
        self.announce(format!("Price: ${:.2}", tick.price));
    }

    fn after_steps(&mut self) {
        self.rerender();
        self.push_summary();
    }

    fn seed_series(&mut self) {
        self.ctx.series.seed(
            &mut self.sampler,
            self.settings.base_price,
            self.settings.seed_ticks.max(1),
            self.settings.seed_spacing_ms,
            self.clock.now_ms(),
        );
        self.editor.reset();
        self.rerender();
        self.events.push(AppEvent::SimulationReset {
            ticks: self.ctx.series.len(),
        });
        self.push_summary();
    }

    fn rerender(&mut self) {
        self.scene = render(&self.ctx.series, &self.ctx.render, self.settings.viewport);
    }

    /// Re-read the gate, emitting a visibility event when it changed.
    pub fn refresh_gate(&mut self) {
        let visible = self.gate.is_authorized();
        if visible != self.controls_visible {
            self.controls_visible = visible;
            if !visible {
                self.editor.end_drag();
            }
            tracing::info!(visible, "Controls visibility changed");
            self.events.push(AppEvent::ControlsVisibility(visible));
        }
    }

    fn push_summary(&mut self) {
        let summary = self.portfolio_summary();
        self.events.push(AppEvent::PortfolioSummary(summary));
    }

    fn announce(&mut self, message: String) {
        self.events.push(AppEvent::Announce(message));
    }
}
