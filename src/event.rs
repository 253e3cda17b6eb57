use crate::ledger::Trade;
use crate::model::tick::Tick;
use crate::sim::run_loop::RunState;

/// Notifications emitted by the controller for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Human-readable status line (live-region text).
    Announce(String),
    TickAppended(Tick),
    PointEdited { index: usize, price: f64 },
    TradeExecuted(Trade),
    TradeRejected(String),
    PortfolioSummary(String),
    RunStateChanged(RunState),
    ControlsVisibility(bool),
    SimulationReset { ticks: usize },
}
