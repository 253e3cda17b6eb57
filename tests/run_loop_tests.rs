use sandbox_chart::controller::{Command, Controller, SessionSettings};
use sandbox_chart::event::AppEvent;
use sandbox_chart::gate::StaticGate;
use sandbox_chart::sim::clock::ManualClock;
use sandbox_chart::sim::run_loop::{RunState, Scheduler};

fn controller(clock: &ManualClock) -> Controller {
    let settings = SessionSettings {
        rng_seed: Some(3),
        ..SessionSettings::default()
    };
    Controller::new(
        settings,
        Box::new(clock.clone()),
        Box::new(StaticGate::default()),
    )
}

#[test]
fn paused_frames_keep_timing_without_stepping() {
    let mut scheduler = Scheduler::new();
    assert_eq!(scheduler.state(), RunState::Paused);
    assert_eq!(scheduler.frame(0.0, 1.0), 0);
    assert_eq!(scheduler.frame(5.0, 1.0), 0);
    assert_eq!(scheduler.frames(), 2);

    // Resume measures from the last paused frame, not from when play was hit.
    assert!(scheduler.play());
    assert_eq!(scheduler.frame(5.5, 1.0), 1);
    assert_eq!(scheduler.frame(7.5, 1.0), 4);
}

#[test]
fn first_frame_owes_one_step_when_running() {
    let mut scheduler = Scheduler::new();
    scheduler.play();
    assert_eq!(scheduler.frame(100.0, 3.0), 1);
}

#[test]
fn play_and_pause_report_changes() {
    let mut scheduler = Scheduler::new();
    assert!(scheduler.play());
    assert!(!scheduler.play());
    assert!(scheduler.pause());
    assert!(!scheduler.pause());
}

#[test]
fn steps_formula_doubles_speed_times_elapsed() {
    assert_eq!(Scheduler::steps_for(1.0, 1.0), 2);
    assert_eq!(Scheduler::steps_for(2.5, 1.0), 5);
    assert_eq!(Scheduler::steps_for(0.001, 1.0), 1);
    assert_eq!(Scheduler::steps_for(1.0, 1.0 / 60.0), 1);
}

#[test]
fn backwards_time_counts_as_zero_elapsed() {
    let mut scheduler = Scheduler::new();
    scheduler.play();
    scheduler.frame(10.0, 1.0);
    assert_eq!(scheduler.frame(4.0, 1.0), 1);
}

#[test]
fn controller_frames_step_only_while_running() {
    let clock = ManualClock::new(1_000_000);
    let mut controller = controller(&clock);
    assert_eq!(controller.series().len(), 40);

    assert_eq!(controller.frame(0.0), 0);
    assert_eq!(controller.frame(1.0), 0);
    assert_eq!(controller.series().len(), 40);

    controller.apply(Command::Play);
    clock.advance(1_000);
    assert_eq!(controller.frame(2.0), 2);
    assert_eq!(controller.series().len(), 42);
    assert_eq!(controller.series().last().map(|t| t.timestamp_ms), Some(1_001_000));

    controller.apply(Command::Pause);
    assert_eq!(controller.frame(10.0), 0);
    assert_eq!(controller.series().len(), 42);
    assert_eq!(controller.context().scheduler.frames(), 4);
}

#[test]
fn frame_batch_rerenders_once_with_all_new_ticks() {
    let clock = ManualClock::new(0);
    let mut controller = controller(&clock);
    controller.apply(Command::Play);
    controller.frame(0.0);
    controller.drain_events();

    let steps = controller.frame(3.0);
    assert_eq!(steps, 6);
    assert_eq!(controller.scene().markers.len(), 40 + 1 + 6);

    let events = controller.drain_events();
    let appended = events
        .iter()
        .filter(|e| matches!(e, AppEvent::TickAppended(_)))
        .count();
    let summaries = events
        .iter()
        .filter(|e| matches!(e, AppEvent::PortfolioSummary(_)))
        .count();
    assert_eq!(appended, 6);
    assert_eq!(summaries, 1);
}

#[test]
fn explicit_step_ignores_run_state() {
    let clock = ManualClock::new(0);
    let mut controller = controller(&clock);
    assert_eq!(controller.run_state(), RunState::Paused);
    controller.apply(Command::Step);
    assert_eq!(controller.series().len(), 41);
    assert_eq!(controller.run_state(), RunState::Paused);
}

#[test]
fn speed_changes_apply_to_next_frame() {
    let clock = ManualClock::new(0);
    let mut controller = controller(&clock);
    controller.apply(Command::SetSpeed(4.0));
    controller.apply(Command::Play);
    controller.frame(0.0);
    assert_eq!(controller.frame(1.0), 8);
}
