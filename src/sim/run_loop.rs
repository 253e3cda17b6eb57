use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Paused,
    Running,
}

impl RunState {
    pub fn is_running(self) -> bool {
        self == RunState::Running
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Paused => f.write_str("PAUSED"),
            RunState::Running => f.write_str("RUNNING"),
        }
    }
}

/// Frame-paced scheduler. The host calls [`Scheduler::frame`] on every
/// display refresh whether or not the simulation is running; pausing only
/// skips stepping, so frame timing stays current for an instant resume.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    state: RunState,
    last_frame_secs: Option<f64>,
    frames: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Returns true when the state actually changed.
    pub fn play(&mut self) -> bool {
        self.set_state(RunState::Running)
    }

    pub fn pause(&mut self) -> bool {
        self.set_state(RunState::Paused)
    }

    pub fn toggle(&mut self) -> RunState {
        let next = match self.state {
            RunState::Paused => RunState::Running,
            RunState::Running => RunState::Paused,
        };
        self.state = next;
        next
    }

    fn set_state(&mut self, state: RunState) -> bool {
        let changed = self.state != state;
        self.state = state;
        changed
    }

    /// `max(1, floor(speed * elapsed * 2))`.
    pub fn steps_for(speed: f64, elapsed_secs: f64) -> usize {
        let raw = (speed * elapsed_secs * 2.0).floor();
        if raw.is_finite() && raw >= 1.0 {
            raw as usize
        } else {
            1
        }
    }

    /// Record a frame at `now_secs` (any monotonic origin) and return how many
    /// stepper calls it owes. Paused frames owe zero.
    pub fn frame(&mut self, now_secs: f64, speed: f64) -> usize {
        let elapsed = self
            .last_frame_secs
            .map(|prev| (now_secs - prev).max(0.0))
            .unwrap_or(0.0);
        self.last_frame_secs = Some(now_secs);
        self.frames += 1;
        if self.is_running() {
            Self::steps_for(speed, elapsed)
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_state() {
        let mut scheduler = Scheduler::new();
        assert_eq!(scheduler.toggle(), RunState::Running);
        assert_eq!(scheduler.toggle(), RunState::Paused);
    }

    #[test]
    fn steps_for_has_floor_of_one() {
        assert_eq!(Scheduler::steps_for(0.0, 10.0), 1);
        assert_eq!(Scheduler::steps_for(1.0, 0.016), 1);
        assert_eq!(Scheduler::steps_for(2.0, 1.0), 4);
        assert_eq!(Scheduler::steps_for(1.0, 2.75), 5);
    }
}
