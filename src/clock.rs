use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Stopped,
    Playing,
    Paused,
}

/// Play/pause/reset state machine for a breathing session.
///
/// Elapsed time is speed-scaled as it accumulates: while playing the
/// live segment counts as `(now - started_at) * speed`, and pausing or
/// changing speed folds the live segment into the accumulator. Speed
/// changes are therefore prospective only; time already accumulated at
/// an old speed is never rescaled.
///
/// Invariant: `started_at` is `Some` exactly when the state is Playing.
///
/// Every transition takes an explicit `now` so tests can drive the
/// clock without sleeping; the `*_now` wrappers use `Instant::now()`.
#[derive(Debug, Clone)]
pub struct SessionClock {
    state: ClockState,
    started_at: Option<Instant>,
    accumulated_secs: f64,
    speed: f64,
}

impl SessionClock {
    pub fn new(speed: f64) -> Self {
        Self {
            state: ClockState::Stopped,
            started_at: None,
            accumulated_secs: 0.0,
            speed,
        }
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == ClockState::Playing
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn start(&mut self, now: Instant) {
        if self.state != ClockState::Playing {
            self.started_at = Some(now);
            self.state = ClockState::Playing;
        }
    }

    pub fn pause(&mut self, now: Instant) {
        if self.state == ClockState::Playing {
            self.accumulated_secs = self.elapsed_seconds(now);
            self.started_at = None;
            self.state = ClockState::Paused;
        }
    }

    pub fn toggle(&mut self, now: Instant) {
        match self.state {
            ClockState::Playing => self.pause(now),
            ClockState::Stopped | ClockState::Paused => self.start(now),
        }
    }

    pub fn reset(&mut self) {
        self.state = ClockState::Stopped;
        self.started_at = None;
        self.accumulated_secs = 0.0;
    }

    /// Change the speed multiplier. While playing, the segment elapsed
    /// at the old speed is folded into the accumulator first so the new
    /// speed only applies from `now` on.
    pub fn set_speed(&mut self, speed: f64, now: Instant) {
        if self.state == ClockState::Playing {
            self.accumulated_secs = self.elapsed_seconds(now);
            self.started_at = Some(now);
        }
        self.speed = speed;
    }

    pub fn elapsed_seconds(&self, now: Instant) -> f64 {
        match self.started_at {
            Some(started_at) => {
                let live = now.saturating_duration_since(started_at).as_secs_f64();
                self.accumulated_secs + live * self.speed
            }
            None => self.accumulated_secs,
        }
    }

    pub fn toggle_now(&mut self) {
        self.toggle(Instant::now());
    }

    pub fn set_speed_now(&mut self, speed: f64) {
        self.set_speed(speed, Instant::now());
    }

    pub fn elapsed_seconds_now(&self) -> f64 {
        self.elapsed_seconds(Instant::now())
    }
}
