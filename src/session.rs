use std::time::Instant;

use crate::clock::{ClockState, SessionClock};
use crate::error::Error;
use crate::pattern::{CoordinateSequence, Pattern, PatternKind, Point};
use crate::phase::{self, Phase};
use crate::progress;

/// UI-facing knob ranges. The core only requires positive values; the
/// sliders/key handlers stay within these.
pub const DURATION_RANGE_SECS: (f64, f64) = (30.0, 300.0);
pub const DURATION_STEP_SECS: f64 = 30.0;
pub const SPEED_RANGE: (f64, f64) = (0.5, 2.0);
pub const SPEED_STEP: f64 = 0.1;

pub const DEFAULT_DURATION_SECS: f64 = 60.0;
pub const DEFAULT_SPEED: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub pattern: PatternKind,
    pub duration_secs: f64,
    pub speed: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            pattern: PatternKind::Circle,
            duration_secs: DEFAULT_DURATION_SECS,
            speed: DEFAULT_SPEED,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.duration_secs <= 0.0 {
            return Err(Error::NonPositiveDuration(self.duration_secs));
        }
        if self.speed <= 0.0 {
            return Err(Error::NonPositiveSpeed(self.speed));
        }
        Ok(())
    }
}

/// Everything the renderer needs for one animation tick.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame<'a> {
    pub points: &'a [Point],
    pub start_anchor: Point,
    pub end_anchor: Point,
    pub position: Point,
    pub phase: Phase,
    pub progress: f64,
    pub elapsed_secs: f64,
    pub remaining_secs: f64,
}

/// One breathing session: the configured pattern, its cached path, and
/// the play/pause clock. All state is owned here and read-modify-written
/// synchronously on the driving loop; nothing is shared across threads.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    pattern: Pattern,
    coordinates: CoordinateSequence,
    clock: SessionClock,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self, Error> {
        config.validate()?;
        let pattern = Pattern::new(config.pattern, config.duration_secs)?;
        let coordinates = pattern.coordinates();
        Ok(Self {
            config,
            pattern,
            coordinates,
            clock: SessionClock::new(config.speed),
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn coordinates(&self) -> &CoordinateSequence {
        &self.coordinates
    }

    pub fn clock_state(&self) -> ClockState {
        self.clock.state()
    }

    pub fn is_playing(&self) -> bool {
        self.clock.is_playing()
    }

    pub fn toggle(&mut self, now: Instant) {
        self.clock.toggle(now);
    }

    pub fn toggle_now(&mut self) {
        self.clock.toggle_now();
    }

    pub fn reset(&mut self) {
        self.clock.reset();
    }

    /// Switch the shape. Geometry is regenerated; the clock keeps
    /// running so the marker jumps onto the new path mid-cycle.
    pub fn set_pattern(&mut self, kind: PatternKind) -> Result<(), Error> {
        self.pattern = Pattern::new(kind, self.config.duration_secs)?;
        self.coordinates = self.pattern.coordinates();
        self.config.pattern = kind;
        Ok(())
    }

    pub fn set_duration(&mut self, duration_secs: f64) -> Result<(), Error> {
        // Duration is a timing divisor only, but the pattern carries it,
        // so rebuild the pattern to keep the two in sync.
        self.pattern = Pattern::new(self.config.pattern, duration_secs)?;
        self.coordinates = self.pattern.coordinates();
        self.config.duration_secs = duration_secs;
        Ok(())
    }

    pub fn set_speed(&mut self, speed: f64, now: Instant) -> Result<(), Error> {
        if speed <= 0.0 {
            return Err(Error::NonPositiveSpeed(speed));
        }
        self.clock.set_speed(speed, now);
        self.config.speed = speed;
        Ok(())
    }

    pub fn set_speed_now(&mut self, speed: f64) -> Result<(), Error> {
        self.set_speed(speed, Instant::now())
    }

    /// Pure read of the session at `now`: no state is mutated, so the
    /// scheduling mechanism driving this is swappable.
    pub fn frame_at(&self, now: Instant) -> RenderFrame<'_> {
        let elapsed = self.clock.elapsed_seconds(now);
        // The clock output is already speed-scaled, and the duration is
        // validated positive at construction and in set_duration, so the
        // wrap is computed inline; the fallible compute_progress stays
        // for callers without that invariant.
        let progress = (elapsed / self.config.duration_secs).rem_euclid(1.0);
        let position = progress::current_position(&self.coordinates, progress);
        let (start_anchor, end_anchor) = self.pattern.anchors();

        RenderFrame {
            points: self.coordinates.points(),
            start_anchor,
            end_anchor,
            position,
            phase: phase::classify(self.config.pattern, progress, position.1),
            progress,
            elapsed_secs: elapsed,
            remaining_secs: progress::remaining_secs(elapsed, self.config.duration_secs),
        }
    }

    pub fn frame_now(&self) -> RenderFrame<'_> {
        self.frame_at(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::time::Duration;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    fn session(kind: PatternKind) -> Session {
        Session::new(SessionConfig {
            pattern: kind,
            duration_secs: 60.0,
            speed: 1.0,
        })
        .unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.pattern, PatternKind::Circle);
        assert_eq!(config.duration_secs, 60.0);
        assert_eq!(config.speed, 1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        assert_matches!(
            Session::new(SessionConfig {
                pattern: PatternKind::Wave,
                duration_secs: 0.0,
                speed: 1.0,
            }),
            Err(Error::NonPositiveDuration(_))
        );
        assert_matches!(
            Session::new(SessionConfig {
                pattern: PatternKind::Wave,
                duration_secs: 60.0,
                speed: -1.0,
            }),
            Err(Error::NonPositiveSpeed(_))
        );
    }

    #[test]
    fn test_initial_frame_is_at_start() {
        let t0 = Instant::now();
        let session = session(PatternKind::Square);
        let frame = session.frame_at(t0);

        assert_eq!(frame.progress, 0.0);
        assert_eq!(frame.position, frame.points[0]);
        assert_eq!(frame.start_anchor, (-1.0, -1.0));
        assert_eq!(frame.end_anchor, (-1.0, -1.0));
        assert_eq!(frame.remaining_secs, 60.0);
        assert_eq!(frame.phase, Phase::Inhale);
    }

    #[test]
    fn test_frame_advances_with_time() {
        let t0 = Instant::now();
        let mut session = session(PatternKind::Wave);
        session.toggle(t0);

        let quarter = session.frame_at(t0 + secs(15));
        assert_eq!(quarter.progress, 0.25);
        assert_eq!(quarter.remaining_secs, 45.0);
        // A quarter into the wave the marker is near the crest.
        assert!(quarter.position.1 > 0.9);
        assert_eq!(quarter.phase, Phase::Inhale);

        let three_quarters = session.frame_at(t0 + secs(45));
        assert!(three_quarters.position.1 < -0.9);
        assert_eq!(three_quarters.phase, Phase::Exhale);
    }

    #[test]
    fn test_frame_wraps_past_one_cycle() {
        let t0 = Instant::now();
        let mut session = session(PatternKind::Circle);
        session.toggle(t0);

        let frame = session.frame_at(t0 + secs(90));
        assert_eq!(frame.progress, 0.5);
        assert_eq!(frame.remaining_secs, 30.0);
        assert_eq!(frame.phase, Phase::HoldBreath);
    }

    #[test]
    fn test_frame_progress_matches_progress_mapper() {
        // The inline wrap in frame_at must agree with compute_progress
        // for a clock that has already folded speed in.
        let t0 = Instant::now();
        let mut session = session(PatternKind::Wave);
        session.toggle(t0);

        for elapsed in [0u64, 15, 45, 60, 90, 605] {
            let frame = session.frame_at(t0 + secs(elapsed));
            let expected =
                progress::compute_progress(elapsed as f64, 60.0, 1.0).unwrap();
            assert_eq!(frame.progress, expected, "elapsed {elapsed}s");
        }
    }

    #[test]
    fn test_frame_is_pure() {
        let t0 = Instant::now();
        let mut session = session(PatternKind::Square);
        session.toggle(t0);

        let a = session.frame_at(t0 + secs(20));
        let b = session.frame_at(t0 + secs(20));
        assert_eq!(a, b);
    }

    #[test]
    fn test_pause_freezes_frame() {
        let t0 = Instant::now();
        let mut session = session(PatternKind::Wave);
        session.toggle(t0);
        session.toggle(t0 + secs(10)); // pause

        let frozen = session.frame_at(t0 + secs(10));
        let later = session.frame_at(t0 + secs(100));
        assert_eq!(frozen, later);
    }

    #[test]
    fn test_reset_returns_to_start() {
        let t0 = Instant::now();
        let mut session = session(PatternKind::Circle);
        session.toggle(t0);
        session.reset();

        assert_eq!(session.clock_state(), ClockState::Stopped);
        let frame = session.frame_at(t0 + secs(30));
        assert_eq!(frame.progress, 0.0);
        assert_eq!(frame.elapsed_secs, 0.0);
    }

    #[test]
    fn test_set_pattern_keeps_clock_running() {
        let t0 = Instant::now();
        let mut session = session(PatternKind::Circle);
        session.toggle(t0);

        session.set_pattern(PatternKind::Square).unwrap();
        assert!(session.is_playing());
        assert_eq!(session.config().pattern, PatternKind::Square);

        let frame = session.frame_at(t0 + secs(30));
        assert_eq!(frame.progress, 0.5);
        assert_eq!(frame.phase, Phase::Exhale);
    }

    #[test]
    fn test_set_duration_rescales_progress() {
        let t0 = Instant::now();
        let mut session = session(PatternKind::Wave);
        session.toggle(t0);

        session.set_duration(120.0).unwrap();
        let frame = session.frame_at(t0 + secs(30));
        assert_eq!(frame.progress, 0.25);
        assert_eq!(frame.remaining_secs, 90.0);
    }

    #[test]
    fn test_set_duration_rejects_non_positive() {
        let mut session = session(PatternKind::Wave);
        assert_matches!(
            session.set_duration(0.0),
            Err(Error::NonPositiveDuration(_))
        );
        // Config untouched on failure.
        assert_eq!(session.config().duration_secs, 60.0);
    }

    #[test]
    fn test_set_speed_is_prospective() {
        let t0 = Instant::now();
        let mut session = session(PatternKind::Circle);
        session.toggle(t0);

        // 30s at 1.0x then 15s at 2.0x: 60s elapsed, one full cycle.
        session.set_speed(2.0, t0 + secs(30)).unwrap();
        let frame = session.frame_at(t0 + secs(45));
        assert_eq!(frame.elapsed_secs, 60.0);
        assert_eq!(frame.progress, 0.0);
    }

    #[test]
    fn test_set_speed_rejects_non_positive() {
        let t0 = Instant::now();
        let mut session = session(PatternKind::Circle);
        assert_matches!(
            session.set_speed(0.0, t0),
            Err(Error::NonPositiveSpeed(_))
        );
        assert_eq!(session.config().speed, 1.0);
    }
}
