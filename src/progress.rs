use crate::error::Error;
use crate::pattern::{CoordinateSequence, Point};

/// Normalized cyclic progress for a given elapsed time.
///
/// `(elapsed * speed / duration) mod 1.0`, wrapped into [0, 1). Fails
/// fast on non-positive duration or speed instead of dividing by zero
/// or clamping silently.
pub fn compute_progress(elapsed: f64, duration: f64, speed: f64) -> Result<f64, Error> {
    if duration <= 0.0 {
        return Err(Error::NonPositiveDuration(duration));
    }
    if speed <= 0.0 {
        return Err(Error::NonPositiveSpeed(speed));
    }
    Ok((elapsed * speed / duration).rem_euclid(1.0))
}

/// Resolve a progress value to a point on the path.
///
/// Progress is wrapped mod 1.0 first, so ever-increasing elapsed time
/// and negative values are both safe. Motion is stepwise: the point at
/// `floor(progress * len)` is returned with no interpolation.
pub fn current_position(seq: &CoordinateSequence, progress: f64) -> Point {
    let wrapped = progress.rem_euclid(1.0);
    let idx = ((wrapped * seq.len() as f64) as usize).min(seq.len() - 1);
    // Index is clamped, and the three concrete patterns guarantee a
    // non-empty sequence, so this lookup cannot fail.
    seq.get(idx).unwrap_or_else(|| seq.first())
}

/// Seconds left in the current cycle, for the countdown display.
pub fn remaining_secs(elapsed: f64, duration: f64) -> f64 {
    duration - elapsed.rem_euclid(duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{Pattern, PatternKind};
    use assert_matches::assert_matches;

    #[test]
    fn test_compute_progress_at_zero() {
        assert_eq!(compute_progress(0.0, 60.0, 1.0).unwrap(), 0.0);
    }

    #[test]
    fn test_compute_progress_halfway() {
        assert_eq!(compute_progress(30.0, 60.0, 1.0).unwrap(), 0.5);
    }

    #[test]
    fn test_compute_progress_wraps() {
        assert_eq!(compute_progress(90.0, 60.0, 1.0).unwrap(), 0.5);
        assert_eq!(compute_progress(60.0, 60.0, 1.0).unwrap(), 0.0);
    }

    #[test]
    fn test_compute_progress_speed_scales() {
        assert_eq!(compute_progress(15.0, 60.0, 2.0).unwrap(), 0.5);
        assert_eq!(compute_progress(60.0, 60.0, 0.5).unwrap(), 0.5);
    }

    #[test]
    fn test_compute_progress_stays_in_unit_interval() {
        for elapsed in [0.0, 0.1, 59.9, 60.0, 61.3, 599.99, -5.0] {
            let p = compute_progress(elapsed, 60.0, 1.3).unwrap();
            assert!((0.0..1.0).contains(&p), "progress out of range: {p}");
        }
    }

    #[test]
    fn test_compute_progress_invalid_configuration() {
        assert_matches!(
            compute_progress(10.0, 0.0, 1.0),
            Err(Error::NonPositiveDuration(_))
        );
        assert_matches!(
            compute_progress(10.0, -60.0, 1.0),
            Err(Error::NonPositiveDuration(_))
        );
        assert_matches!(
            compute_progress(10.0, 60.0, 0.0),
            Err(Error::NonPositiveSpeed(_))
        );
        assert_matches!(
            compute_progress(10.0, 60.0, -0.5),
            Err(Error::NonPositiveSpeed(_))
        );
    }

    #[test]
    fn test_current_position_start_of_cycle() {
        // Round-trip: progress at elapsed 0 lands on the first point,
        // for every pattern and duration.
        for kind in [PatternKind::Circle, PatternKind::Wave, PatternKind::Square] {
            for duration in [30.0, 60.0, 300.0] {
                let seq = Pattern::new(kind, duration).unwrap().coordinates();
                let progress = compute_progress(0.0, duration, 1.0).unwrap();
                assert_eq!(current_position(&seq, progress), seq.first());
            }
        }
    }

    #[test]
    fn test_current_position_indexing() {
        let seq = Pattern::new(PatternKind::Square, 60.0).unwrap().coordinates();

        assert_eq!(current_position(&seq, 0.0), seq.get(0).unwrap());
        assert_eq!(current_position(&seq, 0.5), seq.get(50).unwrap());
        assert_eq!(current_position(&seq, 0.999), seq.get(99).unwrap());
    }

    #[test]
    fn test_current_position_wraps_out_of_range_progress() {
        let seq = Pattern::new(PatternKind::Wave, 60.0).unwrap().coordinates();

        assert_eq!(current_position(&seq, 1.0), seq.get(0).unwrap());
        assert_eq!(current_position(&seq, 2.5), current_position(&seq, 0.5));
        assert_eq!(current_position(&seq, -0.25), current_position(&seq, 0.75));
    }

    #[test]
    fn test_remaining_secs() {
        assert_eq!(remaining_secs(0.0, 60.0), 60.0);
        assert_eq!(remaining_secs(45.0, 60.0), 15.0);
        // Wraps with the cycle: 90s elapsed in a 60s cycle leaves 30s.
        assert_eq!(remaining_secs(90.0, 60.0), 30.0);
    }
}
