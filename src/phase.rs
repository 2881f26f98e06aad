use crate::pattern::PatternKind;

/// Breathing instruction derived from progress each tick, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    Inhale,
    Hold,
    Exhale,
    #[strum(serialize = "Hold breath")]
    HoldBreath,
}

/// Quarters of the square cycle, in trace order.
const SQUARE_PHASES: [Phase; 4] = [Phase::Inhale, Phase::Hold, Phase::Exhale, Phase::Hold];

/// Map progress (and the marker's current y) to a phase label.
///
/// Wave classifies on y: strictly above the axis is Inhale, everything
/// else (including exactly 0) is Exhale. The boundary matters for
/// determinism and must not be widened to >=.
pub fn classify(kind: PatternKind, progress: f64, current_y: f64) -> Phase {
    match kind {
        PatternKind::Circle => Phase::HoldBreath,
        PatternKind::Wave => {
            if current_y > 0.0 {
                Phase::Inhale
            } else {
                Phase::Exhale
            }
        }
        PatternKind::Square => {
            let quarter = (progress.rem_euclid(1.0) * 4.0) as usize % 4;
            SQUARE_PHASES[quarter]
        }
    }
}
