use thiserror::Error;

/// Errors surfaced by the core at configuration time.
///
/// All animation-time operations are pure and total; only bad
/// configuration values can fail, and they fail fast rather than
/// being silently clamped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("invalid configuration: duration must be positive, got {0}")]
    NonPositiveDuration(f64),

    #[error("invalid configuration: speed must be positive, got {0}")]
    NonPositiveSpeed(f64),
}
