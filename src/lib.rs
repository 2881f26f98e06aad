// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod clock;
pub mod config;
pub mod error;
pub mod pattern;
pub mod phase;
pub mod progress;
pub mod runtime;
pub mod session;
pub mod ui;

pub use error::Error;

/// Animation tick interval for the cooperative render loop.
pub const TICK_RATE_MS: u64 = 50;
