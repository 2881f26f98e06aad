use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};

use crate::TICK_RATE_MS;

/// What the animation loop sees on each iteration: user input when
/// there is any, a synthesized Tick otherwise.
#[derive(Clone, Debug)]
pub enum Event {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Where events come from. The loop only ever waits on this, so tests
/// can feed scripted input instead of a terminal.
pub trait EventSource: Send + 'static {
    /// Wait up to `timeout` for the next event.
    fn recv_timeout(&self, timeout: Duration) -> Result<Event, RecvTimeoutError>;
}

/// Reads keys and resizes from the terminal on a background thread.
pub struct CrosstermEventSource {
    rx: Receiver<Event>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let ev = match event::read() {
                Ok(CtEvent::Key(key)) => Event::Key(key),
                Ok(CtEvent::Resize(_, _)) => Event::Resize,
                Ok(_) => continue,
                Err(_) => break,
            };
            if tx.send(ev).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<Event, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Scripted event source for tests: push events through the paired
/// sender, the runner drains them in order.
pub struct TestEventSource {
    rx: Receiver<Event>,
}

impl TestEventSource {
    pub fn pair() -> (Sender<Event>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self { rx })
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<Event, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Paces the animation loop: pending input is delivered immediately,
/// and quiet periods become Ticks at the configured interval. The loop
/// blocks between iterations instead of busy-polling, and a dead input
/// source degrades to a pure tick stream so the animation keeps going.
pub struct Runner<E: EventSource> {
    source: E,
    tick_interval: Duration,
}

impl Runner<CrosstermEventSource> {
    /// Production runner: terminal input, ticking at `TICK_RATE_MS`.
    pub fn with_terminal() -> Self {
        Self::new(
            CrosstermEventSource::new(),
            Duration::from_millis(TICK_RATE_MS),
        )
    }
}

impl<E: EventSource> Runner<E> {
    pub fn new(source: E, tick_interval: Duration) -> Self {
        Self {
            source,
            tick_interval,
        }
    }

    /// Next event for the loop, waiting at most one tick interval.
    pub fn step(&self) -> Event {
        match self.source.recv_timeout(self.tick_interval) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => Event::Tick,
        }
    }
}
