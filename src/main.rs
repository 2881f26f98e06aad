use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
};

use respiro::config::{Config, ConfigStore, FileConfigStore};
use respiro::pattern::PatternKind;
use respiro::runtime::{Event, Runner};
use respiro::session::{
    Session, SessionConfig, DURATION_RANGE_SECS, DURATION_STEP_SECS, SPEED_RANGE, SPEED_STEP,
};

/// terminal breathing guide with animated patterns
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal breathing guide. Pick a pattern (circle, wave, or square), then follow the moving dot with your breath while the phase label paces you."
)]
pub struct Cli {
    /// breathing pattern to practice
    #[clap(short, long, value_enum)]
    pattern: Option<PatternKind>,

    /// cycle duration in seconds (30-300, steps of 30)
    #[clap(short, long, value_parser = parse_duration)]
    duration: Option<u64>,

    /// animation speed multiplier (0.5-2.0)
    #[clap(short, long, value_parser = parse_speed)]
    speed: Option<f64>,
}

fn parse_duration(s: &str) -> Result<u64, String> {
    let secs: u64 = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    let (min, max) = (DURATION_RANGE_SECS.0 as u64, DURATION_RANGE_SECS.1 as u64);
    let step = DURATION_STEP_SECS as u64;
    if !(min..=max).contains(&secs) {
        return Err(format!("duration must be between {min} and {max} seconds"));
    }
    if secs % step != 0 {
        return Err(format!("duration must be a multiple of {step} seconds"));
    }
    Ok(secs)
}

fn parse_speed(s: &str) -> Result<f64, String> {
    let speed: f64 = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    if !(SPEED_RANGE.0..=SPEED_RANGE.1).contains(&speed) {
        return Err(format!(
            "speed must be between {} and {}",
            SPEED_RANGE.0, SPEED_RANGE.1
        ));
    }
    Ok(speed)
}

impl Cli {
    /// Saved settings first, CLI flags on top.
    fn to_session_config(&self, saved: &Config) -> SessionConfig {
        SessionConfig {
            pattern: self.pattern.unwrap_or(saved.pattern),
            duration_secs: self.duration.map(|d| d as f64).unwrap_or(saved.duration_secs),
            speed: self.speed.unwrap_or(saved.speed),
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub session: Session,
}

impl App {
    pub fn new(config: SessionConfig) -> Result<Self, respiro::Error> {
        Ok(Self {
            session: Session::new(config)?,
        })
    }
}

/// What a keypress asks the event loop to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyOutcome {
    Continue,
    Quit,
}

fn step_duration(current: f64, delta: f64) -> f64 {
    (current + delta).clamp(DURATION_RANGE_SECS.0, DURATION_RANGE_SECS.1)
}

fn step_speed(current: f64, delta: f64) -> f64 {
    // Round to one decimal so repeated 0.1 steps do not drift.
    let stepped = ((current + delta) * 10.0).round() / 10.0;
    stepped.clamp(SPEED_RANGE.0, SPEED_RANGE.1)
}

fn handle_key(app: &mut App, key: KeyEvent) -> KeyOutcome {
    let config = *app.session.config();
    match key.code {
        KeyCode::Esc => return KeyOutcome::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return KeyOutcome::Quit;
        }
        KeyCode::Char('q') => return KeyOutcome::Quit,
        KeyCode::Char(' ') => app.session.toggle_now(),
        KeyCode::Char('r') => app.session.reset(),
        KeyCode::Char('c') | KeyCode::Char('1') => {
            let _ = app.session.set_pattern(PatternKind::Circle);
        }
        KeyCode::Char('w') | KeyCode::Char('2') => {
            let _ = app.session.set_pattern(PatternKind::Wave);
        }
        KeyCode::Char('s') | KeyCode::Char('3') => {
            let _ = app.session.set_pattern(PatternKind::Square);
        }
        KeyCode::Up => {
            let _ = app
                .session
                .set_duration(step_duration(config.duration_secs, DURATION_STEP_SECS));
        }
        KeyCode::Down => {
            let _ = app
                .session
                .set_duration(step_duration(config.duration_secs, -DURATION_STEP_SECS));
        }
        KeyCode::Right => {
            let _ = app.session.set_speed_now(step_speed(config.speed, SPEED_STEP));
        }
        KeyCode::Left => {
            let _ = app.session.set_speed_now(step_speed(config.speed, -SPEED_STEP));
        }
        _ => {}
    }
    KeyOutcome::Continue
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(&app.session, f.area());
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::with_terminal();

    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            Event::Tick => {
                // The session recomputes its frame from the wall clock,
                // so a tick only needs to trigger a redraw while playing.
                if app.session.is_playing() {
                    terminal.draw(|f| ui(app, f))?;
                }
            }
            Event::Resize => {
                terminal.draw(|f| ui(app, f))?;
            }
            Event::Key(key) => {
                if handle_key(app, key) == KeyOutcome::Quit {
                    break;
                }
                terminal.draw(|f| ui(app, f))?;
            }
        }
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let session_config = cli.to_session_config(&store.load());
    let mut app = App::new(session_config)?;

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result?;

    // Persist the last-used knobs for the next run.
    store.save(&Config::from(app.session.config()))?;

    Ok(())
}
