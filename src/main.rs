#![warn(clippy::all, clippy::pedantic)]

use std::io::{self, Stdout};
use std::time::Instant;

use anyhow::{Context, anyhow};
use blockfall::app::{App, AppResult};
use blockfall::config::{self, Config};
use blockfall::input::{InputSource, KeyboardInput};
use blockfall::ui;
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    cursor::Show,
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        supports_keyboard_enhancement,
    },
};
use log::{debug, error, info};
use ratatui::{Terminal, prelude::*};

const LOG_PATH: &str = "blockfall.log";

fn main() -> anyhow::Result<()> {
    // Log to a file so output never lands on the alternate screen
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(LOG_PATH)
        .with_context(|| format!("failed to create log file {LOG_PATH}"))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting blockfall");

    let config = match config::loader::load_config_from_file() {
        Ok(config) => {
            info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {e}");
            Config::default()
        }
    };

    enable_raw_mode().context("failed to enable raw mode")?;
    let release_events = matches!(supports_keyboard_enhancement(), Ok(true));
    debug!("Key release events: {release_events}");

    let res = setup_terminal(release_events).and_then(|mut terminal| {
        let app = App::new(&config);
        let mut input = KeyboardInput::new(release_events);
        run_app(&mut terminal, app, &mut input, &config)
            .map_err(|err| anyhow!("game error: {err}"))
    });

    // Restore the terminal on every path out of the game
    let restored = restore_terminal(release_events);

    if let Err(err) = &res {
        error!("{err:?}");
    }
    res.and(restored)
}

fn setup_terminal(release_events: bool) -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;

    // Key release events let a held soft drop end exactly when the key goes up
    if release_events {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )
        .context("failed to enable keyboard enhancement")?;
    }

    Terminal::new(CrosstermBackend::new(stdout)).context("failed to create terminal")
}

// Best effort: every step runs even if an earlier one fails
fn restore_terminal(release_events: bool) -> anyhow::Result<()> {
    let mut stdout = io::stdout();
    let popped = if release_events {
        execute!(stdout, PopKeyboardEnhancementFlags)
    } else {
        Ok(())
    };
    let raw = disable_raw_mode();
    let left = execute!(stdout, LeaveAlternateScreen, Show);

    popped.context("failed to disable keyboard enhancement")?;
    raw.context("failed to disable raw mode")?;
    left.context("failed to leave alternate screen")?;
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    input: &mut impl InputSource,
    config: &Config,
) -> AppResult<()> {
    let frame_period = config.frame_period();
    let mut last_render: Option<Instant> = None;

    loop {
        // Draw the UI
        if last_render.is_none_or(|at| at.elapsed() >= frame_period) {
            terminal.draw(|f| ui::render(f, &mut app, config.cell_width))?;
            last_render = Some(Instant::now());
        }

        app.frame(input)?;

        if app.should_quit {
            info!("Quitting with {} rows cleared", app.score());
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall::input::Intent;
    use ratatui::backend::TestBackend;

    struct FailingInput;

    impl InputSource for FailingInput {
        fn poll_intents(&mut self) -> AppResult<Vec<Intent>> {
            Err(io::Error::other("input closed").into())
        }
    }

    struct QuitInput;

    impl InputSource for QuitInput {
        fn poll_intents(&mut self) -> AppResult<Vec<Intent>> {
            Ok(vec![Intent::Quit])
        }
    }

    fn test_terminal() -> Terminal<TestBackend> {
        Terminal::new(TestBackend::new(60, 30)).unwrap()
    }

    #[test]
    fn test_run_app_returns_input_errors() {
        let config = Config::default();
        let mut terminal = test_terminal();

        let err = run_app(&mut terminal, App::new(&config), &mut FailingInput, &config)
            .unwrap_err();

        assert!(err.to_string().contains("input closed"));
    }

    #[test]
    fn test_run_app_stops_on_quit() {
        let config = Config::default();
        let mut terminal = test_terminal();

        assert!(run_app(&mut terminal, App::new(&config), &mut QuitInput, &config).is_ok());
    }
}
