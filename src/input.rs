#![warn(clippy::all, clippy::pedantic)]

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::trace;
use std::time::{Duration, Instant};

use crate::app::AppResult;

/// What the player asked for during a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    RotateCw,
    /// The soft-drop key went down (`true`) or up (`false`).
    SoftDropHeld(bool),
    /// Leave the game. Honored even after game over.
    Quit,
}

/// Anything that can report the intents gathered since the last poll.
pub trait InputSource {
    fn poll_intents(&mut self) -> AppResult<Vec<Intent>>;
}

// How long to wait for events before handing control back to the game loop
const POLL_TIMEOUT: Duration = Duration::from_millis(5);

/// Without key release events, a held soft drop ends once no Down key event
/// has been seen for this long.
///
/// This is shorter than the usual terminal auto-repeat delay (250 to 500 ms),
/// so holding Down drops one step, pauses until auto-repeat kicks in, then
/// keeps dropping. A longer grace would remove the pause but turn every tap
/// into a run of several rows.
pub const HELD_KEY_GRACE: Duration = Duration::from_millis(100);

/// Keyboard input read from the terminal through crossterm.
pub struct KeyboardInput {
    release_events: bool,
    soft_drop_deadline: Option<Instant>,
}

impl KeyboardInput {
    /// `release_events` says whether the terminal reports key releases
    /// (keyboard enhancement enabled).
    #[must_use]
    pub fn new(release_events: bool) -> Self {
        Self {
            release_events,
            soft_drop_deadline: None,
        }
    }

    /// Records a Down key event seen at `now`. Only used when the terminal
    /// does not report releases.
    pub fn note_soft_drop_key(&mut self, now: Instant) {
        if !self.release_events {
            self.soft_drop_deadline = Some(now + HELD_KEY_GRACE);
        }
    }

    /// The synthetic release once the grace period since the last Down key
    /// event has run out.
    pub fn expire_soft_drop(&mut self, now: Instant) -> Option<Intent> {
        let deadline = self.soft_drop_deadline?;
        if now < deadline {
            return None;
        }
        self.soft_drop_deadline = None;
        Some(Intent::SoftDropHeld(false))
    }
}

impl InputSource for KeyboardInput {
    fn poll_intents(&mut self) -> AppResult<Vec<Intent>> {
        let mut intents = Vec::new();
        let mut timeout = POLL_TIMEOUT;

        while event::poll(timeout)? {
            timeout = Duration::ZERO;

            if let Event::Key(key) = event::read()? {
                trace!("Key event: {key:?}");

                if let Some(intent) = map_key(key) {
                    if intent == Intent::SoftDropHeld(true) {
                        self.note_soft_drop_key(Instant::now());
                    }
                    intents.push(intent);
                }
            }
        }

        intents.extend(self.expire_soft_drop(Instant::now()));

        Ok(intents)
    }
}

/// Maps a key event to an intent. Releases only matter for the soft-drop key.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<Intent> {
    let pressed = key.kind != KeyEventKind::Release;

    match key.code {
        KeyCode::Down | KeyCode::Char('s') => Some(Intent::SoftDropHeld(pressed)),
        _ if !pressed => None,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Intent::Quit),
        KeyCode::Left | KeyCode::Char('a') => Some(Intent::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') => Some(Intent::MoveRight),
        KeyCode::Up | KeyCode::Char('w' | ' ') => Some(Intent::RotateCw),
        KeyCode::Char('q') | KeyCode::Esc => Some(Intent::Quit),
        _ => None,
    }
}
