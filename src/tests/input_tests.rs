#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::input::{HELD_KEY_GRACE, Intent, KeyboardInput, map_key};
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
    use std::time::{Duration, Instant};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(map_key(press(KeyCode::Left)), Some(Intent::MoveLeft));
        assert_eq!(map_key(press(KeyCode::Right)), Some(Intent::MoveRight));
        assert_eq!(map_key(press(KeyCode::Up)), Some(Intent::RotateCw));
        assert_eq!(
            map_key(press(KeyCode::Down)),
            Some(Intent::SoftDropHeld(true))
        );
    }

    #[test]
    fn test_letter_keys() {
        assert_eq!(map_key(press(KeyCode::Char('a'))), Some(Intent::MoveLeft));
        assert_eq!(map_key(press(KeyCode::Char('d'))), Some(Intent::MoveRight));
        assert_eq!(map_key(press(KeyCode::Char('w'))), Some(Intent::RotateCw));
        assert_eq!(map_key(press(KeyCode::Char(' '))), Some(Intent::RotateCw));
        assert_eq!(
            map_key(press(KeyCode::Char('s'))),
            Some(Intent::SoftDropHeld(true))
        );
        assert_eq!(map_key(press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_key(press(KeyCode::Char('q'))), Some(Intent::Quit));
        assert_eq!(map_key(press(KeyCode::Esc)), Some(Intent::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Intent::Quit)
        );
        assert_eq!(map_key(press(KeyCode::Char('c'))), None);
    }

    #[test]
    fn test_releases() {
        assert_eq!(
            map_key(release(KeyCode::Down)),
            Some(Intent::SoftDropHeld(false))
        );
        assert_eq!(map_key(release(KeyCode::Left)), None);
        assert_eq!(map_key(release(KeyCode::Char('q'))), None);
    }

    #[test]
    fn test_key_repeat_counts_as_press() {
        let repeat = KeyEvent::new_with_kind(KeyCode::Right, KeyModifiers::NONE, KeyEventKind::Repeat);
        assert_eq!(map_key(repeat), Some(Intent::MoveRight));
    }

    #[test]
    fn test_held_soft_drop_survives_auto_repeat() {
        let mut input = KeyboardInput::new(false);
        let start = Instant::now();
        let repeat = Duration::from_millis(33);

        input.note_soft_drop_key(start);
        assert_eq!(input.expire_soft_drop(start + HELD_KEY_GRACE / 2), None);

        // Repeated Down events keep pushing the release back
        let mut last = start;
        for step in 1..10 {
            last = start + repeat * step;
            input.note_soft_drop_key(last);
            assert_eq!(input.expire_soft_drop(last), None);
        }

        assert_eq!(
            input.expire_soft_drop(last + HELD_KEY_GRACE),
            Some(Intent::SoftDropHeld(false))
        );
        assert_eq!(input.expire_soft_drop(last + HELD_KEY_GRACE * 2), None);
    }

    #[test]
    fn test_release_events_disable_grace() {
        let mut input = KeyboardInput::new(true);
        let start = Instant::now();

        input.note_soft_drop_key(start);

        assert_eq!(input.expire_soft_drop(start + HELD_KEY_GRACE * 10), None);
    }
}
