use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Raise the hand and point it
    Point(Direction),
    /// Lower or raise the hand without changing where it points
    ToggleHand,
    Reset,
    Quit,
    None,
}

/// Maps keys onto the hand pose seen by the simulated camera
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Pointing - Arrow keys
            KeyCode::Up => KeyAction::Point(Direction::Up),
            KeyCode::Down => KeyAction::Point(Direction::Down),
            KeyCode::Left => KeyAction::Point(Direction::Left),
            KeyCode::Right => KeyAction::Point(Direction::Right),

            // Pointing - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Point(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Point(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Point(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Point(Direction::Right),

            KeyCode::Char(' ') => KeyAction::ToggleHand,

            // Controls
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Reset,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys() {
        let handler = InputHandler::new();

        let cases = [
            (KeyCode::Up, Direction::Up),
            (KeyCode::Down, Direction::Down),
            (KeyCode::Left, Direction::Left),
            (KeyCode::Right, Direction::Right),
        ];
        for (code, direction) in cases {
            let key = KeyEvent::new(code, KeyModifiers::NONE);
            assert_eq!(handler.handle_key_event(key), KeyAction::Point(direction));
        }
    }

    #[test]
    fn test_wasd_keys() {
        let handler = InputHandler::new();

        let w = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(w), KeyAction::Point(Direction::Up));

        let a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(a), KeyAction::Point(Direction::Left));

        let s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(s), KeyAction::Point(Direction::Down));

        let d_upper = KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT);
        assert_eq!(handler.handle_key_event(d_upper), KeyAction::Point(Direction::Right));
    }

    #[test]
    fn test_space_toggles_hand() {
        let handler = InputHandler::new();

        let space = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(space), KeyAction::ToggleHand);
    }

    #[test]
    fn test_quit_keys() {
        let handler = InputHandler::new();

        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(q), KeyAction::Quit);

        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(esc), KeyAction::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_reset_key() {
        let handler = InputHandler::new();

        let r = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(r), KeyAction::Reset);

        let r_upper = KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT);
        assert_eq!(handler.handle_key_event(r_upper), KeyAction::Reset);
    }

    #[test]
    fn test_unknown_key() {
        let handler = InputHandler::new();

        let x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(x), KeyAction::None);
    }
}
