use crossterm::event::{KeyCode, KeyEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    Quit,
    ToggleHelp,
    CloseOverlay,
    NextFocus,
    MoveUp,
    MoveDown,
    Activate,
    Draw,
    Restart,
    Grid(usize),
    Hand(usize),
}

pub fn map_key(key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Esc => InputAction::CloseOverlay,
        KeyCode::Tab | KeyCode::BackTab => InputAction::NextFocus,
        KeyCode::Up => InputAction::MoveUp,
        KeyCode::Down => InputAction::MoveDown,
        KeyCode::Enter => InputAction::Activate,
        KeyCode::F(n @ 1..=5) => InputAction::Hand(usize::from(n) - 1),
        KeyCode::Char('q') => InputAction::Quit,
        KeyCode::Char('?') => InputAction::ToggleHelp,
        KeyCode::Char(' ') => InputAction::Activate,
        KeyCode::Char('k') => InputAction::MoveUp,
        KeyCode::Char('j') => InputAction::MoveDown,
        KeyCode::Char('d') => InputAction::Draw,
        KeyCode::Char('r') | KeyCode::Char('n') => InputAction::Restart,
        KeyCode::Char(ch) if ch.is_ascii_digit() => {
            InputAction::Grid(ch.to_digit(10).map(|d| d as usize).unwrap_or(0))
        }
        _ => InputAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn maps_basic_actions() {
        assert_eq!(map_key(key(KeyCode::Char('d'))), InputAction::Draw);
        assert_eq!(map_key(key(KeyCode::Char('r'))), InputAction::Restart);
        assert_eq!(map_key(key(KeyCode::Char('q'))), InputAction::Quit);
        assert_eq!(map_key(key(KeyCode::Enter)), InputAction::Activate);
        assert_eq!(map_key(key(KeyCode::Char('x'))), InputAction::None);
    }

    #[test]
    fn maps_slot_shortcuts() {
        assert_eq!(map_key(key(KeyCode::Char('0'))), InputAction::Grid(0));
        assert_eq!(map_key(key(KeyCode::Char('9'))), InputAction::Grid(9));
        assert_eq!(map_key(key(KeyCode::F(1))), InputAction::Hand(0));
        assert_eq!(map_key(key(KeyCode::F(5))), InputAction::Hand(4));
        assert_eq!(map_key(key(KeyCode::F(6))), InputAction::None);
    }
}
