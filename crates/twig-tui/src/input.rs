use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Actions that can result from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    CursorDown,
    CursorUp,
    /// Jump cursor to top (gg).
    CursorTop,
    /// Jump cursor to bottom (G).
    CursorBottom,
    /// Toggle the directory under the cursor or open the file.
    Select,
    /// Collapse the directory under the cursor, or jump to its parent row.
    CollapseOrParent,
    /// Rebuild the tree from disk now.
    Refresh,
    Quit,
    /// No action for this key.
    None,
}

/// Tracks state for multi-key sequences like "gg".
#[derive(Debug, Default, Clone, Copy)]
pub struct InputState {
    pending_g: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self { pending_g: false }
    }
}

/// Maps a key event to an InputAction.
/// Returns the action and a new InputState (immutable pattern).
pub fn handle_key(key: KeyEvent, state: &InputState) -> (InputAction, InputState) {
    if state.pending_g {
        let new_state = InputState { pending_g: false };
        return match key.code {
            KeyCode::Char('g') => (InputAction::CursorTop, new_state),
            _ => (InputAction::None, new_state),
        };
    }

    let new_state = InputState { pending_g: false };

    let action = match key.code {
        KeyCode::Down | KeyCode::Char('j') => InputAction::CursorDown,
        KeyCode::Up | KeyCode::Char('k') => InputAction::CursorUp,
        KeyCode::Left | KeyCode::Char('h') => InputAction::CollapseOrParent,
        KeyCode::Right | KeyCode::Enter | KeyCode::Char('l') => InputAction::Select,
        KeyCode::Home => InputAction::CursorTop,
        KeyCode::End | KeyCode::Char('G') => InputAction::CursorBottom,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => InputAction::Quit,
        KeyCode::Char('g') => {
            return (InputAction::None, InputState { pending_g: true });
        }
        KeyCode::Char('r') => InputAction::Refresh,
        KeyCode::Char('q') | KeyCode::Esc => InputAction::Quit,
        _ => InputAction::None,
    };

    (action, new_state)
}
