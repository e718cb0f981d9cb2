use crate::gesture::PointerEvent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Represents the result of handling a key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Quit the application
    Quit,
    /// Go back one screen (quits at the root)
    Back,
    /// Move highlight / scroll up
    Up,
    /// Move highlight / scroll down
    Down,
    PageUp,
    PageDown,
    /// Open the highlighted row immediately
    Select,
    /// Swipe the highlighted row
    Swipe,
    /// Switch to the next entity list
    NextEntity,
    /// Switch to the previous entity list
    PreviousEntity,
    /// Type a character into the search box
    Input(char),
    /// Delete the last search character
    DeleteChar,
    /// Clear the search box
    ClearQuery,
    /// Toggle help overlay
    Help,
    /// No action
    None,
}

/// Maps keyboard events to actions
pub fn handle_key_event(key: KeyEvent) -> KeyAction {
    match (key.code, key.modifiers) {
        // Quit: Ctrl+C
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::Quit,

        // Clear search: Ctrl+U
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => KeyAction::ClearQuery,

        (KeyCode::Esc, _) => KeyAction::Back,
        (KeyCode::F(1), _) => KeyAction::Help,

        // Navigation
        (KeyCode::Up, _) => KeyAction::Up,
        (KeyCode::Down, _) => KeyAction::Down,
        (KeyCode::PageUp, _) => KeyAction::PageUp,
        (KeyCode::PageDown, _) => KeyAction::PageDown,

        // Selection
        (KeyCode::Enter, _) => KeyAction::Select,
        (KeyCode::Right, _) => KeyAction::Swipe,

        // Entity lists
        (KeyCode::Tab, KeyModifiers::NONE) => KeyAction::NextEntity,
        (KeyCode::BackTab, _) => KeyAction::PreviousEntity,

        // Search box
        (KeyCode::Backspace, _) => KeyAction::DeleteChar,
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            KeyAction::Input(c)
        }

        _ => KeyAction::None,
    }
}

/// Maps left-button mouse events to pointer events; others are ignored
pub fn handle_mouse_event(event: MouseEvent) -> Option<PointerEvent> {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(PointerEvent::Down {
            column: event.column,
            row: event.row,
        }),
        MouseEventKind::Drag(MouseButton::Left) => Some(PointerEvent::Drag {
            column: event.column,
        }),
        MouseEventKind::Up(MouseButton::Left) => Some(PointerEvent::Up),
        _ => None,
    }
}
