//! Key mapping from terminal events to move commands.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::Move;

/// Decoded terminal input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Move(Move),
    Resize,
    Quit,
}

/// Map keyboard input to a move.
pub fn handle_key_event(key: KeyEvent) -> Option<Move> {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Move::Left)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Move::Right)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Move::Down)
        }
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(Move::Rotate),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Decode a raw terminal event.
///
/// Presses and terminal auto-repeats produce moves; releases and unmapped
/// keys produce nothing.
pub fn decode_event(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if should_quit(*key) {
                    Some(InputEvent::Quit)
                } else {
                    handle_key_event(*key).map(InputEvent::Move)
                }
            }
            KeyEventKind::Release => None,
        },
        Event::Resize(_, _) => Some(InputEvent::Resize),
        _ => None,
    }
}
