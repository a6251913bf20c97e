//! Keyboard input handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::runtime::App;

/// Maps a key event to an application action.
///
/// Guards on [`KeyEventKind::Press`] to avoid double-fire on some terminals.
/// While the add-device prompt is open, keys edit the prompt instead.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit = true;
        return;
    }
    if app.is_editing() {
        match key.code {
            KeyCode::Enter => app.submit_input(),
            KeyCode::Esc => app.cancel_input(),
            KeyCode::Backspace => app.pop_char(),
            KeyCode::Char(c) => app.push_char(c),
            _ => {}
        }
        return;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Up => app.nudge_voltage(1.0),
        KeyCode::Down => app.nudge_voltage(-1.0),
        KeyCode::Right => app.nudge_amperage(1.0),
        KeyCode::Left => app.nudge_amperage(-1.0),
        KeyCode::Char('a') => app.begin_input(),
        KeyCode::Tab => app.select_next(),
        KeyCode::BackTab => app.select_prev(),
        KeyCode::Char('d') | KeyCode::Delete => app.remove_selected(),
        KeyCode::Char(' ') => app.toggle_drift(),
        KeyCode::Char('+' | '=') => app.speed_up(),
        KeyCode::Char('-') => app.speed_down(),
        KeyCode::Char('1') => app.switch_preset("home"),
        KeyCode::Char('2') => app.switch_preset("heatwave"),
        KeyCode::Char('3') => app.switch_preset("ev_night"),
        KeyCode::Char('r') => app.reset(),
        _ => {}
    }
}
