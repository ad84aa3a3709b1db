//! Keyboard and mouse handling for the feed view.

use crate::ui::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use greenroom_core::feed::FeedFilter;

const MOUSE_SCROLL_ROWS: f64 = 3.0;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Esc => {
            app.running = false;
        }
        KeyCode::Enter => {
            app.send_current_input();
        }
        KeyCode::Tab => {
            let next = match app.engine.filter() {
                FeedFilter::All => FeedFilter::HostOnly,
                FeedFilter::HostOnly => FeedFilter::All,
            };
            let effects = app.engine.set_filter(next);
            app.apply_effects(effects);
        }
        KeyCode::Up => app.scroll_by(-1.0),
        KeyCode::Down => app.scroll_by(1.0),
        KeyCode::PageUp => app.scroll_by(-(app.layout.viewport_height - 1.0).max(1.0)),
        KeyCode::PageDown => app.scroll_by((app.layout.viewport_height - 1.0).max(1.0)),
        KeyCode::Home => app.scroll_by(-app.layout.content_height()),
        KeyCode::End => app.scroll_to_bottom(),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.input.push(c);
        }
        _ => {}
    }
}

pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.scroll_by(-MOUSE_SCROLL_ROWS),
        MouseEventKind::ScrollDown => app.scroll_by(MOUSE_SCROLL_ROWS),
        _ => {}
    }
}
