use crate::app::{request_reply, App};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Dispatches one key event into the controller. Submissions spawn the
/// request task; everything else mutates the app in place.
pub async fn handle_key(key: KeyEvent, app: &Arc<Mutex<App>>) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    let mut guard = app.lock().await;
    match key.code {
        KeyCode::Esc => {
            guard.should_quit = true;
        }
        KeyCode::Enter => {
            if let Some(request) = guard.submit() {
                let clone = app.clone();
                tokio::spawn(async move {
                    request_reply(clone, request).await;
                });
            }
        }
        KeyCode::Up => guard.history_prev(),
        KeyCode::Down => guard.history_next(),
        KeyCode::PageUp => guard.scroll_up(),
        KeyCode::PageDown => guard.scroll_down(),
        KeyCode::Backspace => guard.backspace(),
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match c {
                    'c' => guard.should_quit = true,
                    'l' => guard.clear_chat(),
                    'u' => guard.scroll_up(),
                    'd' => guard.scroll_down(),
                    _ => {}
                }
            } else {
                guard.push_char(c);
            }
        }
        _ => {}
    }
}
