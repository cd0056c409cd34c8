// src/ui.rs

use crate::app::App;
use crate::chat_view;
use crate::key_handlers;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::{mpsc, Mutex};

/// Enum for the two event sources driving the draw loop.
enum Event {
    Input(CEvent),
    Tick,
}

/// Runs the terminal UI until the user quits.
pub async fn run(app: App) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = Arc::new(Mutex::new(app));
    let res = run_app(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

/// Main loop of the application.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: Arc<Mutex<App>>,
) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::channel::<Event>(100);

    // Read terminal events off the async loop; ticks keep the spinner moving
    // while a reply is pending.
    tokio::task::spawn_blocking(move || {
        let mut last_tick = Instant::now();
        loop {
            let timeout = Duration::from_millis(100);
            if event::poll(timeout).unwrap_or(false) {
                if let Ok(event) = event::read() {
                    if tx.blocking_send(Event::Input(event)).is_err() {
                        return;
                    }
                }
            }

            if last_tick.elapsed() >= Duration::from_millis(250) {
                if tx.blocking_send(Event::Tick).is_err() {
                    return;
                }
                last_tick = Instant::now();
            }
        }
    });

    loop {
        {
            let mut guard = app.lock().await;
            terminal.draw(|f| chat_view::draw(f, &mut guard))?;
            if guard.should_quit {
                break;
            }
        }

        match rx.recv().await {
            Some(Event::Input(CEvent::Key(key))) => {
                key_handlers::handle_key(key, &app).await;
            }
            Some(Event::Input(_)) | Some(Event::Tick) => {}
            None => break,
        }
    }

    Ok(())
}
