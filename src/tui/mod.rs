mod controller;
mod state;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::time::interval;

pub use controller::AppController;
pub use state::{App, FocusArea};

pub async fn run(mut app: App) -> Result<()> {
    app.bootstrap();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let mut reader = EventStream::new();
    let mut ticker = interval(Duration::from_millis(200));

    loop {
        terminal.draw(|frame| ui::draw(frame, &mut app))?;

        tokio::select! {
            _ = ticker.tick() => {},
            maybe_event = reader.next() => {
                if let Some(Ok(event)) = maybe_event {
                    handle_event(&mut app, event);
                }
            }
            Some(message) = app.msg_rx.recv() => {
                app.handle_message(message);
            }
        }

        if app.should_quit {
            break;
        }
    }

    terminal.show_cursor()?;
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    Ok(())
}

fn handle_event(app: &mut App, event: Event) {
    if let Event::Key(key_event) = event {
        if key_event.kind == KeyEventKind::Press {
            handle_key_event(app, key_event);
        }
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') if app.focus != FocusArea::Search => {
            app.should_quit = true;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_filters();
        }
        KeyCode::Esc if app.focus == FocusArea::Search => {
            app.search_input.clear();
        }
        KeyCode::Tab => app.next_focus(),
        KeyCode::BackTab => app.previous_focus(),
        _ => match app.focus {
            FocusArea::Search => handle_search_keys(app, key),
            FocusArea::Genre | FocusArea::Country | FocusArea::Status => {
                handle_filter_keys(app, key)
            }
            FocusArea::Results => handle_results_keys(app, key),
            FocusArea::Logs => {}
        },
    }
}

fn handle_search_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_search(),
        KeyCode::Backspace => {
            app.search_input.pop();
        }
        KeyCode::Char(ch) => {
            if !key.modifiers.contains(KeyModifiers::ALT)
                && !key.modifiers.contains(KeyModifiers::CONTROL)
            {
                app.search_input.push(ch);
            }
        }
        _ => {}
    }
}

fn handle_filter_keys(app: &mut App, key: KeyEvent) {
    let focus = app.focus;
    match key.code {
        KeyCode::Left | KeyCode::Up => app.cycle_filter(focus, -1),
        KeyCode::Right | KeyCode::Down | KeyCode::Enter => app.cycle_filter(focus, 1),
        _ => {}
    }
}

fn handle_results_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up => app.move_result_selection(-1),
        KeyCode::Down => app.move_result_selection(1),
        _ => {}
    }
}
