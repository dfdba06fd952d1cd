//! The terminal event loop.
//!
//! Owns the crossterm session: raw mode and the alternate screen are set up
//! on entry and restored on exit, including when drawing fails or the UI
//! panics.  Between
//! frames the loop feeds key presses and finished [`Task`](super::tasks::Task)s
//! into the [`App`].

use crate::traits::CommandRunner;
use crate::tui::app::App;
use crate::tui::tasks::{self, AppEvent};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use log::{debug, info};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use std::io;
use std::panic;
use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

/// How long to wait for input before running housekeeping.
const TICK: Duration = Duration::from_millis(200);

/// Take over the terminal and run `app` until the user quits.
pub fn run<R: CommandRunner + 'static>(app: App, runner: Arc<R>) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = stdout.execute(EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e);
    }
    install_panic_hook();

    let result = Terminal::new(CrosstermBackend::new(stdout)).and_then(|mut terminal| {
        let result = event_loop(&mut terminal, app, runner);
        let _ = terminal.show_cursor();
        result
    });

    let restored = restore();
    result.and(restored)
}

/// Leave raw mode and the alternate screen.
fn restore() -> io::Result<()> {
    restore_with(disable_raw_mode, || {
        io::stdout().execute(LeaveAlternateScreen).map(|_| ())
    })
}

/// Run both restore steps, reporting the first failure.
fn restore_with(
    disable_raw: impl FnOnce() -> io::Result<()>,
    leave_screen: impl FnOnce() -> io::Result<()>,
) -> io::Result<()> {
    let raw = disable_raw();
    let screen = leave_screen();
    raw.and(screen)
}

/// Put the terminal back before the default hook prints the panic.
fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore();
        previous(info);
    }));
}

fn event_loop<B: Backend, R: CommandRunner + 'static>(
    terminal: &mut Terminal<B>,
    mut app: App,
    runner: Arc<R>,
) -> io::Result<()> {
    let (tx, rx) = mpsc::channel::<AppEvent>();
    for task in app.start(Instant::now()) {
        tasks::spawn(task, Arc::clone(&runner), tx.clone());
    }
    info!("event loop running");

    loop {
        terminal.draw(|frame| app.render(frame))?;

        let mut pending = Vec::new();
        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                // Release/repeat events only arrive with the kitty protocol.
                if key.kind == KeyEventKind::Press {
                    pending.extend(app.handle_key(key));
                }
            }
        }
        if app.should_quit() {
            break;
        }

        let now = Instant::now();
        for event in rx.try_iter() {
            debug!("event {:?}", event);
            app.handle_event(event);
        }
        pending.extend(app.tick(now));

        for task in pending {
            tasks::spawn(task, Arc::clone(&runner), tx.clone());
        }
    }

    info!("event loop finished");
    Ok(())
}
