//! Interactive terminal interface.

pub mod navigator;
pub mod view;

pub use navigator::Navigator;

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::api::DnsApiClient;

pub type Term = Terminal<CrosstermBackend<Stdout>>;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Takes over the terminal until the user quits, restoring it afterwards
/// whether or not the session ended in an error.
pub async fn run<C: DnsApiClient>(navigator: &mut Navigator<C>) -> io::Result<()> {
    let mut terminal = init_terminal()?;
    let result = event_loop(&mut terminal, navigator).await;
    restore_terminal(&mut terminal)?;
    result
}

async fn event_loop<C: DnsApiClient>(
    terminal: &mut Term,
    navigator: &mut Navigator<C>,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| view::render(frame, navigator))?;

        if navigator.should_quit() {
            return Ok(());
        }

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                navigator.handle_key(key).await;
            }
        }
    }
}

fn init_terminal() -> io::Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    enter_alternate_screen(&mut stdout, disable_raw_mode)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Switches `out` to the alternate screen, running `undo_raw_mode` if the
/// switch fails so the shell is not left in raw mode.
fn enter_alternate_screen<W, F>(out: &mut W, undo_raw_mode: F) -> io::Result<()>
where
    W: io::Write,
    F: FnOnce() -> io::Result<()>,
{
    if let Err(e) = execute!(out, EnterAlternateScreen) {
        undo_raw_mode()?;
        return Err(e);
    }
    Ok(())
}

fn restore_terminal(terminal: &mut Term) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}
