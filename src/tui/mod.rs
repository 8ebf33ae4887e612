//! TUI module
//!
//! Terminal user interface for browsing OpenStack resources, built with
//! ratatui. The event loop is the single writer of the display: key
//! handlers mutate it directly, and everything produced off the loop (fetch
//! results, detail renders, status ticks) arrives as a `UiEvent` on one
//! channel and is applied here.

mod app;
pub mod binder;
pub mod commands;
pub mod constants;
pub mod describe;
pub mod display;
pub mod keybindings;
pub mod registry;
pub mod ssh;
mod theme;
pub mod ticker;
pub mod views;

pub use app::*;
pub use theme::*;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use crate::tui::constants::{EVENT_POLL_MS, UI_EVENT_CHANNEL_CAPACITY};
use crate::tui::ticker::StatusTicker;

type Term = Terminal<CrosstermBackend<Stdout>>;

fn enter_terminal() -> Result<Term> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

fn leave_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Giving the terminal away to a child process and taking it back
trait TerminalHandoff {
    fn suspend(&mut self) -> Result<()>;
    fn resume(&mut self) -> Result<()>;
}

impl TerminalHandoff for Term {
    fn suspend(&mut self) -> Result<()> {
        leave_terminal(self)
    }

    fn resume(&mut self) -> Result<()> {
        enable_raw_mode()?;
        execute!(self.backend_mut(), EnterAlternateScreen)?;
        self.clear()?;
        Ok(())
    }
}

/// Hand the terminal to an SSH session and take it back afterwards
///
/// Failing to hand the terminal over is reported as a notice; only failing
/// to take it back ends the UI.
async fn run_ssh(terminal: &mut impl TerminalHandoff, job: Job) -> Result<UiEvent> {
    if let Err(e) = terminal.suspend() {
        tracing::warn!("Could not suspend the UI for ssh: {:#}", e);
        terminal.resume()?;
        return Ok(UiEvent::Notice {
            text: format!("ssh not started: {}", e),
            is_error: true,
        });
    }
    let event = job.run().await;
    terminal.resume()?;
    Ok(event)
}

/// Run the TUI application until the user quits
pub async fn run_tui(mut app: App) -> Result<()> {
    tracing::debug!("Initializing TUI");

    let mut terminal = enter_terminal()?;
    let (tx, mut rx) = mpsc::channel::<UiEvent>(UI_EVENT_CHANNEL_CAPACITY);
    let ticker = StatusTicker::spawn(app.context(), tx.clone(), app.tick_interval());

    let start = app.start_view();
    app.activate_view(start);

    tracing::debug!("TUI initialized, entering main loop");
    let result = event_loop(&mut terminal, &mut app, &tx, &mut rx).await;

    tracing::debug!("TUI shutting down");
    ticker.shutdown().await;
    leave_terminal(&mut terminal)?;

    result
}

async fn event_loop(
    terminal: &mut Term,
    app: &mut App,
    tx: &mpsc::Sender<UiEvent>,
    rx: &mut mpsc::Receiver<UiEvent>,
) -> Result<()> {
    loop {
        app.display.expire_notice(Instant::now());
        terminal.draw(|f| app.render(f))?;

        for job in app.take_jobs() {
            if let Job::Ssh(_) = job {
                let event = run_ssh(terminal, job).await?;
                app.apply_event(event);
                continue;
            }
            let tx = tx.clone();
            tokio::spawn(async move {
                let event = job.run().await;
                if tx.send(event).await.is_err() {
                    tracing::debug!("UI channel closed before a job finished");
                }
            });
        }

        // Handle input events (non-blocking)
        if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key) == Some(true) {
                    return Ok(());
                }
            }
        }

        // Apply everything that arrived while we waited
        while let Ok(event) = rx.try_recv() {
            app.apply_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::ssh::SshTarget;

    #[derive(Default)]
    struct StuckTerminal {
        resumed: bool,
    }

    impl TerminalHandoff for StuckTerminal {
        fn suspend(&mut self) -> Result<()> {
            anyhow::bail!("raw mode busy")
        }

        fn resume(&mut self) -> Result<()> {
            self.resumed = true;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_failed_suspend_becomes_notice() {
        let mut terminal = StuckTerminal::default();
        let job = Job::Ssh(SshTarget {
            server_name: "web-01".to_string(),
            user: "cloud-user".to_string(),
            host: "10.0.0.11".to_string(),
            identity_file: None,
            extra_args: Vec::new(),
        });

        match run_ssh(&mut terminal, job).await {
            Ok(UiEvent::Notice { text, is_error }) => {
                assert!(is_error);
                assert_eq!(text, "ssh not started: raw mode busy");
            }
            other => panic!("expected an error notice, got {:?}", other),
        }
        assert!(terminal.resumed);
    }
}
