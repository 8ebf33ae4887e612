//! Background status ticker
//!
//! Wakes on a fixed interval, builds the status line from a Context State
//! snapshot and sends it through the UI channel. It never touches the
//! display itself. Stops when signalled or when the UI side hangs up.

use chrono::{DateTime, Local};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::tui::app::{ContextState, SharedContext, UiEvent};
use crate::tui::constants::CLOCK_FORMAT;
use crate::tui::display::StatusLine;
use crate::tui::keybindings;

/// Status line for a context snapshot at `now`
pub fn status_line(context: &ContextState, now: DateTime<Local>) -> StatusLine {
    StatusLine {
        legend: keybindings::legend(context.ssh_available()),
        clock: now.format(CLOCK_FORMAT).to_string(),
        project: context.active_project.clone(),
    }
}

/// Handle to the running ticker task
pub struct StatusTicker {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl StatusTicker {
    pub fn spawn(context: SharedContext, tx: mpsc::Sender<UiEvent>, interval: Duration) -> Self {
        let (shutdown, mut shutdown_rx) = watch::channel(false);
        let period = interval.max(Duration::from_millis(1));

        let handle = tokio::spawn(async move {
            let mut ticks = tokio::time::interval(period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
            tracing::debug!("Status ticker started ({:?})", period);

            loop {
                tokio::select! {
                    _ = ticks.tick() => {
                        let status = status_line(&context.snapshot(), Local::now());
                        match tx.try_send(UiEvent::Status(status)) {
                            Ok(()) => {}
                            // The next tick carries a fresher line anyway
                            Err(mpsc::error::TrySendError::Full(_)) => {}
                            Err(mpsc::error::TrySendError::Closed(_)) => break,
                        }
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }

            tracing::debug!("Status ticker stopped");
        });

        Self { shutdown, handle }
    }

    /// Signal the task to stop and wait for it
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.handle.await {
            tracing::warn!("Status ticker ended abnormally: {}", e);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_status_line_formats_clock_and_project() {
        let now = Local.with_ymd_and_hms(2024, 5, 1, 9, 7, 3).unwrap();
        let status = status_line(&ContextState::new("prod"), now);
        assert_eq!(status.clock, "09:07:03");
        assert_eq!(status.project, "prod");
        assert!(status.legend.ends_with("(q)uit"));
    }
}
