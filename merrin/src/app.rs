//! App state and main loop: input handling, collecting snapshots, and drawing.

use std::{
    io,
    time::{Duration, Instant},
};

use anyhow::Context;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use merrin_metrics::{Collector, Snapshot};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::time::sleep;
use tracing::{debug, info};

use crate::config::Thresholds;
use crate::ui::dashboard::draw_dashboard;

// How often keys are checked while waiting for the next refresh
const INPUT_TICK: Duration = Duration::from_millis(50);

pub struct App {
    collector: Collector,
    thresholds: Thresholds,
    refresh: Duration,
    last_snapshot: Option<Snapshot>,
    should_quit: bool,
}

/// Restores the terminal however the loop ends (quit key, error, or the
/// future being dropped on Ctrl-C).
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        Ok(TerminalGuard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen, crossterm::cursor::Show);
    }
}

impl App {
    pub fn new(collector: Collector, thresholds: Thresholds, refresh: Duration) -> Self {
        Self {
            collector,
            thresholds,
            refresh,
            last_snapshot: None,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        let _guard = TerminalGuard::enter().context("entering dashboard mode")?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        terminal.hide_cursor()?;

        info!(
            refresh_secs = self.refresh.as_secs(),
            cpu_sample_ms = self.collector.config().cpu_sample_interval().as_millis() as u64,
            "dashboard started"
        );
        let res = self.event_loop(&mut terminal).await;
        info!("dashboard stopped");
        res
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> anyhow::Result<()> {
        // Draw the placeholder while the first CPU sample is taken
        terminal.draw(|f| draw_dashboard(f, f.area(), None, &self.thresholds))?;

        loop {
            // Collect off the async thread: the CPU probe sleeps for its interval
            let collector = self.collector.clone();
            let started = Instant::now();
            let snap = tokio::task::spawn_blocking(move || collector.collect())
                .await
                .context("collector task failed")?;
            debug!(elapsed_ms = started.elapsed().as_millis() as u64, "snapshot collected");
            self.last_snapshot = Some(snap);

            // Input queued while collecting
            self.drain_input()?;
            if self.should_quit {
                break;
            }

            // Draw
            let snap = self.last_snapshot.as_ref();
            terminal.draw(|f| draw_dashboard(f, f.area(), snap, &self.thresholds))?;

            // Tick rate: wait out the refresh interval, staying responsive to keys
            let deadline = Instant::now() + self.refresh;
            while Instant::now() < deadline {
                self.drain_input()?;
                if self.should_quit {
                    return Ok(());
                }
                sleep(INPUT_TICK.min(deadline.saturating_duration_since(Instant::now()))).await;
            }
        }

        Ok(())
    }

    fn drain_input(&mut self) -> io::Result<()> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(k) = event::read()? {
                if is_quit_key(&k) {
                    self.should_quit = true;
                }
            }
        }
        Ok(())
    }
}

/// `q`, `Q`, Esc, or Ctrl-C (raw mode delivers it as a key, not SIGINT).
pub fn is_quit_key(k: &KeyEvent) -> bool {
    if k.kind == KeyEventKind::Release {
        return false;
    }
    match k.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => k.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_keys() {
        let key = |code, mods| KeyEvent::new(code, mods);
        assert!(is_quit_key(&key(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit_key(&key(KeyCode::Char('Q'), KeyModifiers::SHIFT)));
        assert!(is_quit_key(&key(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit_key(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit_key(&key(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_quit_key(&key(KeyCode::Char('x'), KeyModifiers::NONE)));
    }
}
