//! Countdown timer for the focus widget.
//!
//! Like every timer in this crate it is a wall-clock state machine with no
//! internal thread: the caller invokes `tick()` whenever it wants progress,
//! and elapsed time is computed from epoch deltas. That also lets the CLI
//! persist the timer between invocations and pick up where it left off.
//!
//! ```text
//! Idle -> Running <-> Paused
//!            |
//!            v
//!         Finished -> (start) Running
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::preset::Preset;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Finished,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusTimer {
    preset: Preset,
    state: TimerState,
    /// Remaining time in milliseconds.
    remaining_ms: u64,
    /// Epoch milliseconds of the last start/resume/tick while running.
    #[serde(default)]
    last_tick_epoch_ms: Option<u64>,
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new(Preset::default())
    }
}

impl FocusTimer {
    pub fn new(preset: Preset) -> Self {
        Self {
            preset,
            state: TimerState::Idle,
            remaining_ms: preset.duration_ms(),
            last_tick_epoch_ms: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn preset(&self) -> Preset {
        self.preset
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn total_ms(&self) -> u64 {
        self.preset.duration_ms()
    }

    /// 0.0 .. 1.0 share of the countdown already elapsed.
    pub fn progress(&self) -> f64 {
        let total = self.total_ms();
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_ms as f64 / total as f64)
    }

    /// Remaining time as `MM:SS`, rounding partial seconds up.
    pub fn format_remaining(&self) -> String {
        let secs = self.remaining_ms.div_ceil(1000);
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            preset: self.preset,
            remaining_ms: self.remaining_ms,
            total_ms: self.total_ms(),
            progress_pct: self.progress() * 100.0,
            display: self.format_remaining(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        self.start_at(now_ms())
    }

    pub fn start_at(&mut self, now: u64) -> Option<Event> {
        match self.state {
            TimerState::Running => None,
            TimerState::Paused => {
                self.state = TimerState::Running;
                self.last_tick_epoch_ms = Some(now);
                Some(Event::TimerResumed {
                    remaining_ms: self.remaining_ms,
                    at: Utc::now(),
                })
            }
            TimerState::Idle | TimerState::Finished => {
                if self.state == TimerState::Finished || self.remaining_ms == 0 {
                    self.remaining_ms = self.total_ms();
                }
                self.state = TimerState::Running;
                self.last_tick_epoch_ms = Some(now);
                Some(Event::TimerStarted {
                    preset: self.preset,
                    duration_secs: self.remaining_ms / 1000,
                    at: Utc::now(),
                })
            }
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.pause_at(now_ms())
    }

    pub fn pause_at(&mut self, now: u64) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.flush_elapsed(now);
        self.state = TimerState::Paused;
        self.last_tick_epoch_ms = None;
        Some(Event::TimerPaused {
            remaining_ms: self.remaining_ms,
            at: Utc::now(),
        })
    }

    /// Start if stopped, pause if running.
    pub fn toggle(&mut self) -> Option<Event> {
        if self.state == TimerState::Running {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Stop and reload the current preset's full length.
    pub fn reset(&mut self) -> Option<Event> {
        self.state = TimerState::Idle;
        self.last_tick_epoch_ms = None;
        self.remaining_ms = self.total_ms();
        Some(Event::TimerReset { at: Utc::now() })
    }

    /// Switch preset. Always stops the countdown.
    pub fn set_preset(&mut self, preset: Preset) -> Option<Event> {
        self.preset = preset;
        self.reset();
        Some(Event::PresetChanged {
            preset,
            at: Utc::now(),
        })
    }

    pub fn tick(&mut self) -> Option<Event> {
        self.tick_at(now_ms())
    }

    /// Returns `Some(Event::TimerFinished)` exactly once, on the tick that
    /// brings the countdown to zero.
    pub fn tick_at(&mut self, now: u64) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.flush_elapsed(now);
        if self.remaining_ms > 0 {
            return None;
        }
        self.state = TimerState::Finished;
        self.last_tick_epoch_ms = None;
        tracing::info!(preset = ?self.preset.kind, "timer finished");
        Some(Event::TimerFinished {
            preset: self.preset,
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn flush_elapsed(&mut self, now: u64) {
        if let Some(last) = self.last_tick_epoch_ms {
            let elapsed = now.saturating_sub(last);
            self.remaining_ms = self.remaining_ms.saturating_sub(elapsed);
            self.last_tick_epoch_ms = Some(now);
        }
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::PresetKind;

    const T0: u64 = 1_700_000_000_000;

    fn five_minute() -> FocusTimer {
        FocusTimer::new(Preset::new(PresetKind::Break, 5))
    }

    #[test]
    fn start_pause_resume() {
        let mut timer = five_minute();
        assert!(matches!(timer.start_at(T0), Some(Event::TimerStarted { duration_secs: 300, .. })));
        assert_eq!(timer.state(), TimerState::Running);
        assert!(timer.start_at(T0).is_none());

        timer.pause_at(T0 + 60_000);
        assert_eq!(timer.state(), TimerState::Paused);
        assert_eq!(timer.remaining_ms(), 240_000);

        assert!(matches!(timer.start_at(T0 + 600_000), Some(Event::TimerResumed { .. })));
        timer.tick_at(T0 + 660_000);
        assert_eq!(timer.remaining_ms(), 180_000);
    }

    #[test]
    fn finishes_once() {
        let mut timer = five_minute();
        timer.start_at(T0);
        assert!(timer.tick_at(T0 + 299_000).is_none());
        assert_eq!(timer.format_remaining(), "00:01");
        assert!(matches!(timer.tick_at(T0 + 301_000), Some(Event::TimerFinished { .. })));
        assert_eq!(timer.state(), TimerState::Finished);
        assert!(timer.tick_at(T0 + 400_000).is_none());
        assert_eq!(timer.progress(), 1.0);
    }

    #[test]
    fn restart_after_finish_reloads() {
        let mut timer = five_minute();
        timer.start_at(T0);
        timer.tick_at(T0 + 1_000_000);
        timer.start_at(T0 + 2_000_000);
        assert_eq!(timer.remaining_ms(), 300_000);
        assert_eq!(timer.state(), TimerState::Running);
    }

    #[test]
    fn reset_and_preset_change_stop_the_clock() {
        let mut timer = FocusTimer::default();
        timer.start_at(T0);
        timer.tick_at(T0 + 10_000);
        timer.reset();
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.format_remaining(), "25:00");

        timer.start_at(T0);
        timer.set_preset(Preset::new(PresetKind::DeepWork, 45));
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.remaining_ms(), 45 * 60 * 1000);
        assert_eq!(timer.progress(), 0.0);
    }

    #[test]
    fn survives_serialization_while_running() {
        let mut timer = five_minute();
        timer.start_at(T0);
        let json = serde_json::to_string(&timer).unwrap();
        let mut restored: FocusTimer = serde_json::from_str(&json).unwrap();
        restored.tick_at(T0 + 30_000);
        assert_eq!(restored.remaining_ms(), 270_000);
    }
}
