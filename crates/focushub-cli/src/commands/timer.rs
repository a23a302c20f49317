use clap::Subcommand;
use focushub_core::{Config, Event, FocusTimer, PresetKind};

use crate::common::{open_repo, print_json, CliResult};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Print current timer state as JSON
    Status,
    /// Start or resume the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Stop and reload the full preset length
    Reset,
    /// Switch preset: pomodoro, deep_work or break
    Preset {
        kind: PresetKind,
    },
}

/// Catch up on time elapsed since the last invocation, then apply `action`.
///
/// A finish detected by the catch-up comes first, so it is reported whatever
/// the action.
fn apply(timer: &mut FocusTimer, action: TimerAction, config: &Config, now: u64) -> Vec<Event> {
    let finished = timer.tick_at(now);
    let event = match action {
        TimerAction::Status => None,
        TimerAction::Start => timer.start_at(now),
        TimerAction::Pause => timer.pause_at(now),
        TimerAction::Reset => timer.reset(),
        TimerAction::Preset { kind } => timer.set_preset(config.preset(kind)),
    };
    finished.into_iter().chain(event).collect()
}

fn now_ms() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}

pub fn run(action: TimerAction) -> CliResult {
    let config = Config::load_or_default();
    let repo = open_repo()?;
    let mut timer = repo.load_timer(config.preset(PresetKind::Pomodoro))?;

    let events = apply(&mut timer, action, &config, now_ms());
    repo.save_timer(&timer)?;

    if events.is_empty() {
        print_json(&timer.snapshot())?;
    }
    for event in &events {
        print_json(event)?;
    }
    Ok(())
}
