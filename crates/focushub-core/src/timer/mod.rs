mod engine;
mod preset;

pub use engine::{FocusTimer, TimerState};
pub use preset::{Preset, PresetKind, TimerMode};
