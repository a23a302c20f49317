use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    Focus,
    Break,
}

/// The three one-click timer lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetKind {
    Pomodoro,
    DeepWork,
    Break,
}

impl PresetKind {
    pub fn mode(&self) -> TimerMode {
        match self {
            PresetKind::Pomodoro | PresetKind::DeepWork => TimerMode::Focus,
            PresetKind::Break => TimerMode::Break,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PresetKind::Pomodoro => "Pomodoro",
            PresetKind::DeepWork => "Deep Work",
            PresetKind::Break => "Break",
        }
    }

    /// Stock length in minutes when the configuration does not override it.
    pub fn default_minutes(&self) -> u64 {
        match self {
            PresetKind::Pomodoro => 25,
            PresetKind::DeepWork => 45,
            PresetKind::Break => 5,
        }
    }
}

impl std::str::FromStr for PresetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "pomodoro" | "focus" => Ok(PresetKind::Pomodoro),
            "deep_work" | "deep" => Ok(PresetKind::DeepWork),
            "break" => Ok(PresetKind::Break),
            other => Err(format!("unknown preset: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub kind: PresetKind,
    /// Duration in minutes.
    pub minutes: u64,
}

impl Preset {
    pub fn new(kind: PresetKind, minutes: u64) -> Self {
        Self { kind, minutes }
    }

    pub fn mode(&self) -> TimerMode {
        self.kind.mode()
    }

    /// Duration in milliseconds, saturating on overflow.
    pub fn duration_ms(&self) -> u64 {
        self.minutes.saturating_mul(60).saturating_mul(1000)
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new(PresetKind::Pomodoro, PresetKind::Pomodoro.default_minutes())
    }
}
