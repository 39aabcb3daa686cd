use std::fmt;
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpeedLevel {
    Slow,
    #[default]
    Medium,
    Fast,
    Extreme,
}

impl SpeedLevel {
    pub const ALL: [SpeedLevel; 4] = [
        SpeedLevel::Slow,
        SpeedLevel::Medium,
        SpeedLevel::Fast,
        SpeedLevel::Extreme,
    ];

    /// Snake moves per second.
    pub fn fps(&self) -> u32 {
        match self {
            SpeedLevel::Slow => 4,
            SpeedLevel::Medium => 6,
            SpeedLevel::Fast => 10,
            SpeedLevel::Extreme => 15,
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(1000 / self.fps() as u64)
    }

    pub fn faster(&self) -> SpeedLevel {
        match self {
            SpeedLevel::Slow => SpeedLevel::Medium,
            SpeedLevel::Medium => SpeedLevel::Fast,
            SpeedLevel::Fast | SpeedLevel::Extreme => SpeedLevel::Extreme,
        }
    }

    pub fn slower(&self) -> SpeedLevel {
        match self {
            SpeedLevel::Extreme => SpeedLevel::Fast,
            SpeedLevel::Fast => SpeedLevel::Medium,
            SpeedLevel::Medium | SpeedLevel::Slow => SpeedLevel::Slow,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SpeedLevel::Slow => "Slow",
            SpeedLevel::Medium => "Medium",
            SpeedLevel::Fast => "Fast",
            SpeedLevel::Extreme => "Extreme",
        }
    }

    /// Case-insensitive lookup by [`SpeedLevel::name`].
    pub fn from_name(name: &str) -> Option<SpeedLevel> {
        Self::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for SpeedLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
