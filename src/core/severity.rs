use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Tier label that decides which outcome pool an event draws from.
///
/// `Mid` and `Medium` are distinct tiers with distinct pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Mid,
    Medium,
    High,
    #[serde(rename = "Round of shots")]
    RoundOfShots,
    Shot,
}

impl Severity {
    pub const ALL: [Severity; 6] = [
        Severity::Low,
        Severity::Mid,
        Severity::Medium,
        Severity::High,
        Severity::RoundOfShots,
        Severity::Shot,
    ];

    /// Wire label, as used in URLs, JSON bodies, and catalog files.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Mid => "Mid",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::RoundOfShots => "Round of shots",
            Severity::Shot => "Shot",
        }
    }

    /// Exact, case-sensitive match against the wire labels.
    pub fn parse(label: &str) -> Option<Severity> {
        Severity::ALL
            .into_iter()
            .find(|severity| severity.label() == label)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSeverity(pub String);

impl std::fmt::Display for UnknownSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown severity label: {:?}", self.0)
    }
}

impl std::error::Error for UnknownSeverity {}

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Severity::parse(value).ok_or_else(|| UnknownSeverity(value.to_string()))
    }
}
