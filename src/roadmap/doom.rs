// Doom level - the user's chosen severity for a simulation

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::constants::{DEFAULT_DOOM_LEVEL, MAX_DOOM_LEVEL, MIN_DOOM_LEVEL};

/// Severity/cynicism requested for a roadmap, always within 1..=10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct DoomLevel(u8);

impl DoomLevel {
    /// Build a doom level, returning `None` outside 1..=10
    pub fn new(level: i64) -> Option<Self> {
        if (MIN_DOOM_LEVEL as i64..=MAX_DOOM_LEVEL as i64).contains(&level) {
            Some(Self(level as u8))
        } else {
            None
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Label shown next to the slider
    pub fn label(self) -> &'static str {
        match self.0 {
            0..=3 => "Annoying Flop",
            4..=7 => "Financial Ruin",
            _ => "Federal Indictment",
        }
    }
}

impl Default for DoomLevel {
    fn default() -> Self {
        Self(DEFAULT_DOOM_LEVEL)
    }
}

impl TryFrom<i64> for DoomLevel {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| {
            format!(
                "doom level must be between {} and {}, got {}",
                MIN_DOOM_LEVEL, MAX_DOOM_LEVEL, value
            )
        })
    }
}

impl From<DoomLevel> for u8 {
    fn from(level: DoomLevel) -> Self {
        level.0
    }
}

impl fmt::Display for DoomLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(DoomLevel::new(0).is_none());
        assert!(DoomLevel::new(11).is_none());
        assert!(DoomLevel::new(-3).is_none());
        assert_eq!(DoomLevel::new(1).unwrap().get(), 1);
        assert_eq!(DoomLevel::new(10).unwrap().get(), 10);
    }

    #[test]
    fn test_default_is_five() {
        assert_eq!(DoomLevel::default().get(), 5);
    }

    #[test]
    fn test_labels() {
        assert_eq!(DoomLevel::new(3).unwrap().label(), "Annoying Flop");
        assert_eq!(DoomLevel::new(4).unwrap().label(), "Financial Ruin");
        assert_eq!(DoomLevel::new(7).unwrap().label(), "Financial Ruin");
        assert_eq!(DoomLevel::new(8).unwrap().label(), "Federal Indictment");
    }

    #[test]
    fn test_display_is_zero_padded() {
        assert_eq!(DoomLevel::new(5).unwrap().to_string(), "05");
    }

    #[test]
    fn test_deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<DoomLevel>("12").is_err());
        let level: DoomLevel = serde_json::from_str("8").unwrap();
        assert_eq!(level.get(), 8);
    }
}
