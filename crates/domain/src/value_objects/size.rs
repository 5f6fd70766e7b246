//! Size category value object.
//!
//! The ordered size scale used by every form, buff, and character. Index
//! arithmetic on this scale drives size stepping, armor rescaling, and the
//! size-scaled damage dice of generated attacks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Creature size, ordered from smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SizeCategory {
    #[serde(rename = "fine")]
    Fine,
    #[serde(rename = "dim")]
    Diminutive,
    #[serde(rename = "tiny")]
    Tiny,
    #[serde(rename = "sm")]
    Small,
    #[serde(rename = "med")]
    Medium,
    #[serde(rename = "lg")]
    Large,
    #[serde(rename = "huge")]
    Huge,
    #[serde(rename = "grg")]
    Gargantuan,
    #[serde(rename = "col")]
    Colossal,
}

impl SizeCategory {
    /// Every size, smallest first. Position in this array is the size index.
    pub const ALL: [SizeCategory; 9] = [
        Self::Fine,
        Self::Diminutive,
        Self::Tiny,
        Self::Small,
        Self::Medium,
        Self::Large,
        Self::Huge,
        Self::Gargantuan,
        Self::Colossal,
    ];

    /// Largest valid index on the scale.
    pub const MAX_INDEX: usize = Self::ALL.len() - 1;

    /// Position of this size on the scale (fine = 0, colossal = 8).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Size at the given index, if it exists.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Size reached by moving `steps` along the scale, clamped to the ends.
    ///
    /// Positive steps grow, negative steps shrink. Never fails.
    pub fn stepped(self, steps: i32) -> Self {
        let target = (self.index() as i64 + i64::from(steps)).clamp(0, Self::MAX_INDEX as i64);
        Self::ALL[target as usize]
    }

    /// Encumbrance multiplier applied to carrying capacity at this size.
    pub fn encumbrance_factor(self) -> f64 {
        match self {
            Self::Fine => 0.125,
            Self::Diminutive => 0.25,
            Self::Tiny => 0.5,
            Self::Small => 0.75,
            Self::Medium => 1.0,
            Self::Large => 2.0,
            Self::Huge => 4.0,
            Self::Gargantuan => 8.0,
            Self::Colossal => 16.0,
        }
    }

    /// Tiny and below wear armor at half its normal rating.
    pub fn is_tiny_or_smaller(self) -> bool {
        self <= Self::Tiny
    }

    /// Short storage key (e.g., "med", "lg").
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fine => "fine",
            Self::Diminutive => "dim",
            Self::Tiny => "tiny",
            Self::Small => "sm",
            Self::Medium => "med",
            Self::Large => "lg",
            Self::Huge => "huge",
            Self::Gargantuan => "grg",
            Self::Colossal => "col",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Fine => "Fine",
            Self::Diminutive => "Diminutive",
            Self::Tiny => "Tiny",
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
            Self::Huge => "Huge",
            Self::Gargantuan => "Gargantuan",
            Self::Colossal => "Colossal",
        }
    }
}

/// Size reached from `current` after `steps` steps, clamped to the scale.
pub fn new_size(current: SizeCategory, steps: i32) -> SizeCategory {
    current.stepped(steps)
}

impl fmt::Display for SizeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for SizeCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|size| {
                size.as_str() == lowered || size.display_name().to_lowercase() == lowered
            })
            .ok_or_else(|| DomainError::parse(format!("Unknown size category: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stepping_moves_along_the_scale() {
        assert_eq!(new_size(SizeCategory::Medium, -1), SizeCategory::Small);
        assert_eq!(new_size(SizeCategory::Medium, 1), SizeCategory::Large);
        assert_eq!(new_size(SizeCategory::Small, 0), SizeCategory::Small);
    }

    #[test]
    fn stepping_clamps_at_both_ends() {
        for size in SizeCategory::ALL {
            assert_eq!(new_size(size, 100), SizeCategory::Colossal);
            assert_eq!(new_size(size, -100), SizeCategory::Fine);
            assert_eq!(new_size(size, i32::MAX), SizeCategory::Colossal);
            assert_eq!(new_size(size, i32::MIN), SizeCategory::Fine);
        }
    }

    #[test]
    fn index_round_trips() {
        for (i, size) in SizeCategory::ALL.iter().enumerate() {
            assert_eq!(size.index(), i);
            assert_eq!(SizeCategory::from_index(i), Some(*size));
        }
        assert_eq!(SizeCategory::from_index(9), None);
    }

    #[test]
    fn tiny_threshold() {
        assert!(SizeCategory::Tiny.is_tiny_or_smaller());
        assert!(SizeCategory::Fine.is_tiny_or_smaller());
        assert!(!SizeCategory::Small.is_tiny_or_smaller());
    }

    #[test]
    fn parses_keys_and_names() {
        assert_eq!("med".parse::<SizeCategory>().ok(), Some(SizeCategory::Medium));
        assert_eq!("Huge".parse::<SizeCategory>().ok(), Some(SizeCategory::Huge));
        assert!("enormous".parse::<SizeCategory>().is_err());
    }

    #[test]
    fn serializes_as_short_key() {
        let json = serde_json::to_string(&SizeCategory::Gargantuan).unwrap();
        assert_eq!(json, "\"grg\"");
    }
}
