//! Movement speeds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Flight maneuverability rating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Maneuverability {
    Clumsy,
    Poor,
    #[default]
    Average,
    Good,
    Perfect,
}

impl Maneuverability {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Clumsy => "Clumsy",
            Self::Poor => "Poor",
            Self::Average => "Average",
            Self::Good => "Good",
            Self::Perfect => "Perfect",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlySpeed {
    pub base: u16,
    #[serde(default)]
    pub maneuverability: Maneuverability,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementMode {
    Land,
    Burrow,
    Climb,
    Swim,
    Fly,
}

impl MovementMode {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Land => "Land",
            Self::Burrow => "Burrow",
            Self::Climb => "Climb",
            Self::Swim => "Swim",
            Self::Fly => "Fly",
        }
    }
}

/// Speeds by movement mode. Absent modes are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeedSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub land: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub burrow: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub climb: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swim: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fly: Option<FlySpeed>,
}

/// Upper bound per movement mode.
///
/// `None` leaves a mode uncapped; `Some(0)` removes the mode entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpeedCaps {
    pub burrow: Option<u16>,
    pub climb: Option<u16>,
    pub swim: Option<u16>,
    pub fly: Option<u16>,
}

fn cap(value: Option<u16>, limit: Option<u16>) -> Option<u16> {
    match (value, limit) {
        (Some(v), Some(limit)) => {
            let capped = v.min(limit);
            (capped > 0).then_some(capped)
        }
        (value, None) => value,
        (None, _) => None,
    }
}

impl SpeedSet {
    /// Copy with every capped mode reduced to its ceiling. Maneuverability passes through.
    pub fn capped(&self, caps: &SpeedCaps) -> SpeedSet {
        let fly = self.fly.and_then(|fly| {
            cap(Some(fly.base), caps.fly).map(|base| FlySpeed {
                base,
                maneuverability: fly.maneuverability,
            })
        });
        SpeedSet {
            land: self.land,
            burrow: cap(self.burrow, caps.burrow),
            climb: cap(self.climb, caps.climb),
            swim: cap(self.swim, caps.swim),
            fly,
        }
    }

    /// Present modes in display order with their base speed.
    pub fn modes(&self) -> Vec<(MovementMode, u16)> {
        [
            (MovementMode::Land, self.land),
            (MovementMode::Burrow, self.burrow),
            (MovementMode::Climb, self.climb),
            (MovementMode::Swim, self.swim),
            (MovementMode::Fly, self.fly.map(|f| f.base)),
        ]
        .into_iter()
        .filter_map(|(mode, speed)| speed.map(|s| (mode, s)))
        .collect()
    }
}

impl fmt::Display for FlySpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ft ({})", self.base, self.maneuverability.display_name())
    }
}
