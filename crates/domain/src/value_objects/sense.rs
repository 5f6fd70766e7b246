//! Senses granted by a form.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of sense. Ranged kinds carry a range in feet on [`Sense`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SenseKind {
    LowLight,
    Darkvision,
    Scent,
    Blindsense,
    Blindsight,
    Tremorsense,
    SeeInDarkness,
}

impl SenseKind {
    pub fn is_ranged(self) -> bool {
        matches!(
            self,
            Self::Darkvision | Self::Blindsense | Self::Blindsight | Self::Tremorsense
        )
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::LowLight => "Low-Light Vision",
            Self::Darkvision => "Darkvision",
            Self::Scent => "Scent",
            Self::Blindsense => "Blindsense",
            Self::Blindsight => "Blindsight",
            Self::Tremorsense => "Tremorsense",
            Self::SeeInDarkness => "See in Darkness",
        }
    }
}

/// A sense and its strength (range in feet; 0 for unranged senses).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sense {
    pub kind: SenseKind,
    #[serde(default)]
    pub range: u16,
}

impl Sense {
    pub fn new(kind: SenseKind, range: u16) -> Self {
        Self { kind, range }
    }

    pub fn unranged(kind: SenseKind) -> Self {
        Self { kind, range: 0 }
    }

    /// Copy with the range reduced to at most `max`.
    pub fn clamped(self, max: u16) -> Self {
        Self {
            range: self.range.min(max),
            ..self
        }
    }
}

impl fmt::Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.is_ranged() {
            write!(f, "{} {} ft", self.kind.display_name(), self.range)
        } else {
            write!(f, "{}", self.kind.display_name())
        }
    }
}

/// Merge `incoming` senses into `base`, keeping the longer range per kind.
pub fn merge_senses(base: &[Sense], incoming: &[Sense]) -> Vec<Sense> {
    let mut merged: Vec<Sense> = base.to_vec();
    for sense in incoming {
        match merged.iter_mut().find(|s| s.kind == sense.kind) {
            Some(existing) => existing.range = existing.range.max(sense.range),
            None => merged.push(*sense),
        }
    }
    merged
}
