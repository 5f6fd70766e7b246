//! Special-quality and special-attack tags.
//!
//! Catalog data writes tags as strings whose first word names the ability and
//! whose remainder is a free-form parameter ("jet 200ft"). Parsing happens at
//! catalog load, so unknown abilities are rejected there instead of leaking
//! into rendered text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpecialKind {
    BreathWeapon,
    Burn,
    Constrict,
    Drench,
    EarthGlide,
    Ferocity,
    Grab,
    InkCloud,
    Jet,
    Poison,
    Pounce,
    Rake,
    Rend,
    Roar,
    Spikes,
    Trample,
    Trip,
    Vortex,
    WaterBreathing,
    Web,
    Whirlwind,
}

impl SpecialKind {
    pub const ALL: [SpecialKind; 21] = [
        Self::BreathWeapon,
        Self::Burn,
        Self::Constrict,
        Self::Drench,
        Self::EarthGlide,
        Self::Ferocity,
        Self::Grab,
        Self::InkCloud,
        Self::Jet,
        Self::Poison,
        Self::Pounce,
        Self::Rake,
        Self::Rend,
        Self::Roar,
        Self::Spikes,
        Self::Trample,
        Self::Trip,
        Self::Vortex,
        Self::WaterBreathing,
        Self::Web,
        Self::Whirlwind,
    ];

    /// Token used in catalog data.
    pub fn key(self) -> &'static str {
        match self {
            Self::BreathWeapon => "breathWeapon",
            Self::Burn => "burn",
            Self::Constrict => "constrict",
            Self::Drench => "drench",
            Self::EarthGlide => "earthGlide",
            Self::Ferocity => "ferocity",
            Self::Grab => "grab",
            Self::InkCloud => "inkCloud",
            Self::Jet => "jet",
            Self::Poison => "poison",
            Self::Pounce => "pounce",
            Self::Rake => "rake",
            Self::Rend => "rend",
            Self::Roar => "roar",
            Self::Spikes => "spikes",
            Self::Trample => "trample",
            Self::Trip => "trip",
            Self::Vortex => "vortex",
            Self::WaterBreathing => "waterBreathing",
            Self::Web => "web",
            Self::Whirlwind => "whirlwind",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::BreathWeapon => "Breath Weapon",
            Self::Burn => "Burn",
            Self::Constrict => "Constrict",
            Self::Drench => "Drench",
            Self::EarthGlide => "Earth Glide",
            Self::Ferocity => "Ferocity",
            Self::Grab => "Grab",
            Self::InkCloud => "Ink Cloud",
            Self::Jet => "Jet",
            Self::Poison => "Poison",
            Self::Pounce => "Pounce",
            Self::Rake => "Rake",
            Self::Rend => "Rend",
            Self::Roar => "Roar",
            Self::Spikes => "Spikes",
            Self::Trample => "Trample",
            Self::Trip => "Trip",
            Self::Vortex => "Vortex",
            Self::WaterBreathing => "Water Breathing",
            Self::Web => "Web",
            Self::Whirlwind => "Whirlwind",
        }
    }
}

impl FromStr for SpecialKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::parse(format!("Unknown special ability: {}", s)))
    }
}

/// A special tag: the ability plus an optional parameter ("200ft").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SpecialTag {
    pub kind: SpecialKind,
    pub detail: Option<String>,
}

impl SpecialTag {
    pub fn new(kind: SpecialKind) -> Self {
        Self { kind, detail: None }
    }

    pub fn with_detail(kind: SpecialKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: Some(detail.into()),
        }
    }

    /// The tag as catalog data writes it: key, then the parameter.
    pub fn catalog_text(&self) -> String {
        match &self.detail {
            Some(detail) => format!("{} {}", self.kind.key(), detail),
            None => self.kind.key().to_string(),
        }
    }
}

impl FromStr for SpecialTag {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // Only the first word identifies the ability
        let (head, rest) = match trimmed.split_once(' ') {
            Some((head, rest)) => (head, Some(rest.trim())),
            None => (trimmed, None),
        };
        let kind = head.parse::<SpecialKind>()?;
        Ok(Self {
            kind,
            detail: rest.filter(|r| !r.is_empty()).map(str::to_string),
        })
    }
}

impl TryFrom<String> for SpecialTag {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SpecialTag> for String {
    fn from(tag: SpecialTag) -> Self {
        tag.catalog_text()
    }
}

impl fmt::Display for SpecialTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{} {}", self.kind.display_name(), detail),
            None => write!(f, "{}", self.kind.display_name()),
        }
    }
}
