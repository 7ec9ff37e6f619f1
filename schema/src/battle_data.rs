use serde::{Deserialize, Serialize};
use std::fmt;

/// Conditions that apply to every battler on one side of the field.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, Copy)]
pub enum SideCondition {
    Tailwind,
    Swamp,
}

impl fmt::Display for SideCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            SideCondition::Tailwind => "Tailwind",
            SideCondition::Swamp => "Swamp",
        };
        write!(f, "{}", display_name)
    }
}

/// Major status condition. At most one per battler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusCondition {
    Sleep(u8),
    Poison,
    BadPoison,
    Burn,
    Freeze,
    Paralysis,
}

impl fmt::Display for StatusCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            StatusCondition::Sleep(_) => "Sleep",
            StatusCondition::Poison => "Poison",
            StatusCondition::BadPoison => "Bad Poison",
            StatusCondition::Burn => "Burn",
            StatusCondition::Freeze => "Freeze",
            StatusCondition::Paralysis => "Paralysis",
        };
        write!(f, "{}", display_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weather {
    Sun,
    HarshSun,
    Rain,
    HeavyRain,
    Sandstorm,
    Hail,
    Snow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Electric,
    Grassy,
    Misty,
    Psychic,
}
