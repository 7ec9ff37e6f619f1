use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, EnumString};

/// How a stat participates in battle stage modification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum StatFamily {
    /// Main stat, can't be raised/lowered in battle.
    Main,
    /// Main stat, can be raised/lowered in battle.
    MainBattle,
    /// Can be raised/lowered in battle, not part of the monster's stats (accuracy/evasion).
    Battle,
}

impl StatFamily {
    pub fn is_stage_eligible(self) -> bool {
        matches!(self, StatFamily::MainBattle | StatFamily::Battle)
    }
}

impl fmt::Display for StatFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            StatFamily::Main => "Main",
            StatFamily::MainBattle => "Main Battle",
            StatFamily::Battle => "Accuracy/Evasion",
        };
        write!(f, "{}", display_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum StatType {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
    Accuracy,
    Evasion,
}

impl StatType {
    pub fn family(self) -> StatFamily {
        match self {
            StatType::Hp => StatFamily::Main,
            StatType::Attack
            | StatType::Defense
            | StatType::SpecialAttack
            | StatType::SpecialDefense
            | StatType::Speed => StatFamily::MainBattle,
            StatType::Accuracy | StatType::Evasion => StatFamily::Battle,
        }
    }

    /// Short label used in battle logs.
    pub fn brief(self) -> &'static str {
        match self {
            StatType::Hp => "HP",
            StatType::Attack => "Atk",
            StatType::Defense => "Def",
            StatType::SpecialAttack => "SpAtk",
            StatType::SpecialDefense => "SpDef",
            StatType::Speed => "Spd",
            StatType::Accuracy => "Acc",
            StatType::Evasion => "Eva",
        }
    }
}

impl fmt::Display for StatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            StatType::Hp => "HP",
            StatType::Attack => "Attack",
            StatType::Defense => "Defense",
            StatType::SpecialAttack => "Special Attack",
            StatType::SpecialDefense => "Special Defense",
            StatType::Speed => "Speed",
            StatType::Accuracy => "accuracy",
            StatType::Evasion => "evasiveness",
        };
        write!(f, "{}", display_name)
    }
}
