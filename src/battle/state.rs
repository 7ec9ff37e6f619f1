use crate::errors::{BattleError, BattleResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use schema::{AbilityId, ItemId, SideCondition, StatType, StatusCondition, Terrain, Weather};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Identifies a battler within one battle.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct BattlerId(pub u32);

impl fmt::Display for BattlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

fn enabled() -> bool {
    true
}

fn unit_multiplier() -> i8 {
    1
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Battler {
    pub id: BattlerId,
    pub name: String,
    // Index into `BattleContext::sides`.
    pub side: usize,
    // Raw speed stat before stages and modifiers.
    pub speed: u16,

    // HashMap for stat stage modifications, value is stage (-6 to +6)
    #[serde(default)]
    pub stat_stages: HashMap<StatType, i8>,

    #[serde(default)]
    pub status: Option<StatusCondition>,
    #[serde(default)]
    pub item: Option<ItemId>,
    #[serde(default)]
    pub ability: Option<AbilityId>,

    // Cleared when the ability is removed for the rest of the battle.
    #[serde(default = "enabled")]
    pub ability_active: bool,
    // Set while something on the field negates abilities.
    #[serde(default)]
    pub ability_suppressed: bool,
    // Cleared when the item is consumed or its effect is negated.
    #[serde(default = "enabled")]
    pub item_active: bool,

    // 1 normally, 2 doubles every stage change, -1 inverts it.
    #[serde(default = "unit_multiplier")]
    pub stage_change_multiplier: i8,
}

impl Battler {
    /// Create a battler with no stages, status, item or ability.
    pub fn new(id: BattlerId, name: &str, side: usize, speed: u16) -> Self {
        Battler {
            id,
            name: name.to_string(),
            side,
            speed,
            stat_stages: HashMap::new(),
            status: None,
            item: None,
            ability: None,
            ability_active: true,
            ability_suppressed: false,
            item_active: true,
            stage_change_multiplier: 1,
        }
    }

    pub fn with_ability(mut self, ability: &str) -> Self {
        self.ability = Some(AbilityId::new(ability));
        self
    }

    pub fn with_item(mut self, item: &str) -> Self {
        self.item = Some(ItemId::new(item));
        self
    }

    pub fn with_status(mut self, status: StatusCondition) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_stat_stage(mut self, stat: StatType, stage: i8) -> Self {
        self.set_stat_stage(stat, stage);
        self
    }

    /// The ability is consulted only while active and not suppressed.
    pub fn has_working_ability(&self) -> bool {
        self.ability.is_some() && self.ability_active && !self.ability_suppressed
    }

    pub fn has_working_item(&self) -> bool {
        self.item.is_some() && self.item_active
    }

    pub fn has_ability(&self, ability: &AbilityId) -> bool {
        self.ability.as_ref() == Some(ability)
    }

    pub fn is_paralyzed(&self) -> bool {
        matches!(self.status, Some(StatusCondition::Paralysis))
    }

    // === Stat Stage Management ===

    /// Get the current stage for a stat type (0 if not set), clamped to -6..=6
    pub fn get_stat_stage(&self, stat: StatType) -> i8 {
        self.stat_stages.get(&stat).copied().unwrap_or(0).clamp(-6, 6)
    }

    /// Set the stage for a stat type (clamped to -6 to +6)
    pub fn set_stat_stage(&mut self, stat: StatType, stage: i8) {
        let clamped_stage = stage.clamp(-6, 6);
        if clamped_stage == 0 {
            self.stat_stages.remove(&stat);
        } else {
            self.stat_stages.insert(stat, clamped_stage);
        }
    }

    /// Remove all stat stage modifications
    pub fn clear_stat_stages(&mut self) {
        self.stat_stages.clear();
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct BattleSide {
    // HashMap for O(1) side condition lookup/update, value is turns_remaining
    #[serde(default)]
    pub side_conditions: HashMap<SideCondition, u8>,
}

impl BattleSide {
    pub fn new() -> Self {
        Self::default()
    }

    /// A condition counts as active only while it has turns remaining.
    pub fn has_side_condition(&self, condition: SideCondition) -> bool {
        self.side_conditions
            .get(&condition)
            .is_some_and(|turns| *turns > 0)
    }

    /// Add or update a side condition with turns remaining
    pub fn add_side_condition(&mut self, condition: SideCondition, turns_remaining: u8) {
        self.side_conditions.insert(condition, turns_remaining);
    }

    pub fn get_side_condition_turns(&self, condition: SideCondition) -> Option<u8> {
        self.side_conditions.get(&condition).copied()
    }

    /// Decrement all side condition turns and remove expired ones
    pub fn tick_side_conditions(&mut self) {
        self.side_conditions.retain(|_, turns| {
            *turns = turns.saturating_sub(1);
            *turns > 0
        });
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct FieldState {
    #[serde(default)]
    pub weather: Option<Weather>,
    #[serde(default)]
    pub terrain: Option<Terrain>,
}

/// Snapshot of everything turn ordering reads.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BattleContext {
    pub turn_number: u32,
    pub battlers: Vec<Battler>,
    pub sides: Vec<BattleSide>,
    #[serde(default)]
    pub field: FieldState,
}

impl BattleContext {
    /// Two empty sides, turn 1.
    pub fn new(battlers: Vec<Battler>) -> Self {
        Self {
            turn_number: 1,
            battlers,
            sides: vec![BattleSide::new(), BattleSide::new()],
            field: FieldState::default(),
        }
    }

    pub fn battler(&self, id: BattlerId) -> Option<&Battler> {
        self.battlers.iter().find(|battler| battler.id == id)
    }

    pub fn side_of(&self, battler: &Battler) -> BattleResult<&BattleSide> {
        self.sides.get(battler.side).ok_or(BattleError::UnknownSide {
            battler: battler.id,
            side: battler.side,
        })
    }

    /// Tick side condition counters and advance to the next turn.
    pub fn end_turn(&mut self) {
        for side in &mut self.sides {
            side.tick_side_conditions();
        }
        self.turn_number += 1;
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum ActionKind {
    UseMove { move_id: String },
    SwitchBattler { team_index: usize },
    UseItem { item: ItemId },
    Run,
}

/// A queued intent for the current turn.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Action {
    pub battler: BattlerId,
    pub priority: i8,
    pub kind: ActionKind,
}

impl Action {
    pub const RUN_PRIORITY: i8 = 10;
    pub const SWITCH_PRIORITY: i8 = 6;
    pub const ITEM_PRIORITY: i8 = 5;

    pub fn use_move(battler: BattlerId, move_id: &str, priority: i8) -> Self {
        Self {
            battler,
            priority,
            kind: ActionKind::UseMove {
                move_id: move_id.to_string(),
            },
        }
    }

    pub fn switch(battler: BattlerId, team_index: usize) -> Self {
        Self {
            battler,
            priority: Self::SWITCH_PRIORITY,
            kind: ActionKind::SwitchBattler { team_index },
        }
    }

    pub fn use_item(battler: BattlerId, item: &str) -> Self {
        Self {
            battler,
            priority: Self::ITEM_PRIORITY,
            kind: ActionKind::UseItem {
                item: ItemId::new(item),
            },
        }
    }

    pub fn run(battler: BattlerId) -> Self {
        Self {
            battler,
            priority: Self::RUN_PRIORITY,
            kind: ActionKind::Run,
        }
    }
}

#[derive(Debug, Clone)]
enum RngSource {
    Seeded(StdRng),
    Scripted { outcomes: Vec<u64>, index: usize },
}

/// Per-turn random source for tie breaking. Seeded from the battle seed and
/// the turn number, so replaying a turn reproduces the same draws.
#[derive(Debug, Clone)]
pub struct TurnRng {
    source: RngSource,
}

impl TurnRng {
    pub fn for_turn(seed: u64, turn_number: u32) -> Self {
        let mixed = seed ^ u64::from(turn_number).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        Self {
            source: RngSource::Seeded(StdRng::seed_from_u64(mixed)),
        }
    }

    pub fn new_for_test(outcomes: Vec<u64>) -> Self {
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
        }
    }

    pub fn next_key(&mut self, reason: &str) -> u64 {
        let key = match &mut self.source {
            RngSource::Seeded(rng) => rng.random::<u64>(),
            RngSource::Scripted { outcomes, index } => {
                if outcomes.is_empty() {
                    0
                } else {
                    // Scripted values wrap around once exhausted.
                    let outcome = outcomes[*index % outcomes.len()];
                    *index += 1;
                    outcome
                }
            }
        };
        tracing::trace!("[RNG] Consumed {} for: {}", key, reason);
        key
    }
}
