// In: src/lib.rs

//! Battle Turn Order
//!
//! The turn-resolution core of a monster-battle game: stat-stage tables,
//! a priority-ordered speed modifier chain fed by ability, item, side and
//! status evaluators, and a deterministic turn-order resolver.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod config;
pub mod errors;
pub mod scenario;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{
    AbilityId, ItemId, SideCondition, StatFamily, StatType, StatusCondition, Terrain, Weather,
};

// --- From this crate's modules (`src/`) ---

// Turn ordering.
pub use battle::speed::{EvaluatorKind, SpeedEvaluator, SpeedModifierChain};
pub use battle::turn_order::{RankedAction, TieBreakPolicy, TurnOrderResolver};

// Battle snapshot types.
pub use battle::handlers::{SpeedContext, SpeedHandler, SpeedHandlers};
pub use battle::state::{
    Action, ActionKind, BattleContext, BattleSide, Battler, BattlerId, FieldState, TurnRng,
};
pub use battle::stats::{apply_stage, parse_stat_family, stage_factor};

pub use config::BattleRules;
pub use scenario::TurnScenario;

// Crate-specific error and result types.
pub use errors::{BattleError, BattleResult, ConfigError, ConfigResult, ErrorKind};
