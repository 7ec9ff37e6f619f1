use crate::battle::state::{Action, BattleContext, Battler, BattlerId};
use crate::battle::turn_order::TurnOrderResolver;
use crate::config::BattleRules;
use crate::errors::BattleResult;
use schema::{SideCondition, StatType, StatusCondition};

/// A builder for creating test battlers with common defaults.
///
/// # Example
/// ```
/// let battler = TestBattlerBuilder::new(1, 100)
///     .with_status(StatusCondition::Paralysis)
///     .on_side(1)
///     .build();
/// ```
pub struct TestBattlerBuilder {
    battler: Battler,
}

impl TestBattlerBuilder {
    /// Creates a new builder for a battler on side 0 with the given raw speed.
    pub fn new(id: u32, speed: u16) -> Self {
        Self {
            battler: Battler::new(BattlerId(id), &format!("Battler {}", id), 0, speed),
        }
    }

    pub fn on_side(mut self, side: usize) -> Self {
        self.battler.side = side;
        self
    }

    pub fn with_speed_stage(mut self, stage: i8) -> Self {
        self.battler.set_stat_stage(StatType::Speed, stage);
        self
    }

    pub fn with_status(mut self, status: StatusCondition) -> Self {
        self.battler.status = Some(status);
        self
    }

    pub fn with_ability(mut self, ability: &str) -> Self {
        self.battler = self.battler.with_ability(ability);
        self
    }

    pub fn with_item(mut self, item: &str) -> Self {
        self.battler = self.battler.with_item(item);
        self
    }

    pub fn build(self) -> Battler {
        self.battler
    }
}

/// Creates a 1v1-style context: every battler listed, two empty sides.
pub fn create_test_context(battlers: Vec<Battler>) -> BattleContext {
    BattleContext::new(battlers)
}

pub fn with_side_condition(
    mut context: BattleContext,
    side: usize,
    condition: SideCondition,
    turns: u8,
) -> BattleContext {
    context.sides[side].add_side_condition(condition, turns);
    context
}

/// Resolver with the default rules (queue-order tie break).
pub fn default_resolver() -> TurnOrderResolver {
    TurnOrderResolver::from_rules(&BattleRules::default())
}

/// A plain priority-0 move for `battler`.
pub fn tackle(battler: u32) -> Action {
    Action::use_move(BattlerId(battler), "tackle", 0)
}

/// The battler ids in resolved order.
pub fn order_of(actions: &[Action]) -> Vec<u32> {
    actions.iter().map(|action| action.battler.0).collect()
}

/// Helper function to assert that a Result is Ok and return the value.
/// Provides clear error messages in tests when functions unexpectedly fail.
pub fn assert_ok<T>(result: BattleResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}
