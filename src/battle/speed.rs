//! Speed modifier chain.
//!
//! A chain is an ordered list of evaluators folded over a starting
//! multiplier of 1.0. The order is fixed when the chain is built: descending
//! priority, registration order among equal priorities.

use crate::battle::handlers::{SpeedContext, SpeedHandler, SpeedHandlers};
use crate::battle::state::{BattleContext, Battler};
use crate::config::BattleRules;
use crate::errors::BattleResult;
use schema::{AbilityId, SideCondition};
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
pub enum EvaluatorKind {
    /// Looks up the battler's ability in the registry.
    Ability(Arc<SpeedHandlers>),
    /// Looks up the battler's held item in the registry.
    HeldItem(Arc<SpeedHandlers>),
    Tailwind,
    Swamp,
    Paralysis { ignoring_abilities: Vec<AbilityId> },
    Custom(SpeedHandler),
}

#[derive(Clone)]
pub struct SpeedEvaluator {
    name: String,
    priority: i32,
    kind: EvaluatorKind,
}

impl SpeedEvaluator {
    pub const ABILITY_PRIORITY: i32 = 500;
    pub const HELD_ITEM_PRIORITY: i32 = 400;
    pub const TAILWIND_PRIORITY: i32 = 300;
    pub const SWAMP_PRIORITY: i32 = 200;
    pub const PARALYSIS_PRIORITY: i32 = 100;

    pub fn ability(handlers: Arc<SpeedHandlers>) -> Self {
        Self::with_kind("Ability", Self::ABILITY_PRIORITY, EvaluatorKind::Ability(handlers))
    }

    pub fn held_item(handlers: Arc<SpeedHandlers>) -> Self {
        Self::with_kind("HeldItem", Self::HELD_ITEM_PRIORITY, EvaluatorKind::HeldItem(handlers))
    }

    pub fn tailwind() -> Self {
        Self::with_kind("Tailwind", Self::TAILWIND_PRIORITY, EvaluatorKind::Tailwind)
    }

    pub fn swamp() -> Self {
        Self::with_kind("Swamp", Self::SWAMP_PRIORITY, EvaluatorKind::Swamp)
    }

    pub fn paralysis(ignoring_abilities: Vec<AbilityId>) -> Self {
        Self::with_kind(
            "Paralysis",
            Self::PARALYSIS_PRIORITY,
            EvaluatorKind::Paralysis { ignoring_abilities },
        )
    }

    pub fn custom(name: &str, priority: i32, handler: SpeedHandler) -> Self {
        Self::with_kind(name, priority, EvaluatorKind::Custom(handler))
    }

    fn with_kind(name: &str, priority: i32, kind: EvaluatorKind) -> Self {
        Self {
            name: name.to_string(),
            priority,
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn kind(&self) -> &EvaluatorKind {
        &self.kind
    }

    /// Scale `multiplier` for the battler in `ctx`. Never mutates battle state.
    pub fn apply(&self, ctx: &SpeedContext<'_>, multiplier: &mut f64) {
        let battler = ctx.battler;
        match &self.kind {
            EvaluatorKind::Ability(handlers) => {
                if !battler.has_working_ability() {
                    return;
                }
                if let Some(handler) = battler.ability.as_ref().and_then(|id| handlers.get(id.as_str())) {
                    handler(ctx, multiplier);
                }
            }
            EvaluatorKind::HeldItem(handlers) => {
                if !battler.has_working_item() {
                    return;
                }
                if let Some(handler) = battler.item.as_ref().and_then(|id| handlers.get(id.as_str())) {
                    handler(ctx, multiplier);
                }
            }
            EvaluatorKind::Tailwind => {
                if ctx.side.has_side_condition(SideCondition::Tailwind) {
                    *multiplier *= 2.0;
                }
            }
            EvaluatorKind::Swamp => {
                if ctx.side.has_side_condition(SideCondition::Swamp) {
                    *multiplier /= 2.0;
                }
            }
            EvaluatorKind::Paralysis { ignoring_abilities } => {
                if !battler.is_paralyzed() {
                    return;
                }
                // Only an ability that is actually working can shrug off the drop.
                let ignored = battler.has_working_ability()
                    && ignoring_abilities.iter().any(|ability| battler.has_ability(ability));
                if !ignored {
                    *multiplier /= 2.0;
                }
            }
            EvaluatorKind::Custom(handler) => handler(ctx, multiplier),
        }
    }
}

impl fmt::Debug for SpeedEvaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeedEvaluator")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct SpeedModifierChain {
    evaluators: Vec<SpeedEvaluator>,
}

impl SpeedModifierChain {
    /// Sort once; `sort_by` is stable, so equal priorities keep registration order.
    pub fn new(mut evaluators: Vec<SpeedEvaluator>) -> Self {
        evaluators.sort_by(|a, b| b.priority.cmp(&a.priority));
        Self { evaluators }
    }

    /// The five standard evaluators backed by the built-in handler tables.
    pub fn standard(rules: &BattleRules) -> Self {
        Self::with_handlers(
            Arc::new(SpeedHandlers::builtin_abilities()),
            Arc::new(SpeedHandlers::builtin_items()),
            rules,
        )
    }

    pub fn with_handlers(
        abilities: Arc<SpeedHandlers>,
        items: Arc<SpeedHandlers>,
        rules: &BattleRules,
    ) -> Self {
        Self::new(vec![
            SpeedEvaluator::ability(abilities),
            SpeedEvaluator::held_item(items),
            SpeedEvaluator::tailwind(),
            SpeedEvaluator::swamp(),
            SpeedEvaluator::paralysis(rules.paralysis_ignoring_abilities.clone()),
        ])
    }

    pub fn evaluators(&self) -> &[SpeedEvaluator] {
        &self.evaluators
    }

    /// Fold every evaluator over 1.0 for `battler`.
    pub fn evaluate(&self, context: &BattleContext, battler: &Battler) -> BattleResult<f64> {
        let side = context.side_of(battler)?;
        let ctx = SpeedContext {
            battler,
            side,
            field: &context.field,
        };
        Ok(self.evaluate_with(&ctx))
    }

    pub fn evaluate_with(&self, ctx: &SpeedContext<'_>) -> f64 {
        let mut multiplier = 1.0;
        for evaluator in &self.evaluators {
            let before = multiplier;
            evaluator.apply(ctx, &mut multiplier);
            if multiplier != before {
                tracing::trace!(
                    "{} speed x{} from {} (now x{})",
                    ctx.battler.name,
                    multiplier / before,
                    evaluator.name,
                    multiplier
                );
            }
        }
        multiplier
    }
}
