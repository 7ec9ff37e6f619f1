use crate::battle::speed::SpeedModifierChain;
use crate::battle::state::{Action, BattleContext, Battler, TurnRng};
use crate::battle::stats::base_speed_after_stage;
use crate::config::BattleRules;
use crate::errors::{BattleError, BattleResult};
use serde::{Deserialize, Serialize};

/// How actions that tie on both priority and effective speed are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TieBreakPolicy {
    /// Keep the order the actions were queued in.
    #[default]
    EnqueueOrder,
    /// Draw a key per action from a PRNG seeded by `seed` and the turn number.
    /// Equal keys fall back to queue order.
    Seeded { seed: u64 },
}

/// An action together with the values it was sorted by.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedAction {
    pub action: Action,
    pub effective_speed: u32,
    pub enqueue_index: usize,
    pub tie_break_key: u64,
}

#[derive(Debug, Clone)]
pub struct TurnOrderResolver {
    chain: SpeedModifierChain,
    tie_break: TieBreakPolicy,
}

impl TurnOrderResolver {
    pub fn new(chain: SpeedModifierChain, tie_break: TieBreakPolicy) -> Self {
        Self { chain, tie_break }
    }

    /// Standard chain with built-in handlers, configured from `rules`.
    pub fn from_rules(rules: &BattleRules) -> Self {
        Self::new(SpeedModifierChain::standard(rules), rules.tie_break)
    }

    pub fn chain(&self) -> &SpeedModifierChain {
        &self.chain
    }

    pub fn tie_break(&self) -> TieBreakPolicy {
        self.tie_break
    }

    /// `max(1, round(staged speed * chain multiplier))`
    pub fn effective_speed(&self, context: &BattleContext, battler: &Battler) -> BattleResult<u32> {
        let base = base_speed_after_stage(battler)?;
        let multiplier = self.chain.evaluate(context, battler)?;
        let speed = (base * multiplier).round().max(1.0) as u32;
        Ok(speed)
    }

    /// Rank every action. Fails on the first action whose battler is not in
    /// `context`, before any ordering is produced.
    pub fn rank(&self, context: &BattleContext, actions: &[Action]) -> BattleResult<Vec<RankedAction>> {
        let mut rng = match self.tie_break {
            TieBreakPolicy::EnqueueOrder => None,
            TieBreakPolicy::Seeded { seed } => Some(TurnRng::for_turn(seed, context.turn_number)),
        };
        self.rank_with_rng(context, actions, rng.as_mut())
    }

    /// Like [`rank`](Self::rank), but tie-break keys are drawn from `rng`
    /// instead of the configured policy. `None` leaves ties in queue order.
    pub fn rank_with_rng(
        &self,
        context: &BattleContext,
        actions: &[Action],
        mut rng: Option<&mut TurnRng>,
    ) -> BattleResult<Vec<RankedAction>> {
        let mut ranked = Vec::with_capacity(actions.len());
        for (enqueue_index, action) in actions.iter().enumerate() {
            let battler = context
                .battler(action.battler)
                .ok_or(BattleError::UnknownBattler {
                    battler: action.battler,
                    action_index: enqueue_index,
                })?;
            let effective_speed = self.effective_speed(context, battler)?;
            let tie_break_key = match rng.as_mut() {
                Some(rng) => rng.next_key("turn order tie break"),
                None => 0,
            };

            ranked.push(RankedAction {
                action: action.clone(),
                effective_speed,
                enqueue_index,
                tie_break_key,
            });
        }

        // Sort by priority (higher first), then by speed (higher first), then tie break
        ranked.sort_by(|a, b| {
            b.action
                .priority
                .cmp(&a.action.priority)
                .then_with(|| b.effective_speed.cmp(&a.effective_speed))
                .then_with(|| a.tie_break_key.cmp(&b.tie_break_key))
                .then_with(|| a.enqueue_index.cmp(&b.enqueue_index))
        });

        for (position, entry) in ranked.iter().enumerate() {
            tracing::debug!(
                "Turn {} slot {}: battler {} priority {} speed {} (queued {})",
                context.turn_number,
                position,
                entry.action.battler,
                entry.action.priority,
                entry.effective_speed,
                entry.enqueue_index
            );
        }

        Ok(ranked)
    }

    /// The order in which `actions` execute this turn.
    pub fn resolve_order(&self, context: &BattleContext, actions: &[Action]) -> BattleResult<Vec<Action>> {
        Ok(self
            .rank(context, actions)?
            .into_iter()
            .map(|entry| entry.action)
            .collect())
    }
}
