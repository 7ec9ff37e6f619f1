use crate::battle::state::Battler;
use crate::errors::{BattleError, BattleResult};
use schema::{StatFamily, StatType};
use std::str::FromStr;

pub const MIN_STAGE: i8 = -6;
pub const MAX_STAGE: i8 = 6;

// Index 0..=12 is stage -6..=+6.
const MAIN_BATTLE_MULTIPLIERS: [u32; 13] = [2, 2, 2, 2, 2, 2, 2, 3, 4, 5, 6, 7, 8];
const MAIN_BATTLE_DIVISORS: [u32; 13] = [8, 7, 6, 5, 4, 3, 2, 2, 2, 2, 2, 2, 2];
const ACCURACY_EVASION_MULTIPLIERS: [u32; 13] = [3, 3, 3, 3, 3, 3, 3, 4, 5, 6, 7, 8, 9];
const ACCURACY_EVASION_DIVISORS: [u32; 13] = [9, 8, 7, 6, 5, 4, 3, 3, 3, 3, 3, 3, 3];

/// Parse a stat family by name ("MainBattle", "battle", ...).
pub fn parse_stat_family(name: &str) -> BattleResult<StatFamily> {
    StatFamily::from_str(name).map_err(|_| BattleError::UnknownStatFamily(name.to_string()))
}

/// Look up the (multiplier, divisor) pair for a stage.
///
/// `stage` must already be within -6..=6; callers holding an unchecked value
/// clamp first. `Main` family stats have no stages at all.
pub fn stage_factor(family: StatFamily, stage: i32) -> BattleResult<(u32, u32)> {
    let (multipliers, divisors) = match family {
        StatFamily::MainBattle => (&MAIN_BATTLE_MULTIPLIERS, &MAIN_BATTLE_DIVISORS),
        StatFamily::Battle => (&ACCURACY_EVASION_MULTIPLIERS, &ACCURACY_EVASION_DIVISORS),
        StatFamily::Main => return Err(BattleError::NotStageEligible { family }),
    };

    if !(i32::from(MIN_STAGE)..=i32::from(MAX_STAGE)).contains(&stage) {
        return Err(BattleError::StageOutOfRange { stage });
    }

    let index = (stage - i32::from(MIN_STAGE)) as usize;
    Ok((multipliers[index], divisors[index]))
}

/// Scale `value` by the stage factor of `family`.
pub fn apply_stage(value: f64, family: StatFamily, stage: i8) -> BattleResult<f64> {
    let (multiplier, divisor) = stage_factor(family, i32::from(stage))?;
    Ok(value * f64::from(multiplier) / f64::from(divisor))
}

/// Raw speed with the battler's (clamped) speed stage applied.
pub fn base_speed_after_stage(battler: &Battler) -> BattleResult<f64> {
    apply_stage(
        f64::from(battler.speed),
        StatFamily::MainBattle,
        battler.get_stat_stage(StatType::Speed),
    )
}

fn ensure_stage_eligible(stat: StatType) -> BattleResult<()> {
    if stat.family().is_stage_eligible() {
        Ok(())
    } else {
        Err(BattleError::StatNotStageEligible { stat })
    }
}

impl Battler {
    /// Apply a stage change and return the change that actually happened.
    ///
    /// The requested delta is scaled by `stage_change_multiplier` first, then
    /// the resulting stage is clamped to -6..=6.
    pub fn change_stat_stage(&mut self, stat: StatType, delta: i8) -> BattleResult<i8> {
        ensure_stage_eligible(stat)?;

        let current = self.get_stat_stage(stat);
        let scaled = i16::from(delta) * i16::from(self.stage_change_multiplier);
        let target = (i16::from(current) + scaled).clamp(i16::from(MIN_STAGE), i16::from(MAX_STAGE));
        let actual_change = (target - i16::from(current)) as i8;

        self.set_stat_stage(stat, target as i8);

        tracing::debug!(
            "{} {} stage {} -> {} (requested {:+}, applied {:+})",
            self.name,
            stat.brief(),
            current,
            target,
            delta,
            actual_change
        );
        Ok(actual_change)
    }

    pub fn stat_stage_at_max(&self, stat: StatType) -> bool {
        self.get_stat_stage(stat) >= MAX_STAGE
    }

    pub fn stat_stage_at_min(&self, stat: StatType) -> bool {
        self.get_stat_stage(stat) <= MIN_STAGE
    }

    /// Whether a raise of `stat` would do anything. A battler whose stage
    /// changes are inverted is really being lowered, unless `ignore_inversion`.
    pub fn can_raise_stat(&self, stat: StatType, ignore_inversion: bool) -> BattleResult<bool> {
        ensure_stage_eligible(stat)?;
        if !ignore_inversion && self.stage_change_multiplier < 0 {
            return self.can_lower_stat(stat, true);
        }
        Ok(!self.stat_stage_at_max(stat))
    }

    pub fn can_lower_stat(&self, stat: StatType, ignore_inversion: bool) -> BattleResult<bool> {
        ensure_stage_eligible(stat)?;
        if !ignore_inversion && self.stage_change_multiplier < 0 {
            return self.can_raise_stat(stat, true);
        }
        Ok(!self.stat_stage_at_min(stat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::state::BattlerId;
    use crate::errors::ErrorKind;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn test_battler() -> Battler {
        Battler::new(BattlerId(1), "Test", 0, 100)
    }

    #[rstest]
    #[case(-6, (2, 8))]
    #[case(-5, (2, 7))]
    #[case(-4, (2, 6))]
    #[case(-3, (2, 5))]
    #[case(-2, (2, 4))]
    #[case(-1, (2, 3))]
    #[case(0, (2, 2))]
    #[case(1, (3, 2))]
    #[case(2, (4, 2))]
    #[case(3, (5, 2))]
    #[case(4, (6, 2))]
    #[case(5, (7, 2))]
    #[case(6, (8, 2))]
    fn test_main_battle_table(#[case] stage: i32, #[case] expected: (u32, u32)) {
        assert_eq!(stage_factor(StatFamily::MainBattle, stage), Ok(expected));
    }

    #[rstest]
    #[case(-6, (3, 9))]
    #[case(-1, (3, 4))]
    #[case(0, (3, 3))]
    #[case(1, (4, 3))]
    #[case(6, (9, 3))]
    fn test_accuracy_evasion_table(#[case] stage: i32, #[case] expected: (u32, u32)) {
        assert_eq!(stage_factor(StatFamily::Battle, stage), Ok(expected));
    }

    #[rstest]
    #[case(-7)]
    #[case(7)]
    #[case(100)]
    #[case(i32::MIN)]
    fn test_out_of_range_stage_is_invalid_argument(#[case] stage: i32) {
        let err = stage_factor(StatFamily::MainBattle, stage).unwrap_err();
        assert_eq!(err, BattleError::StageOutOfRange { stage });
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_main_family_is_invalid_operation() {
        let err = stage_factor(StatFamily::Main, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_parse_stat_family() {
        assert_eq!(parse_stat_family("MainBattle"), Ok(StatFamily::MainBattle));
        let err = parse_stat_family("Luck").unwrap_err();
        assert_eq!(err, BattleError::UnknownStatFamily("Luck".to_string()));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_apply_stage() {
        assert_eq!(apply_stage(100.0, StatFamily::MainBattle, 2), Ok(200.0));
        assert_eq!(apply_stage(100.0, StatFamily::MainBattle, -2), Ok(50.0));
        assert_eq!(apply_stage(90.0, StatFamily::Battle, 1), Ok(120.0));
    }

    #[test]
    fn test_base_speed_after_stage() {
        let battler = test_battler().with_stat_stage(StatType::Speed, 6);
        assert_eq!(base_speed_after_stage(&battler), Ok(400.0));
    }

    #[test]
    fn test_change_stat_stage_clamps_and_reports_actual_change() {
        let mut battler = test_battler().with_stat_stage(StatType::Attack, 5);
        assert_eq!(battler.change_stat_stage(StatType::Attack, 2), Ok(1));
        assert_eq!(battler.get_stat_stage(StatType::Attack), 6);
        assert_eq!(battler.change_stat_stage(StatType::Attack, 1), Ok(0));
    }

    #[test]
    fn test_change_stat_stage_with_doubling_and_inversion() {
        let mut simple = test_battler();
        simple.stage_change_multiplier = 2;
        assert_eq!(simple.change_stat_stage(StatType::Speed, 1), Ok(2));

        let mut contrary = test_battler();
        contrary.stage_change_multiplier = -1;
        assert_eq!(contrary.change_stat_stage(StatType::Defense, 2), Ok(-2));
        assert_eq!(contrary.get_stat_stage(StatType::Defense), -2);
    }

    #[test]
    fn test_change_main_stat_is_invalid_operation() {
        let mut battler = test_battler();
        let err = battler.change_stat_stage(StatType::Hp, 1).unwrap_err();
        assert_eq!(err, BattleError::StatNotStageEligible { stat: StatType::Hp });
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_can_raise_and_lower_at_bounds() {
        let battler = test_battler()
            .with_stat_stage(StatType::Speed, 6)
            .with_stat_stage(StatType::Evasion, -6);
        assert_eq!(battler.can_raise_stat(StatType::Speed, false), Ok(false));
        assert_eq!(battler.can_lower_stat(StatType::Speed, false), Ok(true));
        assert_eq!(battler.can_lower_stat(StatType::Evasion, false), Ok(false));
    }

    #[test]
    fn test_inverted_battler_checks_opposite_bound() {
        let mut battler = test_battler().with_stat_stage(StatType::Speed, -6);
        battler.stage_change_multiplier = -1;
        // A "raise" lowers, and speed is already at the floor.
        assert_eq!(battler.can_raise_stat(StatType::Speed, false), Ok(false));
        assert_eq!(battler.can_raise_stat(StatType::Speed, true), Ok(true));
    }
}
