#[cfg(test)]
mod tests {
    use crate::battle::speed::SpeedModifierChain;
    use crate::battle::state::TurnRng;
    use crate::battle::tests::common::{
        assert_ok, create_test_context, default_resolver, order_of, tackle, TestBattlerBuilder,
    };
    use crate::battle::turn_order::{TieBreakPolicy, TurnOrderResolver};
    use crate::config::BattleRules;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn seeded_resolver(seed: u64) -> TurnOrderResolver {
        TurnOrderResolver::new(
            SpeedModifierChain::standard(&BattleRules::default()),
            TieBreakPolicy::Seeded { seed },
        )
    }

    fn speed_tie_context() -> crate::battle::state::BattleContext {
        create_test_context(vec![
            TestBattlerBuilder::new(1, 100).build(),
            TestBattlerBuilder::new(2, 100).on_side(1).build(),
            TestBattlerBuilder::new(3, 100).build(),
            TestBattlerBuilder::new(4, 100).on_side(1).build(),
        ])
    }

    #[rstest]
    #[case(vec![1, 2])]
    #[case(vec![2, 1])]
    #[case(vec![3, 1, 4, 2])]
    fn test_enqueue_order_tie_break(#[case] queued: Vec<u32>) {
        let context = speed_tie_context();
        let actions: Vec<_> = queued.iter().map(|id| tackle(*id)).collect();

        let order = assert_ok(default_resolver().resolve_order(&context, &actions));
        assert_eq!(order_of(&order), queued);
    }

    #[test]
    fn test_enqueue_order_is_stable_across_calls() {
        let context = speed_tie_context();
        let actions = [tackle(2), tackle(1)];
        let resolver = default_resolver();

        let first = assert_ok(resolver.resolve_order(&context, &actions));
        for _ in 0..10 {
            assert_eq!(assert_ok(resolver.resolve_order(&context, &actions)), first);
        }
    }

    #[test]
    fn test_seeded_tie_break_is_reproducible() {
        let context = speed_tie_context();
        let actions = [tackle(1), tackle(2), tackle(3), tackle(4)];

        let first = assert_ok(seeded_resolver(99).resolve_order(&context, &actions));
        let second = assert_ok(seeded_resolver(99).resolve_order(&context, &actions));
        assert_eq!(first, second);

        let mut sorted = order_of(&first);
        sorted.sort_unstable();
        assert_eq!(sorted, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_seeded_tie_break_never_overrides_speed() {
        let context = create_test_context(vec![
            TestBattlerBuilder::new(1, 50).build(),
            TestBattlerBuilder::new(2, 100).on_side(1).build(),
        ]);
        for seed in 0..20 {
            let order = assert_ok(seeded_resolver(seed).resolve_order(&context, &[tackle(1), tackle(2)]));
            assert_eq!(order_of(&order), vec![2, 1]);
        }
    }

    #[test]
    fn test_seeded_keys_follow_the_turn() {
        let mut context = speed_tie_context();
        let actions = [tackle(1), tackle(2), tackle(3), tackle(4)];
        let resolver = seeded_resolver(5);

        let keys_for = |context: &crate::battle::state::BattleContext| -> Vec<u64> {
            let mut ranked = assert_ok(resolver.rank(context, &actions));
            ranked.sort_by_key(|entry| entry.enqueue_index);
            ranked.iter().map(|entry| entry.tie_break_key).collect()
        };

        let turn_one = keys_for(&context);
        assert_eq!(keys_for(&context), turn_one);

        context.end_turn();
        assert_ne!(keys_for(&context), turn_one);
    }

    #[test]
    fn test_scripted_keys_order_speed_ties() {
        let context = speed_tie_context();
        let actions = [tackle(1), tackle(2), tackle(3)];
        let mut rng = TurnRng::new_for_test(vec![30, 10, 20]);

        let ranked = assert_ok(default_resolver().rank_with_rng(&context, &actions, Some(&mut rng)));
        let order: Vec<u32> = ranked.iter().map(|entry| entry.action.battler.0).collect();
        assert_eq!(order, vec![2, 3, 1]);
        assert_eq!(
            ranked.iter().map(|entry| entry.tie_break_key).collect::<Vec<_>>(),
            vec![10, 20, 30]
        );
    }

    #[test]
    fn test_equal_scripted_keys_fall_back_to_queue_order() {
        let context = speed_tie_context();
        let actions = [tackle(4), tackle(2), tackle(3)];
        let mut rng = TurnRng::new_for_test(vec![7]);

        let ranked = assert_ok(default_resolver().rank_with_rng(&context, &actions, Some(&mut rng)));
        let order: Vec<u32> = ranked.iter().map(|entry| entry.action.battler.0).collect();
        assert_eq!(order, vec![4, 2, 3]);
    }

    #[test]
    fn test_scripted_keys_never_override_priority_or_speed() {
        let context = create_test_context(vec![
            TestBattlerBuilder::new(1, 50).build(),
            TestBattlerBuilder::new(2, 100).on_side(1).build(),
            TestBattlerBuilder::new(3, 10).build(),
        ]);
        let actions = [
            tackle(1),
            tackle(2),
            crate::battle::state::Action::run(crate::battle::state::BattlerId(3)),
        ];
        // The slowest battler gets the smallest key and the fastest the largest.
        let mut rng = TurnRng::new_for_test(vec![5, 900, 1]);

        let ranked = assert_ok(default_resolver().rank_with_rng(&context, &actions, Some(&mut rng)));
        let order: Vec<u32> = ranked.iter().map(|entry| entry.action.battler.0).collect();
        assert_eq!(order, vec![3, 2, 1]);
    }
}
