//! Unit tests for behaviors, parameters, and maneuver heuristics.

#[cfg(test)]
mod name {
    use crate::{BehaviorError, BehaviorName};

    #[test]
    fn parse_roundtrip() {
        for name in BehaviorName::ALL {
            assert_eq!(name.as_str().parse::<BehaviorName>().unwrap(), name);
        }
    }

    #[test]
    fn unknown_name_errors_once_but_falls_back_at_runtime() {
        let err = "swarm".parse::<BehaviorName>().unwrap_err();
        assert!(matches!(err, BehaviorError::UnknownBehavior(s) if s == "swarm"));
        assert_eq!(BehaviorName::parse_or_idle("swarm"), BehaviorName::Idle);
        assert_eq!(BehaviorName::parse_or_idle("flee"), BehaviorName::Flee);
    }

    #[test]
    fn display_matches_labels() {
        assert_eq!(BehaviorName::Pathfind.to_string(), "pathfind");
        assert_eq!(BehaviorName::default(), BehaviorName::Idle);
    }

    #[test]
    fn only_idle_is_inactive() {
        for name in BehaviorName::ALL {
            assert_eq!(name.is_active(), name != BehaviorName::Idle);
        }
    }
}

#[cfg(test)]
mod params {
    use crate::{BehaviorName, BehaviorParams, ParamPatch, ParamTable};

    #[test]
    fn patch_overrides_win() {
        let patch = ParamPatch {
            speed: Some(80.0),
            hard_mask_threshold: Some(0.5),
            ..Default::default()
        };
        let merged = patch.apply(BehaviorParams::default());
        assert_eq!(merged.speed, 80.0);
        assert_eq!(merged.hard_mask_threshold, 0.5);
        // Unset fields keep the base value.
        assert_eq!(merged.wander_rate, BehaviorParams::default().wander_rate);
    }

    #[test]
    fn table_keys_defaults_by_behavior() {
        let table = ParamTable::new();
        assert_eq!(table.get(BehaviorName::Pathfind).wander_weight, 0.3);
        assert_eq!(table.get(BehaviorName::Wander).speed, 30.0);
        assert_eq!(table.get(BehaviorName::Flee).speed, 60.0);
        assert_eq!(table.get(BehaviorName::Strafe), BehaviorParams::default());
    }

    #[test]
    fn resolve_merges_patch_over_named_defaults() {
        let table = ParamTable::new();
        let patch = ParamPatch { wander_weight: Some(0.0), ..Default::default() };
        let merged = table.resolve(BehaviorName::Pathfind, Some(&patch));
        assert_eq!(merged.wander_weight, 0.0);
        assert_eq!(merged.speed, 50.0);
        assert_eq!(
            table.resolve(BehaviorName::Idle, None),
            table.get(BehaviorName::Idle)
        );
    }

    #[test]
    fn set_replaces_defaults() {
        let mut table = ParamTable::new();
        let custom = BehaviorParams { speed: 5.0, ..Default::default() };
        table.set(BehaviorName::Strafe, custom);
        assert_eq!(table.get(BehaviorName::Strafe).speed, 5.0);
    }
}

#[cfg(test)]
mod behaviors {
    use cbs_core::{NoiseField, Vec2};
    use cbs_context::{SlotTable, SteeringContext, solve};

    use crate::{BehaviorParams, advance_cursor, flee, seek, strafe, tether, wander};

    /// Slot with the highest accumulated interest.
    fn peak_slot(ctx: &SteeringContext<'_>) -> usize {
        ctx.interest
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap()
    }

    #[test]
    fn seek_peaks_at_the_target_slot() {
        let table = SlotTable::coarse();
        let mut ctx = SteeringContext::new(&table);
        seek(&mut ctx, Vec2::UNIT_Y, 2.0);
        assert!((ctx.interest[2] - 2.0).abs() < 1e-6);
        // 45° neighbors get cos(45°) of the weight.
        assert!((ctx.interest[1] - 1.4142).abs() < 1e-3);
        assert!((ctx.interest[3] - 1.4142).abs() < 1e-3);
        assert_eq!(ctx.interest[6], 0.0, "slots behind the target stay empty");
    }

    #[test]
    fn seek_is_additive_and_safe_on_zero() {
        let table = SlotTable::coarse();
        let mut ctx = SteeringContext::new(&table);
        seek(&mut ctx, Vec2::UNIT_X, 1.0);
        seek(&mut ctx, Vec2::UNIT_X, 1.0);
        assert!((ctx.interest[0] - 2.0).abs() < 1e-6);
        seek(&mut ctx, Vec2::ZERO, 5.0);
        assert!((ctx.interest[0] - 2.0).abs() < 1e-6);
    }

    #[test]
    fn flee_mirrors_seek() {
        let table = SlotTable::coarse();
        let mut ctx = SteeringContext::new(&table);
        flee(&mut ctx, Vec2::UNIT_X, 1.0);
        assert_eq!(peak_slot(&ctx), 4);
        assert_eq!(ctx.interest[0], 0.0);
    }

    #[test]
    fn seek_then_solve_recovers_the_bearing() {
        let table = SlotTable::coarse();
        let mut ctx = SteeringContext::new(&table);
        seek(&mut ctx, Vec2::UNIT_X, 1.0);
        let steering = solve(&ctx, 0.9, Vec2::UNIT_Y);
        // Cosine lobe is symmetric around slot 0: no interpolation offset.
        assert!(steering.direction.angle().abs() < 1e-4);
        assert_eq!(steering.magnitude, 1.0);
    }

    #[test]
    fn seek_off_slot_bearing_is_recovered_by_interpolation() {
        let table = SlotTable::standard();
        let mut ctx = SteeringContext::new(&table);
        seek(&mut ctx, Vec2::from_angle(0.3), 1.0);
        let steering = solve(&ctx, 0.9, Vec2::UNIT_Y);
        assert!((steering.direction.angle() - 0.3).abs() < 0.01);
    }

    #[test]
    fn wander_is_deterministic_and_bounded() {
        let table = SlotTable::standard();
        let params = BehaviorParams::default();
        let noise = NoiseField::new(42);

        let mut ctx_a = SteeringContext::new(&table);
        let mut ctx_b = SteeringContext::new(&table);
        let dir_a = wander(&mut ctx_a, Vec2::UNIT_X, &noise, 3.7, &params);
        let dir_b = wander(&mut ctx_b, Vec2::UNIT_X, &noise, 3.7, &params);
        assert_eq!(dir_a, dir_b);
        assert_eq!(ctx_a.interest, ctx_b.interest);

        assert!((dir_a.length() - 1.0).abs() < 1e-5);
        assert!(dir_a.angle().abs() <= params.wander_angle_range + 1e-5);
    }

    #[test]
    fn wander_reads_without_advancing() {
        let table = SlotTable::standard();
        let params = BehaviorParams::default();
        let noise = NoiseField::new(7);
        let cursor = 1.25;

        let mut ctx = SteeringContext::new(&table);
        let first = wander(&mut ctx, Vec2::UNIT_X, &noise, cursor, &params);
        let second = wander(&mut ctx, Vec2::UNIT_X, &noise, cursor, &params);
        assert_eq!(first, second, "cursor advancement is the caller's job");

        let advanced = advance_cursor(cursor, 0.1, params.wander_rate);
        assert!((advanced - (cursor + 0.1 * params.wander_rate)).abs() < 1e-7);
    }

    #[test]
    fn tether_is_quiet_inside_the_soft_zone() {
        let table = SlotTable::coarse();
        let mut ctx = SteeringContext::new(&table);
        tether(&mut ctx, Vec2::new(50.0, 0.0), Vec2::ZERO, 100.0, 2.0);
        assert!(ctx.interest.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn tether_ramps_then_saturates() {
        let table = SlotTable::coarse();

        // Midway through the ramp (soft edge 70, leash 100): half strength.
        let mut ctx = SteeringContext::new(&table);
        tether(&mut ctx, Vec2::new(85.0, 0.0), Vec2::ZERO, 100.0, 2.0);
        assert_eq!(peak_slot(&ctx), 4, "pull points home");
        assert!((ctx.interest[4] - 1.0).abs() < 1e-5);

        // Beyond the leash: saturated at the full weight.
        let mut ctx = SteeringContext::new(&table);
        tether(&mut ctx, Vec2::new(150.0, 0.0), Vec2::ZERO, 100.0, 2.0);
        assert!((ctx.interest[4] - 2.0).abs() < 1e-5);
    }

    #[test]
    fn strafe_seeks_when_far_and_flees_when_close() {
        let table = SlotTable::coarse();
        let params = BehaviorParams::default();

        let mut ctx = SteeringContext::new(&table);
        strafe(&mut ctx, Vec2::UNIT_X, 100.0, &params);
        assert_eq!(peak_slot(&ctx), 0);

        let mut ctx = SteeringContext::new(&table);
        strafe(&mut ctx, Vec2::UNIT_X, 2.0, &params);
        assert_eq!(peak_slot(&ctx), 4);
    }

    #[test]
    fn strafe_orbits_mid_band_with_spin_preference() {
        let table = SlotTable::coarse();
        let params = BehaviorParams::default();
        let mid = (params.min_range + params.max_range) * 0.5;

        let mut ctx = SteeringContext::new(&table);
        strafe(&mut ctx, Vec2::UNIT_X, mid, &params);
        // +1 favors the lobe 90° CCW of the bearing: +Y outscores -Y.
        assert_eq!(peak_slot(&ctx), 2);
        assert!(ctx.interest[2] > ctx.interest[6]);
        assert!(ctx.interest[2] > ctx.interest[0]);

        let clockwise = BehaviorParams { strafe_direction: -1.0, ..params };
        let mut ctx = SteeringContext::new(&table);
        strafe(&mut ctx, Vec2::UNIT_X, mid, &clockwise);
        assert_eq!(peak_slot(&ctx), 6);
    }
}

#[cfg(test)]
mod maneuver {
    use cbs_core::{AgentId, Obstacle, Vec2};
    use cbs_context::{SlotTable, SteeringContext};

    use crate::{
        BehaviorParams, DeadlockSide, LOCK_BOOST, PathLock, resolve_deadlocks, try_path_locking,
    };

    const ME: AgentId = AgentId(3);

    fn lock(
        ctx:       &mut SteeringContext<'_>,
        obstacles: &[Obstacle],
        distance:  f32,
        params:    &BehaviorParams,
    ) -> PathLock {
        try_path_locking(ctx, Vec2::ZERO, Vec2::UNIT_X, distance, obstacles, ME, params)
    }

    #[test]
    fn clear_corridor_locks_and_boosts() {
        let table = SlotTable::coarse();
        let params = BehaviorParams::default();
        let mut ctx = SteeringContext::new(&table);
        let report = lock(&mut ctx, &[], 40.0, &params);
        assert_eq!(report, PathLock::Locked);
        assert!(report.engaged());
        assert!((ctx.interest[0] - LOCK_BOOST).abs() < 1e-5);
    }

    #[test]
    fn obstacle_on_the_corridor_blocks() {
        let table = SlotTable::coarse();
        let params = BehaviorParams::default();
        let wall = [Obstacle::fixed(Vec2::new(20.0, 0.0), 1.0)];

        let mut ctx = SteeringContext::new(&table);
        let report = lock(&mut ctx, &wall, 40.0, &params);
        assert_eq!(report, PathLock::Blocked);
        assert!(!report.engaged());
        assert!(ctx.interest.iter().all(|&v| v == 0.0), "no boost while blocked");
    }

    #[test]
    fn obstacles_outside_the_corridor_are_ignored() {
        let table = SlotTable::coarse();
        let params = BehaviorParams::default();
        let clear = [
            Obstacle::fixed(Vec2::new(20.0, 10.0), 1.0),  // wide of the corridor
            Obstacle::fixed(Vec2::new(-10.0, 0.0), 1.0),  // behind the agent
            Obstacle::fixed(Vec2::new(60.0, 0.0), 1.0),   // beyond the reach
            Obstacle::new(Vec2::new(20.0, 0.0), 1.0, ME), // the agent's own body
        ];
        let mut ctx = SteeringContext::new(&table);
        assert_eq!(lock(&mut ctx, &clear, 40.0, &params), PathLock::Locked);
    }

    #[test]
    fn close_targets_refuse_to_lock() {
        let table = SlotTable::coarse();
        let params = BehaviorParams::default();
        let mut ctx = SteeringContext::new(&table);
        assert_eq!(lock(&mut ctx, &[], 5.0, &params), PathLock::TooClose);
        assert_eq!(
            try_path_locking(&mut ctx, Vec2::ZERO, Vec2::ZERO, 40.0, &[], ME, &params),
            PathLock::TooClose
        );
    }

    #[test]
    fn corridor_reach_is_capped_by_lock_range() {
        let table = SlotTable::coarse();
        let params = BehaviorParams::default();
        // Target far beyond path_lock_range (50): only the first 50 units matter.
        let past_reach = [Obstacle::fixed(Vec2::new(60.0, 0.0), 1.0)];
        let mut ctx = SteeringContext::new(&table);
        assert_eq!(lock(&mut ctx, &past_reach, 100.0, &params), PathLock::Locked);

        let in_reach = [Obstacle::fixed(Vec2::new(45.0, 0.0), 1.0)];
        let mut ctx = SteeringContext::new(&table);
        assert_eq!(lock(&mut ctx, &in_reach, 100.0, &params), PathLock::Blocked);
    }

    #[test]
    fn opposed_headings_deadlock_and_tie_to_the_left() {
        let table = SlotTable::coarse();
        let params = BehaviorParams::default();
        let mut ctx = SteeringContext::new(&table);
        let side = resolve_deadlocks(
            &mut ctx,
            Vec2::UNIT_X,
            Vec2::new(-1.0, 0.0),
            &params,
            DeadlockSide::None,
        );
        assert_eq!(side, DeadlockSide::Left);
        // Left of desired (-1, 0) is (0, -1): slot 6 carries the nudge.
        assert!((ctx.interest[6] - params.deadlock_bias).abs() < 1e-5);
    }

    #[test]
    fn persisted_side_is_kept_while_deadlocked() {
        let table = SlotTable::coarse();
        let params = BehaviorParams::default();
        let mut ctx = SteeringContext::new(&table);
        let side = resolve_deadlocks(
            &mut ctx,
            Vec2::UNIT_X,
            Vec2::new(-1.0, 0.0),
            &params,
            DeadlockSide::Right,
        );
        assert_eq!(side, DeadlockSide::Right);
        assert!(ctx.interest[2] > 0.0, "right of (-1,0) is (0,1)");
    }

    #[test]
    fn deadlock_clears_once_headings_align() {
        let table = SlotTable::coarse();
        let params = BehaviorParams::default();
        let mut ctx = SteeringContext::new(&table);
        let side = resolve_deadlocks(
            &mut ctx,
            Vec2::UNIT_X,
            Vec2::UNIT_X,
            &params,
            DeadlockSide::Left,
        );
        assert_eq!(side, DeadlockSide::None);
        assert!(ctx.interest.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn masked_desired_slot_also_deadlocks() {
        let table = SlotTable::coarse();
        let params = BehaviorParams::default();
        let mut ctx = SteeringContext::new(&table);
        ctx.raise_danger(0, 0.95);
        let side = resolve_deadlocks(
            &mut ctx,
            Vec2::UNIT_X,
            Vec2::UNIT_X,
            &params,
            DeadlockSide::None,
        );
        assert_ne!(side, DeadlockSide::None);
    }

    #[test]
    fn first_side_choice_avoids_the_dangerous_quarter() {
        let table = SlotTable::coarse();
        let params = BehaviorParams::default();
        let mut ctx = SteeringContext::new(&table);
        // Desired slot is 4; its counter-clockwise quarter (slots 5, 6) is hot.
        ctx.raise_danger(5, 0.5);
        let side = resolve_deadlocks(
            &mut ctx,
            Vec2::UNIT_X,
            Vec2::new(-1.0, 0.0),
            &params,
            DeadlockSide::None,
        );
        assert_eq!(side, DeadlockSide::Right);
    }

    #[test]
    fn degenerate_inputs_never_deadlock() {
        let table = SlotTable::coarse();
        let params = BehaviorParams::default();
        let mut ctx = SteeringContext::new(&table);
        let side = resolve_deadlocks(
            &mut ctx,
            Vec2::ZERO,
            Vec2::UNIT_X,
            &params,
            DeadlockSide::Left,
        );
        assert_eq!(side, DeadlockSide::None);
    }
}
