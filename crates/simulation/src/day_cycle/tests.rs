#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::prelude::*;

    use super::super::calculations::*;
    use super::super::types::*;

    const EPS: f32 = 1e-5;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    fn started(phases: Vec<CyclePhase>, now: f64) -> DayCycle {
        let mut cycle = DayCycle::new(phases).expect("non-empty phases");
        cycle.start(secs(now));
        cycle
    }

    fn day_night(day_secs: f64, night_secs: f64) -> Vec<CyclePhase> {
        vec![
            CyclePhase::day(Color::WHITE, secs(day_secs)),
            CyclePhase::night(Color::BLACK, secs(night_secs)),
        ]
    }

    fn assert_srgba(color: Color, expected: [f32; 4]) {
        let c = color.to_srgba();
        let actual = [c.red, c.green, c.blue, c.alpha];
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert!(
                (a - e).abs() < EPS,
                "expected {expected:?}, got {actual:?}"
            );
        }
    }

    // -------------------------------------------------------------------------
    // next_index
    // -------------------------------------------------------------------------

    #[test]
    fn next_index_advances_and_wraps() {
        assert_eq!(next_index(0, 3), 1);
        assert_eq!(next_index(1, 3), 2);
        assert_eq!(next_index(2, 3), 0);
    }

    #[test]
    fn next_index_single_phase_stays_at_zero() {
        assert_eq!(next_index(0, 1), 0);
    }

    // -------------------------------------------------------------------------
    // lerp_fraction
    // -------------------------------------------------------------------------

    #[test]
    fn fraction_zero_length_window_is_zero() {
        assert_eq!(lerp_fraction(secs(10.0), secs(10.0), secs(25.0)), 0.0);
    }

    #[test]
    fn fraction_midpoint() {
        assert!((lerp_fraction(secs(0.0), secs(60.0), secs(30.0)) - 0.5).abs() < EPS);
    }

    #[test]
    fn fraction_offset_window() {
        let t = lerp_fraction(secs(100.0), secs(140.0), secs(110.0));
        assert!((t - 0.25).abs() < EPS);
    }

    #[test]
    fn fraction_clamped_to_unit_range() {
        assert_eq!(lerp_fraction(secs(10.0), secs(20.0), secs(5.0)), 0.0);
        assert_eq!(lerp_fraction(secs(10.0), secs(20.0), secs(50.0)), 1.0);
    }

    #[test]
    fn fraction_within_window_stays_in_bounds() {
        for step in 0..=100 {
            let now = secs(step as f64 * 0.6);
            let t = lerp_fraction(secs(0.0), secs(60.0), now);
            assert!((0.0..=1.0).contains(&t), "t = {t} at step {step}");
        }
    }

    // -------------------------------------------------------------------------
    // lerp_color
    // -------------------------------------------------------------------------

    #[test]
    fn color_endpoints() {
        assert_srgba(lerp_color(Color::WHITE, Color::BLACK, 0.0), [1.0, 1.0, 1.0, 1.0]);
        assert_srgba(lerp_color(Color::WHITE, Color::BLACK, 1.0), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn color_white_to_black_midpoint_is_mid_gray() {
        assert_srgba(lerp_color(Color::WHITE, Color::BLACK, 0.5), [0.5, 0.5, 0.5, 1.0]);
    }

    #[test]
    fn color_channels_interpolate_independently() {
        let from = Color::srgba(1.0, 0.0, 0.0, 0.0);
        let to = Color::srgba(0.0, 0.0, 1.0, 1.0);
        assert_srgba(lerp_color(from, to, 0.25), [0.75, 0.0, 0.25, 0.25]);
    }

    #[test]
    fn color_fraction_is_clamped() {
        assert_srgba(lerp_color(Color::WHITE, Color::BLACK, 2.0), [0.0, 0.0, 0.0, 1.0]);
        assert_srgba(lerp_color(Color::WHITE, Color::BLACK, -1.0), [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn color_out_of_gamut_channels_are_clamped() {
        let hot = Color::srgba(1.5, -0.5, 0.5, 1.0);
        assert_srgba(lerp_color(hot, hot, 0.5), [1.0, 0.0, 0.5, 1.0]);
    }

    // -------------------------------------------------------------------------
    // detect_transition
    // -------------------------------------------------------------------------

    #[test]
    fn transition_table() {
        assert_eq!(detect_transition(true, false), Some(CycleTransition::DayStarted));
        assert_eq!(detect_transition(false, true), Some(CycleTransition::NightStarted));
        assert_eq!(detect_transition(true, true), None);
        assert_eq!(detect_transition(false, false), None);
    }

    // -------------------------------------------------------------------------
    // DayCycle construction
    // -------------------------------------------------------------------------

    #[test]
    fn empty_phases_rejected() {
        assert_eq!(DayCycle::new(Vec::new()), Err(DayCycleError::EmptyPhases));
    }

    #[test]
    fn start_seeds_first_window() {
        let cycle = started(day_night(60.0, 30.0), 5.0);
        assert!(cycle.is_initialized());
        assert_eq!(cycle.current_index(), 0);
        assert_eq!(cycle.phase_start(), secs(5.0));
        assert_eq!(cycle.phase_end(), secs(65.0));
        assert!(!cycle.is_night());
    }

    #[test]
    fn restore_validates_index_and_window() {
        assert_eq!(
            DayCycle::restore(day_night(10.0, 10.0), 2, secs(0.0), secs(10.0), false),
            Err(DayCycleError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert!(matches!(
            DayCycle::restore(day_night(10.0, 10.0), 1, secs(20.0), secs(10.0), false),
            Err(DayCycleError::InvertedWindow { .. })
        ));
        assert_eq!(
            DayCycle::restore(day_night(10.0, 10.0), 0, secs(0.0), secs(5000.0), false),
            Err(DayCycleError::WindowMismatch {
                start: secs(0.0),
                end: secs(5000.0),
                duration: secs(10.0),
            })
        );
        assert!(matches!(
            DayCycle::restore(day_night(10.0, 10.0), 1, secs(10.0), secs(15.0), true),
            Err(DayCycleError::WindowMismatch { .. })
        ));

        let restored = DayCycle::restore(day_night(10.0, 10.0), 1, secs(10.0), secs(20.0), true)
            .expect("valid restore");
        assert!(restored.is_initialized());
        assert!(restored.is_night());
    }

    #[test]
    fn period_sums_durations() {
        let cycle = started(day_night(45.0, 15.0), 0.0);
        assert_eq!(cycle.period(), secs(60.0));
    }

    #[test]
    fn default_phase_is_white_sixty_second_day() {
        let phase = CyclePhase::default();
        assert_eq!(phase.start_color, Color::WHITE);
        assert_eq!(phase.duration, Duration::from_secs(60));
        assert!(!phase.is_night);
    }

    // -------------------------------------------------------------------------
    // step_cycle
    // -------------------------------------------------------------------------

    #[test]
    fn single_phase_cycle_never_steps() {
        let mut cycle = started(vec![CyclePhase::night(Color::BLACK, secs(5.0))], 0.0);
        let before = cycle.clone();
        for tick in 1..50 {
            assert!(step_cycle(&mut cycle, secs(tick as f64)).is_none());
        }
        assert_eq!(cycle, before);
    }

    #[test]
    fn step_at_phase_start_is_start_color() {
        let mut cycle = started(day_night(60.0, 60.0), 0.0);
        let step = step_cycle(&mut cycle, secs(0.0)).expect("multi-phase");
        assert_eq!(step.fraction, 0.0);
        assert!(!step.advanced);
        assert_srgba(step.color, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn half_way_through_white_to_black_is_mid_gray() {
        let mut cycle = started(day_night(60.0, 60.0), 0.0);
        let step = step_cycle(&mut cycle, secs(30.0)).expect("multi-phase");
        assert!((step.fraction - 0.5).abs() < EPS);
        assert_srgba(step.color, [0.5, 0.5, 0.5, 1.0]);
    }

    #[test]
    fn color_approaches_next_phase_near_end() {
        let mut cycle = started(day_night(60.0, 60.0), 0.0);
        let step = step_cycle(&mut cycle, secs(59.9)).expect("multi-phase");
        let c = step.color.to_srgba();
        assert!(c.red < 0.01, "red = {}", c.red);
        assert_eq!(cycle.current_index(), 0);
    }

    #[test]
    fn boundary_tick_does_not_advance() {
        let mut cycle = started(day_night(10.0, 10.0), 0.0);
        let step = step_cycle(&mut cycle, secs(10.0)).expect("multi-phase");
        assert!(!step.advanced);
        assert_eq!(cycle.current_index(), 0);
        assert_eq!(step.fraction, 1.0);
    }

    #[test]
    fn advance_chains_from_previous_end() {
        let mut cycle = started(day_night(10.0, 20.0), 0.0);
        let step = step_cycle(&mut cycle, secs(13.0)).expect("multi-phase");
        assert!(step.advanced);
        assert_eq!(cycle.current_index(), 1);
        assert_eq!(cycle.phase_start(), secs(10.0));
        assert_eq!(cycle.phase_end(), secs(30.0));
    }

    #[test]
    fn color_after_advance_uses_new_phase() {
        let red = Color::srgb(1.0, 0.0, 0.0);
        let blue = Color::srgb(0.0, 0.0, 1.0);
        let mut cycle = started(
            vec![
                CyclePhase::day(red, secs(10.0)),
                CyclePhase::day(blue, secs(10.0)),
            ],
            0.0,
        );
        let step = step_cycle(&mut cycle, secs(15.0)).expect("multi-phase");
        assert!(step.advanced);
        // Now in the blue phase, heading back to red.
        assert_srgba(step.color, [0.5, 0.0, 0.5, 1.0]);
    }

    #[test]
    fn wraps_to_first_phase() {
        let phases = vec![
            CyclePhase::day(Color::WHITE, secs(10.0)),
            CyclePhase::day(Color::BLACK, secs(10.0)),
            CyclePhase::night(Color::BLACK, secs(10.0)),
        ];
        let mut cycle = started(phases, 0.0);

        step_cycle(&mut cycle, secs(10.5));
        assert_eq!(cycle.current_index(), 1);
        step_cycle(&mut cycle, secs(20.5));
        assert_eq!(cycle.current_index(), 2);
        step_cycle(&mut cycle, secs(30.5));
        assert_eq!(cycle.current_index(), 0);
        assert_eq!(cycle.phase_start(), secs(30.0));
        assert_eq!(cycle.phase_end(), secs(40.0));
    }

    #[test]
    fn zero_length_phase_advances_on_next_tick() {
        let phases = vec![
            CyclePhase::day(Color::WHITE, Duration::ZERO),
            CyclePhase::night(Color::BLACK, secs(10.0)),
        ];
        let mut cycle = started(phases, 0.0);

        let step = step_cycle(&mut cycle, secs(0.0)).expect("multi-phase");
        assert_eq!(step.fraction, 0.0);
        assert!(!step.advanced);
        assert_srgba(step.color, [1.0, 1.0, 1.0, 1.0]);

        let step = step_cycle(&mut cycle, secs(0.1)).expect("multi-phase");
        assert!(step.advanced);
        assert_eq!(cycle.current_index(), 1);
        assert_eq!(cycle.phase_start(), secs(0.0));
        assert_eq!(cycle.phase_end(), secs(10.0));
    }

    #[test]
    fn transitions_are_edge_triggered() {
        let mut cycle = started(day_night(10.0, 10.0), 0.0);
        let mut seen = Vec::new();
        for tick in 1..=60 {
            let step = step_cycle(&mut cycle, secs(tick as f64)).expect("multi-phase");
            if let Some(transition) = step.transition {
                seen.push((tick, transition));
            }
        }

        // Edges are judged against the phase that just completed: the first
        // day phase completes with day already announced, so nothing fires
        // until the night phase completes at t=21.
        assert_eq!(
            seen,
            vec![
                (21, CycleTransition::NightStarted),
                (31, CycleTransition::DayStarted),
                (41, CycleTransition::NightStarted),
                (51, CycleTransition::DayStarted),
            ]
        );
    }

    #[test]
    fn night_first_cycle_announces_night_when_it_completes() {
        let phases = vec![
            CyclePhase::night(Color::BLACK, secs(10.0)),
            CyclePhase::day(Color::WHITE, secs(10.0)),
        ];
        let mut cycle = started(phases, 0.0);

        let step = step_cycle(&mut cycle, secs(11.0)).expect("multi-phase");
        assert_eq!(step.transition, Some(CycleTransition::NightStarted));
        assert!(cycle.is_night());

        let step = step_cycle(&mut cycle, secs(21.0)).expect("multi-phase");
        assert_eq!(step.transition, Some(CycleTransition::DayStarted));
        assert!(!cycle.is_night());
    }

    #[test]
    fn repeated_ticks_inside_phase_raise_nothing() {
        let mut cycle = started(day_night(10.0, 10.0), 0.0);
        step_cycle(&mut cycle, secs(11.0));
        let fired = step_cycle(&mut cycle, secs(21.0)).and_then(|s| s.transition);
        assert_eq!(fired, Some(CycleTransition::NightStarted));

        for tick in 22..=30 {
            let step = step_cycle(&mut cycle, secs(tick as f64)).expect("multi-phase");
            assert_eq!(step.transition, None, "unexpected event at t={tick}");
        }
    }

    #[test]
    fn irregular_ticks_do_not_drift() {
        let mut cycle = started(day_night(10.0, 10.0), 0.0);
        let deltas = [3.0, 4.0, 5.0, 3.0, 4.0, 5.0, 3.0, 4.0, 5.0, 3.0, 4.0, 5.0];
        let mut now = 0.0;
        for delta in deltas {
            now += delta;
            step_cycle(&mut cycle, secs(now));
            let end = cycle.phase_end().as_secs_f64();
            assert!((end % 10.0).abs() < 1e-9, "phase end {end} drifted at t={now}");
            assert_eq!(cycle.phase_end() - cycle.phase_start(), secs(10.0));
        }
        // Advances at t = 12, 24, 31, 43.
        assert_eq!(now, 48.0);
        assert_eq!(cycle.current_index(), 0);
        assert_eq!(cycle.phase_start(), secs(40.0));
        assert_eq!(cycle.phase_end(), secs(50.0));
    }

    #[test]
    fn long_pause_consumes_one_phase_per_tick() {
        let mut cycle = started(day_night(10.0, 10.0), 0.0);

        let step = step_cycle(&mut cycle, secs(35.0)).expect("multi-phase");
        assert!(step.lagging);
        assert_eq!(cycle.current_index(), 1);
        assert_eq!(cycle.phase_end(), secs(20.0));

        let step = step_cycle(&mut cycle, secs(35.0)).expect("multi-phase");
        assert!(step.lagging);
        assert_eq!(cycle.current_index(), 0);
        assert_eq!(cycle.phase_end(), secs(30.0));

        let step = step_cycle(&mut cycle, secs(35.0)).expect("multi-phase");
        assert!(!step.lagging);
        assert_eq!(cycle.current_index(), 1);
        assert!((step.fraction - 0.5).abs() < EPS);
    }

    #[test]
    fn huge_phase_durations_saturate_instead_of_overflowing() {
        let phases = vec![
            CyclePhase::day(Color::WHITE, Duration::MAX),
            CyclePhase::night(Color::BLACK, Duration::MAX),
        ];
        let mut cycle = started(phases, 5.0);
        assert_eq!(cycle.phase_end(), Duration::MAX);

        let step = step_cycle(&mut cycle, secs(10.0)).expect("multi-phase");
        assert!(!step.advanced);
        assert_eq!(cycle.current_index(), 0);

        let mut cycle = started(
            vec![
                CyclePhase::day(Color::WHITE, secs(10.0)),
                CyclePhase::night(Color::BLACK, Duration::MAX),
            ],
            0.0,
        );
        let step = step_cycle(&mut cycle, secs(11.0)).expect("multi-phase");
        assert!(step.advanced);
        assert_eq!(cycle.phase_start(), secs(10.0));
        assert_eq!(cycle.phase_end(), Duration::MAX);
    }
}
