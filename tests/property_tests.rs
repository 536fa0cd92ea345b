#[cfg(test)]
mod property_tests {
    use grididdy::belief::{update_beliefs, BeliefConfig, BeliefMap, CellBelief, CellStatus};
    use grididdy::planner::{PlanContext, PlannerConfig, StrategyKind};
    use grididdy::types::Cell;
    use grididdy::visits::VisitCounts;
    use grididdy::GridError;
    use proptest::prelude::*;

    const WIDTH: usize = 6;
    const HEIGHT: usize = 6;

    // Strategy for generating a single cell belief
    fn cell_belief_strategy() -> impl Strategy<Value = CellBelief> {
        prop_oneof![
            4 => Just(CellBelief::unknown()),
            3 => Just(CellBelief::safe()),
            1 => Just(CellBelief::obstacle()),
            1 => Just(CellBelief::confirmed_hazard()),
            2 => (0.01f32..=1.0).prop_map(CellBelief::suspected),
        ]
    }

    // Strategy for generating a full belief map
    fn belief_map_strategy() -> impl Strategy<Value = BeliefMap> {
        prop::collection::vec(cell_belief_strategy(), WIDTH * HEIGHT).prop_map(|cells| {
            let mut beliefs = BeliefMap::new(WIDTH, HEIGHT).unwrap();
            for (i, belief) in cells.into_iter().enumerate() {
                beliefs.set(Cell::new(i % WIDTH, i / WIDTH), belief).unwrap();
            }
            beliefs
        })
    }

    fn cell_strategy() -> impl Strategy<Value = Cell> {
        (0..WIDTH, 0..HEIGHT).prop_map(|(x, y)| Cell::new(x, y))
    }

    proptest! {
        #[test]
        fn test_planned_step_is_adjacent_and_passable(
            beliefs in belief_map_strategy(),
            start in cell_strategy(),
            goal in cell_strategy(),
        ) {
            prop_assume!(start != goal);
            let visits = VisitCounts::new(WIDTH, HEIGHT);
            let config = PlannerConfig::default();
            let ctx = PlanContext::new(&beliefs, &visits, start, goal, &config);

            for kind in StrategyKind::all() {
                match kind.build().plan(&ctx) {
                    Ok(step) => {
                        prop_assert!(start.is_adjacent(step.next));
                        let status = beliefs.status(step.next);
                        prop_assert!(
                            status != CellStatus::Obstacle,
                            "{:?} stepped into a wall",
                            kind
                        );
                        prop_assert!(
                            status != CellStatus::ConfirmedHazard,
                            "{:?} stepped into a hazard",
                            kind
                        );
                        prop_assert!(beliefs.probability(step.next) < config.danger_ceiling);
                        prop_assert!(step.path_len >= 1);
                    }
                    Err(GridError::NoPathFound { from }) => {
                        prop_assert_eq!(from, start);
                    }
                    Err(e) => {
                        prop_assert!(false, "unexpected error {}", e);
                    }
                }
            }
        }

        #[test]
        fn test_probabilities_stay_in_unit_interval(
            beliefs in belief_map_strategy(),
            readings in prop::collection::vec((cell_strategy(), any::<bool>()), 1..30),
            increment in 0.05f32..=1.0,
        ) {
            let mut beliefs = beliefs;
            let config = BeliefConfig {
                increment,
                ..BeliefConfig::default()
            };
            for (pos, sensed) in readings {
                update_beliefs(&mut beliefs, pos, sensed, &config);
            }
            for (_, belief) in beliefs.iter() {
                let p = belief.probability();
                prop_assert!((0.0..=1.0).contains(&p));
                match belief.status() {
                    CellStatus::ConfirmedHazard => {
                        prop_assert_eq!(p, 1.0);
                    }
                    CellStatus::SuspectedHazard => {
                        prop_assert!(p > 0.0);
                    }
                    _ => {
                        prop_assert_eq!(p, 0.0);
                    }
                }
            }
        }

        #[test]
        fn test_confirmed_and_obstacle_cells_are_never_rewritten(
            beliefs in belief_map_strategy(),
            readings in prop::collection::vec((cell_strategy(), any::<bool>()), 1..30),
            strict in any::<bool>(),
        ) {
            let mut updated = beliefs.clone();
            let config = BeliefConfig {
                strict_deduction: strict,
                ..BeliefConfig::default()
            };
            for (pos, sensed) in readings {
                update_beliefs(&mut updated, pos, sensed, &config);
            }
            for (cell, before) in beliefs.iter() {
                let terminal = matches!(
                    before.status(),
                    CellStatus::ConfirmedHazard | CellStatus::Obstacle | CellStatus::Safe
                );
                if terminal {
                    prop_assert_eq!(updated.status(cell), before.status());
                }
            }
        }
    }
}
