use crate::belief::CellStatus;
use crate::config::SimulationConfig;
use crate::planner::StrategyKind;
use crate::simulation::{tick, EpisodeOutcome, Simulation, TickOutcome};
use crate::types::{Cell, GridSize};
use crate::world::WorldState;

fn seeded_config() -> SimulationConfig {
    SimulationConfig {
        seed: Some(11),
        ..SimulationConfig::default()
    }
}

fn simulation_on(world: WorldState, kind: StrategyKind) -> Simulation {
    Simulation::with_world(seeded_config(), world, kind.build()).unwrap()
}

#[test]
fn test_start_cell_is_safe_and_visited() {
    let world = WorldState::new(
        GridSize::new(4, 4),
        vec![],
        vec![],
        Cell::new(3, 3),
        Cell::new(1, 1),
    )
    .unwrap();
    let sim = simulation_on(world, StrategyKind::RiskWeighted);

    assert_eq!(sim.beliefs().status(Cell::new(1, 1)), CellStatus::Safe);
    assert_eq!(sim.visits().get(Cell::new(1, 1)), 1);
    assert_eq!(sim.stats().trajectory, vec![Cell::new(1, 1)]);
    assert_eq!(sim.stats().steps, 0);
}

#[test]
fn test_trapped_start_escapes_through_hazard() {
    let world = WorldState::new(
        GridSize::new(4, 4),
        vec![Cell::new(1, 0)],
        vec![Cell::new(0, 1)],
        Cell::new(3, 3),
        Cell::new(0, 0),
    )
    .unwrap();
    let sim = simulation_on(world, StrategyKind::RiskWeighted);

    assert_eq!(sim.agent(), Cell::new(0, 1));
    assert_eq!(sim.beliefs().status(Cell::new(0, 1)), CellStatus::Safe);
    assert_eq!(sim.stats().dangerous_moves, 1);
    assert_eq!(sim.stats().trapped_escape, Some(Cell::new(0, 1)));
    assert_eq!(sim.stats().trajectory, vec![Cell::new(0, 0), Cell::new(0, 1)]);
}

#[test]
fn test_walled_in_start_is_stuck() {
    let world = WorldState::new(
        GridSize::new(3, 3),
        vec![Cell::new(1, 0), Cell::new(0, 1)],
        vec![],
        Cell::new(2, 2),
        Cell::new(0, 0),
    )
    .unwrap();

    for kind in StrategyKind::all() {
        let mut sim = simulation_on(world.clone(), kind);
        assert_eq!(sim.run_episode().unwrap(), EpisodeOutcome::Stuck);
        assert_eq!(sim.stats().steps, 0);
        assert_eq!(sim.agent(), Cell::new(0, 0));
        assert_eq!(sim.beliefs().count(CellStatus::Obstacle), 2);
    }
}

#[test]
fn test_tick_at_goal_is_a_no_op() {
    let world = WorldState::new(
        GridSize::new(3, 1),
        vec![],
        vec![],
        Cell::new(2, 0),
        Cell::new(0, 0),
    )
    .unwrap();
    let mut sim = simulation_on(world, StrategyKind::RiskWeighted);

    assert_eq!(sim.run_episode().unwrap(), EpisodeOutcome::GoalReached);
    assert_eq!(sim.stats().steps, 2);

    let report = sim.step().unwrap();
    assert_eq!(report.outcome, TickOutcome::GoalReached);
    assert!(report.diagnostic.is_none());
    assert_eq!(sim.stats().steps, 2);
    assert_eq!(sim.agent(), Cell::new(2, 0));
}

#[test]
fn test_step_limit_stops_episode() {
    let world = WorldState::new(
        GridSize::new(8, 8),
        vec![],
        vec![],
        Cell::new(7, 7),
        Cell::new(0, 0),
    )
    .unwrap();
    let config = SimulationConfig {
        max_steps: Some(3),
        ..seeded_config()
    };
    let mut sim =
        Simulation::with_world(config, world, StrategyKind::RiskWeighted.build()).unwrap();

    assert_eq!(sim.run_episode().unwrap(), EpisodeOutcome::StepLimit);
    assert_eq!(sim.stats().steps, 3);
    assert_eq!(sim.stats().outcome, Some(EpisodeOutcome::StepLimit));
}

#[test]
fn test_free_tick_moves_one_cell() {
    let mut world = WorldState::new(
        GridSize::new(5, 5),
        vec![Cell::new(1, 0)],
        vec![],
        Cell::new(4, 4),
        Cell::new(0, 0),
    )
    .unwrap();
    let mut beliefs = crate::belief::initialize_beliefs(5, 5).unwrap();
    let mut visits = crate::visits::VisitCounts::new(5, 5);
    let config = seeded_config();
    let strategy = StrategyKind::RiskWeighted.build();

    let report = tick(&mut world, &mut beliefs, &mut visits, strategy.as_ref(), &config).unwrap();
    assert_eq!(report.obstacles_found, 1);
    assert_eq!(report.outcome, TickOutcome::Moved(Cell::new(0, 1)));
    assert_eq!(report.next_position(), Some(Cell::new(0, 1)));
    assert!(!report.dangerous);
    assert_eq!(world.agent(), Cell::new(0, 1));
    assert_eq!(beliefs.status(Cell::new(1, 0)), CellStatus::Obstacle);
    assert_eq!(beliefs.status(Cell::new(0, 1)), CellStatus::Safe);
    assert_eq!(visits.get(Cell::new(0, 1)), 1);
}

#[test]
fn test_hazard_signal_updates_beliefs_during_tick() {
    // Hazard at (2,0); the agent at (1,0) already knows (1,1) is safe.
    let mut world = WorldState::new(
        GridSize::new(4, 3),
        vec![],
        vec![Cell::new(2, 0)],
        Cell::new(3, 2),
        Cell::new(1, 0),
    )
    .unwrap();
    let mut beliefs = crate::belief::initialize_beliefs(4, 3).unwrap();
    beliefs.set(Cell::new(1, 1), crate::belief::CellBelief::safe()).unwrap();
    let mut visits = crate::visits::VisitCounts::new(4, 3);
    let config = seeded_config();
    let strategy = StrategyKind::RiskWeighted.build();

    let report = tick(&mut world, &mut beliefs, &mut visits, strategy.as_ref(), &config).unwrap();
    assert_eq!(report.beliefs.suspected, vec![Cell::new(2, 0), Cell::new(0, 0)]);
    assert!(report.beliefs.confirmed.is_none());
    assert_eq!(beliefs.status(Cell::new(2, 0)), CellStatus::SuspectedHazard);
    assert_eq!(report.next_position(), Some(Cell::new(1, 1)));
    assert!(!report.dangerous);
}

#[test]
fn test_observer_sees_every_tick() {
    let world = WorldState::new(
        GridSize::new(8, 8),
        vec![],
        vec![],
        Cell::new(7, 7),
        Cell::new(0, 0),
    )
    .unwrap();
    let mut sim = simulation_on(world, StrategyKind::FrontierRanked);

    let mut ticks = 0;
    let outcome = sim
        .run_with(|sim, report| {
            ticks += 1;
            if let Some(next) = report.next_position() {
                assert_eq!(sim.agent(), next);
            }
        })
        .unwrap();

    assert_eq!(outcome, EpisodeOutcome::GoalReached);
    assert_eq!(ticks, sim.stats().steps);
    assert_eq!(sim.stats().trajectory.len(), sim.stats().steps + 1);
}
