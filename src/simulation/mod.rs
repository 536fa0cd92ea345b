//! # Simulation Module
//!
//! One tick is perceive, update beliefs, plan, move. [`tick`] works on
//! explicit parts so callers can drive it themselves; [`Simulation`] bundles
//! those parts into a context and runs whole episodes.
//!
//! Rendering and pacing between ticks belong to the caller.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::belief::update::{mark_occupied, record_obstacles};
use crate::belief::{update_beliefs, BeliefMap, BeliefUpdate, CellStatus};
use crate::config::SimulationConfig;
use crate::error::Result;
use crate::perception::observe;
use crate::planner::{PlanContext, PlanStep, PlanningStrategy};
use crate::types::Cell;
use crate::visits::VisitCounts;
use crate::world::{WorldGenerator, WorldState};

pub mod stats;

pub use stats::{EpisodeOutcome, EpisodeStats};

/// Result of one tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Moved(Cell),
    GoalReached,
    Stuck,
}

/// What happened during one tick
#[derive(Clone, Debug)]
pub struct TickReport {
    pub outcome: TickOutcome,
    /// Chosen step with its estimated danger and remaining distance
    pub diagnostic: Option<PlanStep>,
    pub beliefs: BeliefUpdate,
    pub obstacles_found: usize,
    /// The move landed on a ground-truth hazard
    pub dangerous: bool,
}

impl TickReport {
    fn idle(outcome: TickOutcome) -> Self {
        TickReport {
            outcome,
            diagnostic: None,
            beliefs: BeliefUpdate::default(),
            obstacles_found: 0,
            dangerous: false,
        }
    }

    pub fn next_position(&self) -> Option<Cell> {
        self.diagnostic.as_ref().map(|step| step.next)
    }
}

/// Run one tick against explicit parts.
///
/// Returns `GoalReached` without doing anything if the agent already stands
/// on the goal, and `Stuck` when the planner finds no path. Only
/// configuration-level failures are errors.
pub fn tick(
    world: &mut WorldState,
    beliefs: &mut BeliefMap,
    visits: &mut VisitCounts,
    strategy: &dyn PlanningStrategy,
    config: &SimulationConfig,
) -> Result<TickReport> {
    if world.at_goal() {
        return Ok(TickReport::idle(TickOutcome::GoalReached));
    }

    let pos = world.agent();
    let observation = observe(world, pos);
    let obstacles_found = record_obstacles(beliefs, &observation.obstacles);
    let update = update_beliefs(beliefs, pos, observation.hazard_adjacent, &config.belief);

    let ctx = PlanContext::new(beliefs, visits, pos, world.goal(), &config.planner);
    let step = match strategy.plan(&ctx) {
        Ok(step) => step,
        Err(e) if e.is_terminal_only() => {
            warn!(error = %e, strategy = strategy.name(), "no safe path, agent is stuck");
            let mut report = TickReport::idle(TickOutcome::Stuck);
            report.beliefs = update;
            report.obstacles_found = obstacles_found;
            return Ok(report);
        }
        Err(e) => return Err(e),
    };

    let next = step.next;
    debug_assert!(pos.is_adjacent(next));
    debug_assert!(!matches!(
        beliefs.status(next),
        CellStatus::Obstacle | CellStatus::ConfirmedHazard
    ));

    let dangerous = world.is_hazard(next);
    world.set_agent(next);
    mark_occupied(beliefs, next);
    visits.record(next);

    if dangerous {
        warn!(cell = %next, danger = step.danger, "stepped onto a hazard");
    }
    debug!(
        from = %pos,
        to = %next,
        danger = step.danger,
        distance = step.distance,
        "moved"
    );

    let outcome = if world.at_goal() {
        TickOutcome::GoalReached
    } else {
        TickOutcome::Moved(next)
    };
    Ok(TickReport {
        outcome,
        diagnostic: Some(step),
        beliefs: update,
        obstacles_found,
        dangerous,
    })
}

/// Episode context: ground truth, beliefs, visit counts and the policy
pub struct Simulation {
    config: SimulationConfig,
    world: WorldState,
    beliefs: BeliefMap,
    visits: VisitCounts,
    strategy: Box<dyn PlanningStrategy>,
    rng: StdRng,
    stats: EpisodeStats,
}

impl Simulation {
    /// Generate a random world from `config` and set up the episode
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let strategy = config.strategy.build();
        Self::with_strategy(config, strategy)
    }

    /// Random world from `config`, custom policy. `config.strategy` is ignored.
    pub fn with_strategy(
        config: SimulationConfig,
        strategy: Box<dyn PlanningStrategy>,
    ) -> Result<Self> {
        config.validate()?;
        let mut rng = seeded_rng(config.seed);
        let world = WorldGenerator::new(config.size(), config.obstacle_count, config.hazard_count)
            .with_max_attempts(config.max_placement_attempts)
            .with_seed(rng.gen())
            .generate()?;
        Self::assemble(config, world, strategy, rng)
    }

    /// Episode over a hand-built world. Entity counts in `config` are ignored.
    pub fn with_world(
        config: SimulationConfig,
        world: WorldState,
        strategy: Box<dyn PlanningStrategy>,
    ) -> Result<Self> {
        config.belief.validate()?;
        config.planner.validate()?;
        let rng = seeded_rng(config.seed);
        Self::assemble(config, world, strategy, rng)
    }

    fn assemble(
        config: SimulationConfig,
        world: WorldState,
        strategy: Box<dyn PlanningStrategy>,
        rng: StdRng,
    ) -> Result<Self> {
        let beliefs = BeliefMap::new(world.width(), world.height())?;
        let visits = VisitCounts::new(world.width(), world.height());
        let stats = EpisodeStats::new(strategy.name(), world.agent());

        let mut sim = Simulation {
            config,
            world,
            beliefs,
            visits,
            strategy,
            rng,
            stats,
        };
        let start = sim.world.agent();
        mark_occupied(&mut sim.beliefs, start);
        sim.visits.record(start);
        sim.escape_trapped_start();

        info!(
            width = sim.world.width(),
            height = sim.world.height(),
            start = %sim.world.agent(),
            goal = %sim.world.goal(),
            strategy = sim.strategy.name(),
            "episode started"
        );
        Ok(sim)
    }

    /// Force the agent out of a start cell whose neighbours are all obstacles
    /// or hazards by stepping onto a random hazardous neighbour.
    fn escape_trapped_start(&mut self) {
        let hazards = match self.world.boxed_in_hazards() {
            Some(hazards) => hazards,
            None => return,
        };
        let escape = match hazards.choose(&mut self.rng) {
            Some(&cell) => cell,
            None => {
                warn!(
                    start = %self.world.agent(),
                    "start is walled in with no hazard to escape through"
                );
                return;
            }
        };

        warn!(
            from = %self.world.agent(),
            to = %escape,
            "trapped at start, forcing escape through hazard"
        );
        self.world.set_agent(escape);
        mark_occupied(&mut self.beliefs, escape);
        self.visits.record(escape);
        self.stats.dangerous_moves += 1;
        self.stats.trapped_escape = Some(escape);
        self.stats.trajectory.push(escape);
    }

    /// Advance one tick and fold the result into the stats
    pub fn step(&mut self) -> Result<TickReport> {
        let report = tick(
            &mut self.world,
            &mut self.beliefs,
            &mut self.visits,
            self.strategy.as_ref(),
            &self.config,
        )?;
        if let Some(step) = &report.diagnostic {
            self.stats.steps += 1;
            self.stats.trajectory.push(step.next);
            if report.dangerous {
                self.stats.dangerous_moves += 1;
            }
        }
        Ok(report)
    }

    /// Tick until the goal is reached, the agent is stuck, or the step cap hits
    pub fn run_episode(&mut self) -> Result<EpisodeOutcome> {
        self.run_with(|_, _| {})
    }

    /// Like [`Simulation::run_episode`], calling `observer` after every tick
    pub fn run_with<F>(&mut self, mut observer: F) -> Result<EpisodeOutcome>
    where
        F: FnMut(&Simulation, &TickReport),
    {
        let outcome = loop {
            if let Some(limit) = self.config.max_steps {
                if self.stats.steps >= limit && !self.world.at_goal() {
                    break EpisodeOutcome::StepLimit;
                }
            }
            let report = self.step()?;
            observer(&*self, &report);
            match report.outcome {
                TickOutcome::Moved(_) => {}
                TickOutcome::GoalReached => break EpisodeOutcome::GoalReached,
                TickOutcome::Stuck => break EpisodeOutcome::Stuck,
            }
        };

        self.stats.outcome = Some(outcome);
        self.stats.confirmed_hazards = self.beliefs.count(CellStatus::ConfirmedHazard);
        self.stats.suspected_hazards = self.beliefs.count(CellStatus::SuspectedHazard);
        info!(
            outcome = ?outcome,
            steps = self.stats.steps,
            dangerous_moves = self.stats.dangerous_moves,
            "episode finished"
        );
        Ok(outcome)
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn beliefs(&self) -> &BeliefMap {
        &self.beliefs
    }

    pub fn visits(&self) -> &VisitCounts {
        &self.visits
    }

    pub fn stats(&self) -> &EpisodeStats {
        &self.stats
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn agent(&self) -> Cell {
        self.world.agent()
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
