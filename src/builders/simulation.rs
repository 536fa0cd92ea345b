use crate::config::SimulationConfig;
use crate::error::{GridError, Result};
use crate::planner::{PlanningStrategy, StrategyKind};
use crate::simulation::Simulation;
use crate::types::{Cell, GridSize};
use crate::world::WorldState;

/// Builder for constructing simulations with a fluent API
pub struct SimulationBuilder {
    config: SimulationConfig,
    obstacles: Vec<Cell>,
    hazards: Vec<Cell>,
    goal: Option<Cell>,
    agent: Option<Cell>,
    world: Option<WorldState>,
    strategy: Option<Box<dyn PlanningStrategy>>,
}

impl SimulationBuilder {
    /// Create a new simulation builder with the default configuration
    pub fn new() -> Self {
        SimulationBuilder::from_config(SimulationConfig::default())
    }

    /// Start from an existing configuration
    pub fn from_config(config: SimulationConfig) -> Self {
        SimulationBuilder {
            config,
            obstacles: Vec::new(),
            hazards: Vec::new(),
            goal: None,
            agent: None,
            world: None,
            strategy: None,
        }
    }

    /// Set the grid dimensions
    pub fn size(mut self, width: usize, height: usize) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    /// Number of randomly scattered obstacles and hazards
    pub fn entity_counts(mut self, obstacles: usize, hazards: usize) -> Self {
        self.config.obstacle_count = obstacles;
        self.config.hazard_count = hazards;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn max_steps(mut self, max_steps: Option<usize>) -> Self {
        self.config.max_steps = max_steps;
        self
    }

    pub fn strategy(mut self, kind: StrategyKind) -> Self {
        self.config.strategy = kind;
        self
    }

    /// Use a custom planning policy instead of a built-in one
    pub fn with_strategy(mut self, strategy: Box<dyn PlanningStrategy>) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn belief_increment(mut self, increment: f32) -> Self {
        self.config.belief.increment = increment;
        self
    }

    pub fn strict_deduction(mut self, strict: bool) -> Self {
        self.config.belief.strict_deduction = strict;
        self
    }

    pub fn risk_weight(mut self, weight: f32) -> Self {
        self.config.planner.risk_weight = weight;
        self
    }

    pub fn danger_ceiling(mut self, ceiling: f32) -> Self {
        self.config.planner.danger_ceiling = ceiling;
        self
    }

    pub fn revisit_weight(mut self, weight: f32) -> Self {
        self.config.planner.revisit_weight = weight;
        self
    }

    /// Place an obstacle by hand; switches the builder to a scripted world
    pub fn obstacle(mut self, x: usize, y: usize) -> Self {
        self.obstacles.push(Cell::new(x, y));
        self
    }

    /// Place a hazard by hand; switches the builder to a scripted world
    pub fn hazard(mut self, x: usize, y: usize) -> Self {
        self.hazards.push(Cell::new(x, y));
        self
    }

    pub fn goal(mut self, x: usize, y: usize) -> Self {
        self.goal = Some(Cell::new(x, y));
        self
    }

    pub fn agent(mut self, x: usize, y: usize) -> Self {
        self.agent = Some(Cell::new(x, y));
        self
    }

    /// Use a fully built world
    pub fn world(mut self, world: WorldState) -> Self {
        self.world = Some(world);
        self
    }

    fn scripted(&self) -> bool {
        self.goal.is_some()
            || self.agent.is_some()
            || !self.obstacles.is_empty()
            || !self.hazards.is_empty()
    }

    /// Build the simulation
    pub fn build(self) -> Result<Simulation> {
        let scripted = self.scripted();
        let strategy = match self.strategy {
            Some(strategy) => strategy,
            None => self.config.strategy.build(),
        };

        if let Some(world) = self.world {
            return Simulation::with_world(self.config, world, strategy);
        }
        if !scripted {
            return Simulation::with_strategy(self.config, strategy);
        }

        let goal = self.goal.ok_or_else(|| {
            GridError::invalid_configuration("goal", "Goal not specified for a scripted world")
        })?;
        let agent = self.agent.ok_or_else(|| {
            GridError::invalid_configuration("agent", "Agent not specified for a scripted world")
        })?;
        let world = WorldState::new(
            GridSize::new(self.config.width, self.config.height),
            self.obstacles,
            self.hazards,
            goal,
            agent,
        )?;
        Simulation::with_world(self.config, world, strategy)
    }
}

impl Default for SimulationBuilder {
    fn default() -> Self {
        Self::new()
    }
}
