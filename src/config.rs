use serde::{Deserialize, Serialize};

use crate::belief::BeliefConfig;
use crate::error::{GridError, Result};
use crate::planner::{PlannerConfig, StrategyKind};
use crate::types::GridSize;
use crate::world::generator::check_capacity;

/// Episode setup and engine tunables
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub width: usize,
    pub height: usize,
    pub obstacle_count: usize,
    pub hazard_count: usize,
    /// Random draws allowed per placed entity before giving up
    pub max_placement_attempts: usize,
    /// Fixed seed for a reproducible episode, `None` for entropy
    pub seed: Option<u64>,
    /// Stop after this many moves, `None` for no cap
    pub max_steps: Option<usize>,
    pub strategy: StrategyKind,
    pub belief: BeliefConfig,
    pub planner: PlannerConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            width: 8,
            height: 8,
            obstacle_count: 6,
            hazard_count: 6,
            max_placement_attempts: 10_000,
            seed: None,
            max_steps: Some(500),
            strategy: StrategyKind::default(),
            belief: BeliefConfig::default(),
            planner: PlannerConfig::default(),
        }
    }
}

impl SimulationConfig {
    pub fn size(&self) -> GridSize {
        GridSize::new(self.width, self.height)
    }

    /// Reject requests that can never produce a valid episode
    pub fn validate(&self) -> Result<()> {
        check_capacity(self.size(), self.obstacle_count, self.hazard_count)?;
        if self.max_placement_attempts == 0 {
            return Err(GridError::invalid_configuration(
                "max_placement_attempts",
                "must be greater than 0",
            ));
        }
        self.belief.validate()?;
        self.planner.validate()?;
        Ok(())
    }

    pub fn from_json_file(path: &str) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_file(&self, path: &str) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self)?;
        std::fs::write(path, serialized)?;
        Ok(())
    }
}
