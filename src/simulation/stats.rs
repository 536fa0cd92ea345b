use serde::{Deserialize, Serialize};

use crate::types::Cell;

/// How an episode ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpisodeOutcome {
    GoalReached,
    /// The planner found no path under the final beliefs
    Stuck,
    StepLimit,
}

/// Per-episode statistics
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EpisodeStats {
    pub strategy: String,
    pub steps: usize,
    /// Moves onto a ground-truth hazard, forced escapes included
    pub dangerous_moves: usize,
    /// Hazard cell used to escape a boxed-in start
    pub trapped_escape: Option<Cell>,
    /// Agent positions, start first
    pub trajectory: Vec<Cell>,
    pub confirmed_hazards: usize,
    pub suspected_hazards: usize,
    pub outcome: Option<EpisodeOutcome>,
}

impl EpisodeStats {
    pub fn new(strategy: &str, start: Cell) -> Self {
        EpisodeStats {
            strategy: strategy.to_string(),
            trajectory: vec![start],
            ..EpisodeStats::default()
        }
    }

    /// Distinct cells the agent has stood on
    pub fn distinct_cells(&self) -> usize {
        let mut cells = self.trajectory.clone();
        cells.sort();
        cells.dedup();
        cells.len()
    }

    /// Save the stats as pretty JSON
    pub fn save(&self, path: &str) -> crate::error::Result<()> {
        let serialized = serde_json::to_string_pretty(self)?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    pub fn load(path: &str) -> crate::error::Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}
