//! # Path Planner Module
//!
//! Picks the agent's next single step from the belief map. Planning is redone
//! every tick because beliefs change after each move, so strategies return
//! only the first step of their chosen path plus a small diagnostic.
//!
//! Planners borrow the belief map immutably; only [`crate::belief::update`]
//! mutates it.
//!
//! ## Available Strategies
//!
//! - `RiskWeightedSearch`: best-first search with a risk-inflated step cost
//! - `FrontierRankedSearch`: breadth-first tree ranked by exploration value
//! - `InformationGainSearch`: breadth-first, heads for the nearest unknown cell

use serde::{Deserialize, Serialize};

use crate::belief::{BeliefMap, CellStatus};
use crate::error::{GridError, Result};
use crate::types::Cell;
use crate::visits::VisitCounts;

pub mod frontier;
pub mod risk_astar;

pub use frontier::{FrontierRankedSearch, InformationGainSearch};
pub use risk_astar::RiskWeightedSearch;

/// Planner tunables
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Extra cost per unit of danger probability when stepping into a cell
    pub risk_weight: f32,
    /// Cells at or above this probability are impassable even unconfirmed
    pub danger_ceiling: f32,
    /// Cost per previous visit, used by the breadth-first strategies
    pub revisit_weight: f32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            risk_weight: 50.0,
            danger_ceiling: 0.95,
            revisit_weight: 1.0,
        }
    }
}

impl PlannerConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.danger_ceiling > 0.0 && self.danger_ceiling <= 1.0) {
            return Err(GridError::invalid_configuration(
                "planner.danger_ceiling".to_string(),
                format!("must be in (0, 1], got {}", self.danger_ceiling),
            ));
        }
        if !(self.risk_weight >= 0.0 && self.risk_weight.is_finite()) {
            return Err(GridError::invalid_configuration(
                "planner.risk_weight".to_string(),
                format!("must be finite and non-negative, got {}", self.risk_weight),
            ));
        }
        if !(self.revisit_weight >= 0.0 && self.revisit_weight.is_finite()) {
            return Err(GridError::invalid_configuration(
                "planner.revisit_weight".to_string(),
                format!("must be finite and non-negative, got {}", self.revisit_weight),
            ));
        }
        Ok(())
    }
}

/// Everything a strategy may read while planning
pub struct PlanContext<'a> {
    pub beliefs: &'a BeliefMap,
    pub visits: &'a VisitCounts,
    pub start: Cell,
    pub goal: Cell,
    pub config: &'a PlannerConfig,
}

impl<'a> PlanContext<'a> {
    pub fn new(
        beliefs: &'a BeliefMap,
        visits: &'a VisitCounts,
        start: Cell,
        goal: Cell,
        config: &'a PlannerConfig,
    ) -> Self {
        PlanContext {
            beliefs,
            visits,
            start,
            goal,
            config,
        }
    }

    pub fn is_traversable(&self, cell: Cell) -> bool {
        is_traversable(self.beliefs, cell, self.config.danger_ceiling)
    }

    /// Traversable in-bounds neighbours of `cell`
    pub fn successors(&self, cell: Cell) -> Vec<Cell> {
        cell.neighbors(self.beliefs.size())
            .filter(|&n| self.is_traversable(n))
            .collect()
    }

    pub(crate) fn no_path(&self) -> GridError {
        GridError::NoPathFound { from: self.start }
    }
}

/// The chosen move and why
#[derive(Clone, Debug, PartialEq)]
pub struct PlanStep {
    pub next: Cell,
    /// Estimated danger of `next`
    pub danger: f32,
    /// Manhattan distance from `next` to the goal
    pub distance: usize,
    /// Length of the full planned path, `next` included
    pub path_len: usize,
}

impl PlanStep {
    pub(crate) fn from_path(ctx: &PlanContext<'_>, path: &[Cell]) -> Option<Self> {
        let next = *path.first()?;
        Some(PlanStep {
            next,
            danger: ctx.beliefs.probability(next),
            distance: next.manhattan(ctx.goal),
            path_len: path.len(),
        })
    }
}

/// A cell may be entered iff it is in bounds, not a known obstacle, not a
/// confirmed hazard, and its danger is below `danger_ceiling`.
pub fn is_traversable(beliefs: &BeliefMap, cell: Cell, danger_ceiling: f32) -> bool {
    match beliefs.get(cell) {
        None => false,
        Some(belief) => {
            !matches!(
                belief.status(),
                CellStatus::Obstacle | CellStatus::ConfirmedHazard
            ) && belief.probability() < danger_ceiling
        }
    }
}

/// Swappable planning policy
pub trait PlanningStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Next step from `ctx.start` toward `ctx.goal`, or
    /// [`GridError::NoPathFound`] when nothing is reachable.
    fn plan(&self, ctx: &PlanContext<'_>) -> Result<PlanStep>;
}

/// Configuration-level choice of strategy
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyKind {
    #[default]
    RiskWeighted,
    FrontierRanked,
    InformationGain,
}

impl StrategyKind {
    pub fn build(self) -> Box<dyn PlanningStrategy> {
        match self {
            StrategyKind::RiskWeighted => Box::new(RiskWeightedSearch),
            StrategyKind::FrontierRanked => Box::new(FrontierRankedSearch),
            StrategyKind::InformationGain => Box::new(InformationGainSearch),
        }
    }

    pub fn all() -> [StrategyKind; 3] {
        [
            StrategyKind::RiskWeighted,
            StrategyKind::FrontierRanked,
            StrategyKind::InformationGain,
        ]
    }
}
