//! # Belief Map Module
//!
//! The agent's only knowledge of the world: one status/probability record per
//! cell. The map starts fully unknown and is refined every tick by
//! [`update`]. Obstacle knowledge is monotone, hazard suspicion is not: a
//! suspected cell can be retracted to safe, but confirmation is terminal.
//!
//! ## Available Components
//!
//! - `CellStatus`: closed set of visibility states
//! - `CellBelief`: status plus danger probability, consistent by construction
//! - `BeliefMap`: dense `height x width` grid of `CellBelief`
//! - `update`: perception-driven mutation (deduction, accumulation, retraction)

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::types::{Cell, GridSize};

pub mod update;

pub use update::{update_beliefs, BeliefConfig, BeliefUpdate};

/// Glyph used by renderers for the goal cell
pub const GOAL_GLYPH: char = 'G';
/// Glyph used by renderers for the agent
pub const AGENT_GLYPH: char = 'R';

/// Visibility status of a single cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellStatus {
    Unknown,
    Obstacle,
    Safe,
    SuspectedHazard,
    ConfirmedHazard,
}

impl CellStatus {
    pub fn glyph(self) -> char {
        match self {
            CellStatus::Unknown => '?',
            CellStatus::Safe => '.',
            CellStatus::Obstacle => 'W',
            CellStatus::SuspectedHazard => 'D',
            CellStatus::ConfirmedHazard => 'X',
        }
    }
}

/// Status and danger probability of one cell.
///
/// Fields are private so the pair stays consistent: confirmed hazards carry
/// exactly 1.0, suspected hazards a value in (0, 1], everything else 0.0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCellBelief", into = "RawCellBelief")]
pub struct CellBelief {
    status: CellStatus,
    probability: f32,
}

/// On-disk shape of a `CellBelief`, checked on the way back in
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
struct RawCellBelief {
    status: CellStatus,
    probability: f32,
}

impl From<CellBelief> for RawCellBelief {
    fn from(belief: CellBelief) -> Self {
        RawCellBelief {
            status: belief.status,
            probability: belief.probability,
        }
    }
}

impl TryFrom<RawCellBelief> for CellBelief {
    type Error = String;

    fn try_from(raw: RawCellBelief) -> std::result::Result<Self, Self::Error> {
        let p = raw.probability;
        let consistent = match raw.status {
            CellStatus::ConfirmedHazard => p == 1.0,
            CellStatus::SuspectedHazard => p > 0.0 && p <= 1.0,
            CellStatus::Unknown | CellStatus::Safe | CellStatus::Obstacle => p == 0.0,
        };
        if !consistent {
            return Err(format!(
                "{:?} cell cannot carry danger probability {}",
                raw.status, p
            ));
        }
        Ok(CellBelief {
            status: raw.status,
            probability: p,
        })
    }
}

impl CellBelief {
    pub const fn unknown() -> Self {
        CellBelief {
            status: CellStatus::Unknown,
            probability: 0.0,
        }
    }

    pub const fn safe() -> Self {
        CellBelief {
            status: CellStatus::Safe,
            probability: 0.0,
        }
    }

    pub const fn obstacle() -> Self {
        CellBelief {
            status: CellStatus::Obstacle,
            probability: 0.0,
        }
    }

    pub const fn confirmed_hazard() -> Self {
        CellBelief {
            status: CellStatus::ConfirmedHazard,
            probability: 1.0,
        }
    }

    /// Suspected hazard with probability clamped into (0, 1].
    /// A non-positive or NaN probability means no suspicion at all.
    pub fn suspected(probability: f32) -> Self {
        if probability.is_nan() || probability <= 0.0 {
            return CellBelief::unknown();
        }
        CellBelief {
            status: CellStatus::SuspectedHazard,
            probability: probability.min(1.0),
        }
    }

    pub fn status(&self) -> CellStatus {
        self.status
    }

    pub fn probability(&self) -> f32 {
        self.probability
    }
}

impl Default for CellBelief {
    fn default() -> Self {
        CellBelief::unknown()
    }
}

/// Per-cell knowledge of the grid
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BeliefMap {
    cells: Array2<CellBelief>,
}

impl BeliefMap {
    /// All-unknown map for a `width x height` grid
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GridError::invalid_configuration(
                "size".to_string(),
                format!("grid must be at least 1x1, got {}x{}", width, height),
            ));
        }
        Ok(BeliefMap {
            cells: Array2::from_elem((height, width), CellBelief::unknown()),
        })
    }

    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    pub fn size(&self) -> GridSize {
        GridSize::new(self.width(), self.height())
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.size().contains(cell)
    }

    /// Belief for `cell`, `None` when out of bounds
    pub fn get(&self, cell: Cell) -> Option<&CellBelief> {
        self.cells.get(cell.index())
    }

    /// Status of `cell`; out-of-bounds cells read as unknown
    pub fn status(&self, cell: Cell) -> CellStatus {
        self.get(cell).map_or(CellStatus::Unknown, |b| b.status)
    }

    /// Danger probability of `cell`; out-of-bounds cells read as 0.0
    pub fn probability(&self, cell: Cell) -> f32 {
        self.get(cell).map_or(0.0, |b| b.probability)
    }

    /// Overwrite the belief for one cell
    pub fn set(&mut self, cell: Cell, belief: CellBelief) -> Result<()> {
        let (width, height) = (self.width(), self.height());
        match self.cells.get_mut(cell.index()) {
            Some(slot) => {
                *slot = belief;
                Ok(())
            }
            None => Err(GridError::OutOfBounds { cell, width, height }),
        }
    }

    /// Row-major iteration over every cell and its belief
    pub fn iter(&self) -> impl Iterator<Item = (Cell, &CellBelief)> {
        self.cells
            .indexed_iter()
            .map(|((y, x), belief)| (Cell::new(x, y), belief))
    }

    pub fn count(&self, status: CellStatus) -> usize {
        self.cells.iter().filter(|b| b.status == status).count()
    }

    /// Fraction of cells still unknown
    pub fn unknown_fraction(&self) -> f32 {
        self.count(CellStatus::Unknown) as f32 / self.cells.len() as f32
    }

    pub(crate) fn slot_mut(&mut self, cell: Cell) -> Option<&mut CellBelief> {
        self.cells.get_mut(cell.index())
    }

    /// Save a snapshot of the map to disk
    pub fn save(&self, path: &str) -> Result<()> {
        let serialized = bincode::serialize(self)?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    /// Load a snapshot from disk
    pub fn load(path: &str) -> Result<Self> {
        let data = std::fs::read(path)?;
        let map: Self = bincode::deserialize(&data)?;
        Ok(map)
    }
}

/// All-unknown belief map
pub fn initialize_beliefs(width: usize, height: usize) -> Result<BeliefMap> {
    BeliefMap::new(width, height)
}
