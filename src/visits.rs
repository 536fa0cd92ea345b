use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::types::Cell;

/// How many ticks the agent has spent on each cell. Used as a soft revisit
/// penalty; never reset within an episode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisitCounts {
    counts: Array2<u32>,
}

impl VisitCounts {
    pub fn new(width: usize, height: usize) -> Self {
        VisitCounts {
            counts: Array2::zeros((height, width)),
        }
    }

    pub fn get(&self, cell: Cell) -> u32 {
        self.counts.get(cell.index()).copied().unwrap_or(0)
    }

    pub fn record(&mut self, cell: Cell) {
        if let Some(count) = self.counts.get_mut(cell.index()) {
            *count = count.saturating_add(1);
        }
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    /// Cells visited at least once
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }
}
