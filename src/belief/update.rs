use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::belief::{BeliefMap, CellBelief, CellStatus};
use crate::error::{GridError, Result};
use crate::types::Cell;

/// Tunables for the belief update
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeliefConfig {
    /// Added to a suspected cell's probability per ambiguous exposure
    pub increment: f32,
    /// Only deduce a unique hazard when no confirmed neighbour already
    /// explains the sensor signal
    pub strict_deduction: bool,
}

impl Default for BeliefConfig {
    fn default() -> Self {
        BeliefConfig {
            increment: 0.3,
            strict_deduction: false,
        }
    }
}

impl BeliefConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.increment > 0.0 && self.increment <= 1.0) {
            return Err(GridError::invalid_configuration(
                "belief.increment".to_string(),
                format!("must be in (0, 1], got {}", self.increment),
            ));
        }
        Ok(())
    }
}

/// What a single update changed
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BeliefUpdate {
    pub confirmed: Option<Cell>,
    pub suspected: Vec<Cell>,
    pub retracted: Vec<Cell>,
}

impl BeliefUpdate {
    pub fn is_empty(&self) -> bool {
        self.confirmed.is_none() && self.suspected.is_empty() && self.retracted.is_empty()
    }
}

/// Fold one hazard-adjacency reading taken at `pos` into the map.
///
/// With the sensor on, a single unknown neighbour is confirmed outright;
/// otherwise every unknown or already-suspected neighbour gains
/// `config.increment`, capped at 1.0. With the sensor off, suspected
/// neighbours are retracted to safe. Confirmed hazards are never touched.
pub fn update_beliefs(
    beliefs: &mut BeliefMap,
    pos: Cell,
    hazard_sensed: bool,
    config: &BeliefConfig,
) -> BeliefUpdate {
    let size = beliefs.size();
    let mut report = BeliefUpdate::default();

    if !hazard_sensed {
        for n in pos.neighbors(size) {
            if beliefs.status(n) == CellStatus::SuspectedHazard {
                if let Some(slot) = beliefs.slot_mut(n) {
                    *slot = CellBelief::safe();
                }
                report.retracted.push(n);
            }
        }
        if !report.retracted.is_empty() {
            debug!(%pos, retracted = ?report.retracted, "retracted suspicion");
        }
        return report;
    }

    let unknowns: Vec<Cell> = pos
        .neighbors(size)
        .filter(|&n| beliefs.status(n) == CellStatus::Unknown)
        .collect();
    let explained = config.strict_deduction
        && pos
            .neighbors(size)
            .any(|n| beliefs.status(n) == CellStatus::ConfirmedHazard);

    if unknowns.len() == 1 && !explained {
        let cell = unknowns[0];
        if let Some(slot) = beliefs.slot_mut(cell) {
            *slot = CellBelief::confirmed_hazard();
        }
        report.confirmed = Some(cell);
        debug!(%pos, %cell, "deduced hazard");
        return report;
    }

    let candidates: Vec<Cell> = pos
        .neighbors(size)
        .filter(|&n| {
            matches!(
                beliefs.status(n),
                CellStatus::Unknown | CellStatus::SuspectedHazard
            )
        })
        .collect();
    for cell in candidates {
        if let Some(slot) = beliefs.slot_mut(cell) {
            *slot = CellBelief::suspected(slot.probability() + config.increment);
        }
        report.suspected.push(cell);
    }
    if !report.suspected.is_empty() {
        debug!(%pos, suspected = ?report.suspected, "raised suspicion");
    }
    report
}

/// Mark freshly scanned obstacles. Returns how many were new.
pub fn record_obstacles(beliefs: &mut BeliefMap, obstacles: &[Cell]) -> usize {
    let mut discovered = 0;
    for &cell in obstacles {
        if let Some(slot) = beliefs.slot_mut(cell) {
            if slot.status() != CellStatus::Obstacle {
                *slot = CellBelief::obstacle();
                discovered += 1;
            }
        }
    }
    discovered
}

/// The agent stands on `cell` and survived, so it is safe.
pub fn mark_occupied(beliefs: &mut BeliefMap, cell: Cell) {
    if let Some(slot) = beliefs.slot_mut(cell) {
        *slot = CellBelief::safe();
    }
}
