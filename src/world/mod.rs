//! # World State
//!
//! Ground truth for one episode: static obstacles, hidden hazards, the goal and
//! the agent position. Everything except the agent position is fixed once the
//! world is built.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{GridError, Result};
use crate::types::{Cell, GridSize};

pub mod generator;

pub use generator::WorldGenerator;

/// Ground-truth grid
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorldState {
    size: GridSize,
    obstacles: HashSet<Cell>,
    hazards: HashSet<Cell>,
    goal: Cell,
    agent: Cell,
}

impl WorldState {
    /// Build a world from explicit parts.
    ///
    /// Every cell must be in bounds and obstacles, hazards, goal and agent must
    /// be pairwise disjoint.
    pub fn new(
        size: GridSize,
        obstacles: impl IntoIterator<Item = Cell>,
        hazards: impl IntoIterator<Item = Cell>,
        goal: Cell,
        agent: Cell,
    ) -> Result<Self> {
        if size.width == 0 || size.height == 0 {
            return Err(GridError::invalid_configuration(
                "size".to_string(),
                format!("grid must be at least 1x1, got {}x{}", size.width, size.height),
            ));
        }

        let obstacles: HashSet<Cell> = obstacles.into_iter().collect();
        let hazards: HashSet<Cell> = hazards.into_iter().collect();

        for &cell in obstacles.iter().chain(hazards.iter()).chain([&goal, &agent]) {
            if !size.contains(cell) {
                return Err(GridError::OutOfBounds {
                    cell,
                    width: size.width,
                    height: size.height,
                });
            }
        }

        if let Some(cell) = obstacles.intersection(&hazards).next() {
            return Err(GridError::invalid_configuration(
                "hazards".to_string(),
                format!("{} is both an obstacle and a hazard", cell),
            ));
        }
        if goal == agent {
            return Err(GridError::invalid_configuration(
                "agent".to_string(),
                format!("agent starts on the goal {}", goal),
            ));
        }
        for (name, cell) in [("goal", goal), ("agent", agent)] {
            if obstacles.contains(&cell) || hazards.contains(&cell) {
                return Err(GridError::invalid_configuration(
                    name.to_string(),
                    format!("{} overlaps an obstacle or hazard", cell),
                ));
            }
        }

        Ok(WorldState {
            size,
            obstacles,
            hazards,
            goal,
            agent,
        })
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn width(&self) -> usize {
        self.size.width
    }

    pub fn height(&self) -> usize {
        self.size.height
    }

    pub fn goal(&self) -> Cell {
        self.goal
    }

    pub fn agent(&self) -> Cell {
        self.agent
    }

    pub fn is_obstacle(&self, cell: Cell) -> bool {
        self.obstacles.contains(&cell)
    }

    pub fn is_hazard(&self, cell: Cell) -> bool {
        self.hazards.contains(&cell)
    }

    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.is_obstacle(cell) || self.is_hazard(cell)
    }

    pub fn obstacles(&self) -> impl Iterator<Item = &Cell> {
        self.obstacles.iter()
    }

    pub fn hazards(&self) -> impl Iterator<Item = &Cell> {
        self.hazards.iter()
    }

    pub fn at_goal(&self) -> bool {
        self.agent == self.goal
    }

    /// Hazardous neighbours of the agent when every in-bounds neighbour is an
    /// obstacle or hazard, `None` otherwise.
    pub fn boxed_in_hazards(&self) -> Option<Vec<Cell>> {
        let neighbors: Vec<Cell> = self.agent.neighbors(self.size).collect();
        if neighbors.iter().all(|&n| self.is_blocked(n)) {
            Some(neighbors.into_iter().filter(|&n| self.is_hazard(n)).collect())
        } else {
            None
        }
    }

    /// Only the simulation driver moves the agent.
    pub(crate) fn set_agent(&mut self, cell: Cell) {
        self.agent = cell;
    }
}
