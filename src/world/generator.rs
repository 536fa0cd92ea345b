use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use tracing::debug;

use crate::error::{GridError, Result};
use crate::types::{Cell, GridSize};
use crate::world::WorldState;

/// Rejection-sampling scatterer for obstacles, hazards, goal and agent
pub struct WorldGenerator {
    size: GridSize,
    obstacle_count: usize,
    hazard_count: usize,
    max_attempts: usize,
    rng: StdRng,
}

impl WorldGenerator {
    pub fn new(size: GridSize, obstacle_count: usize, hazard_count: usize) -> Self {
        WorldGenerator {
            size,
            obstacle_count,
            hazard_count,
            max_attempts: 10_000,
            rng: StdRng::from_entropy(),
        }
    }

    /// Fix the RNG seed so the layout is reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Bound on draws per placed entity
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn generate(&mut self) -> Result<WorldState> {
        check_capacity(self.size, self.obstacle_count, self.hazard_count)?;

        let mut taken = HashSet::new();
        let obstacles = self.place_set("obstacle", self.obstacle_count, &mut taken)?;
        let hazards = self.place_set("hazard", self.hazard_count, &mut taken)?;
        let goal = self.place_unique("goal", &taken)?;
        taken.insert(goal);
        let agent = self.place_unique("agent", &taken)?;

        debug!(
            obstacles = obstacles.len(),
            hazards = hazards.len(),
            %goal,
            %agent,
            "generated world"
        );
        WorldState::new(self.size, obstacles, hazards, goal, agent)
    }

    fn place_set(
        &mut self,
        name: &str,
        count: usize,
        taken: &mut HashSet<Cell>,
    ) -> Result<Vec<Cell>> {
        let mut placed = Vec::with_capacity(count);
        for _ in 0..count {
            let cell = self.place_unique(name, taken)?;
            taken.insert(cell);
            placed.push(cell);
        }
        Ok(placed)
    }

    fn place_unique(&mut self, name: &str, exclude: &HashSet<Cell>) -> Result<Cell> {
        for _ in 0..self.max_attempts {
            let cell = Cell::new(
                self.rng.gen_range(0..self.size.width),
                self.rng.gen_range(0..self.size.height),
            );
            if !exclude.contains(&cell) {
                return Ok(cell);
            }
        }
        Err(GridError::invalid_configuration(
            name.to_string(),
            format!("could not place after {} attempts", self.max_attempts),
        ))
    }
}

/// Reject grids that cannot give every obstacle, hazard, the goal and the
/// agent a distinct cell. Sizes that overflow `usize` are rejected too.
pub(crate) fn check_capacity(
    size: GridSize,
    obstacle_count: usize,
    hazard_count: usize,
) -> Result<()> {
    if size.width == 0 || size.height == 0 {
        return Err(GridError::invalid_configuration(
            "size".to_string(),
            format!("grid must be at least 1x1, got {}x{}", size.width, size.height),
        ));
    }
    let area = size.area().ok_or_else(|| {
        GridError::invalid_configuration(
            "size".to_string(),
            format!("{}x{} grid has too many cells", size.width, size.height),
        )
    })?;
    let required = obstacle_count
        .checked_add(hazard_count)
        .and_then(|n| n.checked_add(2));
    match required {
        Some(required) if required <= area => Ok(()),
        _ => Err(GridError::invalid_configuration(
            "obstacle_count".to_string(),
            format!(
                "{} obstacles, {} hazards, goal and agent do not fit in {} cells",
                obstacle_count, hazard_count, area
            ),
        )),
    }
}
