//! Local sensing: binary readings of the agent's four orthogonal neighbours.

use crate::types::Cell;
use crate::world::WorldState;

/// One tick's worth of readings taken at a position
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Observation {
    pub position: Cell,
    /// In-bounds neighbours that are obstacles
    pub obstacles: Vec<Cell>,
    /// Whether any neighbour is a hazard
    pub hazard_adjacent: bool,
}

/// Obstacles among the in-bounds orthogonal neighbours of `pos`
pub fn scan_obstacles(world: &WorldState, pos: Cell) -> Vec<Cell> {
    pos.neighbors(world.size())
        .filter(|&n| world.is_obstacle(n))
        .collect()
}

/// True iff at least one orthogonal neighbour of `pos` is a hazard.
/// Never says which one.
pub fn sense_hazard_adjacency(world: &WorldState, pos: Cell) -> bool {
    pos.neighbors(world.size()).any(|n| world.is_hazard(n))
}

pub fn observe(world: &WorldState, pos: Cell) -> Observation {
    Observation {
        position: pos,
        obstacles: scan_obstacles(world, pos),
        hazard_adjacent: sense_hazard_adjacency(world, pos),
    }
}
