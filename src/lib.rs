//! # Grididdy - Belief-Driven Grid Exploration
//!
//! Grididdy simulates an agent crossing a small grid world toward a goal while
//! avoiding hidden hazards. The agent sees walls next to it and gets a single
//! bit per tick telling it whether any neighbouring cell is hazardous. From
//! that it maintains a probabilistic belief map and replans every tick.
//!
//! ## Key Features
//!
//! - **Belief Tracking**: deduction of unique hazards, accumulating suspicion, retraction
//! - **Risk-Aware Planning**: best-first search with a danger-inflated step cost
//! - **Exploration Policies**: frontier ranking and nearest-unknown information gain
//! - **Reproducible Episodes**: seeded world generation and JSON configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use grididdy::builders::SimulationBuilder;
//! use grididdy::planner::StrategyKind;
//!
//! let mut sim = SimulationBuilder::new()
//!     .size(8, 8)
//!     .entity_counts(6, 6)
//!     .seed(7)
//!     .strategy(StrategyKind::RiskWeighted)
//!     .build()
//!     .unwrap();
//!
//! let outcome = sim.run_episode().unwrap();
//! println!("{:?} after {} steps", outcome, sim.stats().steps);
//! ```
//!
//! ## Module Organization
//!
//! - [`belief`] - Per-cell belief map and the sensor update rule
//! - [`builders`] - Builder patterns for convenient simulation construction
//! - [`config`] - Serializable episode configuration
//! - [`error`] - Error types and result handling
//! - [`perception`] - What the agent senses from its current cell
//! - [`planner`] - Next-step planning strategies
//! - [`simulation`] - Tick loop, episode driver and statistics
//! - [`types`] - Grid coordinates and dimensions
//! - [`visits`] - Per-cell visit counts
//! - [`world`] - Ground-truth world state and random generation

pub mod belief;
pub mod builders;
pub mod config;
pub mod error;
pub mod perception;
pub mod planner;
pub mod simulation;
pub mod types;
pub mod visits;
pub mod world;

pub use belief::{BeliefMap, CellBelief, CellStatus};
pub use builders::SimulationBuilder;
pub use config::SimulationConfig;
pub use error::{GridError, Result};
pub use planner::{PlanStep, PlanningStrategy, StrategyKind};
pub use simulation::{EpisodeOutcome, EpisodeStats, Simulation, TickOutcome, TickReport};
pub use types::{Cell, GridSize};
pub use world::{WorldGenerator, WorldState};

#[cfg(test)]
mod tests;
