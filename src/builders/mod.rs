//! # Builders Module
//!
//! Fluent construction of simulations, either over a random world drawn from
//! the configuration or over a hand-placed scripted world.

pub mod simulation;

pub use simulation::SimulationBuilder;
