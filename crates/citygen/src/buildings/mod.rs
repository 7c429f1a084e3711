//! Building generation: density sampling, chaos/order placement and type
//! selection.
//!
//! ## Pipeline
//!
//! 1. Derive grid areas from the finished layout (`grid_areas`).
//! 2. Walk a regular scan grid over the sampling disk; each cell becomes a
//!    candidate with probability `density * cell_area` (`density`,
//!    `sampling`).
//! 3. Place the candidate grid-snapped or freely jittered depending on the
//!    zone's chaos factor (`placement`).
//! 4. Drop it if it lands too close to one of the most recently accepted
//!    positions (`sampling::SeparationWindow`).
//! 5. Weigh nearby districts (`influence`) and draw a building type from the
//!    zone/district blend (`type_selection`).

pub mod density;
pub mod generator;
pub mod influence;
pub mod placement;
pub mod sampling;
pub mod type_selection;

pub use generator::BuildingGenerator;
pub use placement::{chaos_at, PlacementMode};
