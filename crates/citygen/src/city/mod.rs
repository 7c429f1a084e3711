//! City model: the arena that owns every generated element.
//!
//! A [`City`] is produced by the layout generator and then filled with
//! buildings by the building generator. Cross references (building -> primary
//! district, district -> ring) are plain ids, never borrows.

mod model;
pub mod summary;
mod tests;
pub mod types;

pub use model::City;
pub use summary::{CitySummary, RingSummary};
pub use types::{
    Building, BuildingType, CardinalDirection, DistrictCenter, DistrictType, IndustrialZone,
    PlacementStats, Ring, ZoneTag,
};
