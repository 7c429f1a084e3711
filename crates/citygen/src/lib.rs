//! Procedural city layout generation.
//!
//! From a single radius (km) this crate derives concentric zones (historical
//! center, rings, outskirts), industrial zones and district centers, then
//! samples individual buildings from a density field and places them either
//! on local grids or freely depending on a chaos/order field.
//!
//! ```ignore
//! let params = LayoutParams::default();
//! let mut rng = CityRng::from_seed_u64(42);
//! let city = generate_city(10.0, &params, &mut rng)?;
//! println!("{}", city.summary().to_json());
//! ```

pub mod buildings;
pub mod city;
pub mod city_rng;
pub mod error;
pub mod generation;
pub mod grid_areas;
pub mod layout;
pub mod layout_params;


pub use city::{City, CitySummary, ZoneTag};
pub use city_rng::CityRng;
pub use error::CityGenError;
pub use generation::{generate_batch, generate_city, CityGenPlugin, CityGenRequest};
pub use layout_params::LayoutParams;
