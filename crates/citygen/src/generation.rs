//! End-to-end generation entry points and the Bevy plugin wrapping them.
//!
//! [`generate_city`] is the plain-function pipeline (layout, then grid areas
//! and buildings). [`CityGenPlugin`] runs it once at `Startup` from a
//! [`CityGenRequest`] resource and publishes the result as a [`City`]
//! resource for downstream (rendering/reporting) systems.

use bevy::prelude::*;
use rand::Rng;

use crate::buildings::BuildingGenerator;
use crate::city::City;
use crate::city_rng::CityRng;
use crate::error::CityGenError;
use crate::layout::LayoutGenerator;
use crate::layout_params::LayoutParams;

/// Radius used when no request is inserted before the plugin is built.
pub const DEFAULT_RADIUS: f64 = 10.0;

/// Generate a complete city. Fails only on an invalid radius or invalid
/// parameters, before any random draws are made.
pub fn generate_city(
    radius: f64,
    params: &LayoutParams,
    rng: &mut CityRng,
) -> Result<City, CityGenError> {
    let mut city = LayoutGenerator::new(radius, params)?.generate(rng);
    BuildingGenerator::new(params).generate(&mut city, rng);
    Ok(city)
}

/// Generate `per_radius` cities for each radius, each from its own seed
/// drawn from a master RNG seeded with `seed`. All radii are validated up
/// front, together with the parameters, so that a bad entry fails the whole
/// batch before any work.
pub fn generate_batch(
    radii: &[f64],
    per_radius: usize,
    params: &LayoutParams,
    seed: u64,
) -> Result<Vec<City>, CityGenError> {
    params.validate()?;
    for &radius in radii {
        params.check_radius(radius)?;
    }

    let mut master = CityRng::from_seed_u64(seed);
    let mut cities = Vec::with_capacity(radii.len() * per_radius);
    for &radius in radii {
        for _ in 0..per_radius {
            let mut rng = CityRng::from_seed_u64(master.0.gen());
            cities.push(generate_city(radius, params, &mut rng)?);
        }
    }
    info!("Generated batch of {} cities", cities.len());
    Ok(cities)
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

/// What to generate at startup.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct CityGenRequest {
    pub radius: f64,
    /// `None` seeds from entropy, so every run differs.
    pub seed: Option<u64>,
}

impl Default for CityGenRequest {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            seed: None,
        }
    }
}

/// Runs the request once at startup and inserts the `City` resource.
pub fn generate_city_system(
    mut commands: Commands,
    request: Res<CityGenRequest>,
    params: Res<LayoutParams>,
) {
    let mut rng = CityRng::from_optional_seed(request.seed);
    match generate_city(request.radius, &params, &mut rng) {
        Ok(city) => {
            commands.insert_resource(city);
            commands.insert_resource(rng);
        }
        Err(e) => error!("City generation failed: {}", e),
    }
}

pub struct CityGenPlugin;

impl Plugin for CityGenPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LayoutParams>()
            .init_resource::<CityGenRequest>()
            .add_systems(Startup, generate_city_system);
    }
}
