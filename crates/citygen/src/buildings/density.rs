//! Building density field (buildings per km²).
//!
//! `density = center_density * exp(-d² / 2σ²)` with `σ = radius * sigma_factor`,
//! times an exponential penalty beyond the city boundary, times
//! `1 + attractor` where only the strongest district attractor counts, times a
//! small per-zone multiplier.

use crate::city::{City, DistrictCenter, ZoneTag};
use crate::layout_params::{DensityParams, LayoutParams};

pub struct DensityField<'a> {
    params: &'a DensityParams,
    districts: Vec<&'a DistrictCenter>,
    city_radius: f64,
    sigma: f64,
    attractor_sigma: f64,
}

impl<'a> DensityField<'a> {
    pub fn new(city: &'a City, params: &'a LayoutParams) -> Self {
        let density = &params.density;
        Self {
            params: density,
            districts: city.all_district_centers().collect(),
            city_radius: city.radius(),
            sigma: city.radius() * density.sigma_factor,
            attractor_sigma: city.radius() * density.attractor_sigma_fraction,
        }
    }

    /// Radial Gaussian with the boundary falloff, no attractors or zone terms.
    pub fn base_density(&self, x: f64, y: f64) -> f64 {
        let distance = x.hypot(y);
        let gaussian = (-(distance * distance) / (2.0 * self.sigma * self.sigma)).exp();
        let mut density = self.params.center_density * gaussian;

        if distance > self.city_radius {
            let excess = (distance - self.city_radius) / self.city_radius;
            density *= (-self.params.falloff_power * excess).exp();
        }
        density
    }

    /// Strongest single attractor (max, not sum), in `[0, attractor_strength]`.
    pub fn attractor_boost(&self, x: f64, y: f64) -> f64 {
        let two_sigma_sq = 2.0 * self.attractor_sigma * self.attractor_sigma;
        self.districts
            .iter()
            .map(|d| {
                let dx = x - d.x;
                let dy = y - d.y;
                self.params.attractor_strength * (-(dx * dx + dy * dy) / two_sigma_sq).exp()
            })
            .fold(0.0, f64::max)
    }

    pub fn zone_multiplier(&self, zone: ZoneTag) -> f64 {
        match zone {
            ZoneTag::Outskirts => self.params.outskirts_multiplier,
            ZoneTag::Outside => self.params.outside_multiplier,
            _ => 1.0,
        }
    }

    /// Full density for a point whose zone is already known.
    pub fn density_in_zone(&self, x: f64, y: f64, zone: ZoneTag) -> f64 {
        self.base_density(x, y) * (1.0 + self.attractor_boost(x, y)) * self.zone_multiplier(zone)
    }

    pub fn density(&self, city: &City, x: f64, y: f64) -> f64 {
        self.density_in_zone(x, y, city.zone_at(x, y))
    }
}
