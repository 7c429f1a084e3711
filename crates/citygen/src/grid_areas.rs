//! Grid areas: local rotated lattices that low-chaos buildings snap onto.
//!
//! Anchors are derived once per generation run from the finished layout:
//!
//! - one per ring district whose zone is ordered enough (chaos at or below
//!   the configured cutoff), never in the historical center,
//! - a fixed number evenly spaced on the outskirts mid-radius,
//! - the same number just outside the city boundary,
//! - one at the center of each industrial zone.
//!
//! Each area owns a random rotation and spacing; [`GridArea::snap`] is a pure
//! function of those.

use std::f64::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::buildings::placement::chaos_at;
use crate::city::{City, ZoneTag};
use crate::city_rng::CityRng;
use crate::layout_params::LayoutParams;

/// A local ordered lattice centered on an anchor point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridArea {
    pub id: u32,
    pub center_x: f64,
    pub center_y: f64,
    /// Lattice rotation in radians.
    pub rotation: f64,
    /// Lattice spacing in km.
    pub spacing: f64,
    pub zone: ZoneTag,
}

impl GridArea {
    /// Nearest lattice point: rotate into the local frame, round each
    /// coordinate to a multiple of `spacing`, rotate back.
    pub fn snap(&self, x: f64, y: f64) -> (f64, f64) {
        let (sin, cos) = self.rotation.sin_cos();
        let dx = x - self.center_x;
        let dy = y - self.center_y;

        let local_x = dx * cos + dy * sin;
        let local_y = -dx * sin + dy * cos;

        let snapped_x = (local_x / self.spacing).round() * self.spacing;
        let snapped_y = (local_y / self.spacing).round() * self.spacing;

        (
            self.center_x + snapped_x * cos - snapped_y * sin,
            self.center_y + snapped_x * sin + snapped_y * cos,
        )
    }

    pub fn distance_squared_to(&self, x: f64, y: f64) -> f64 {
        let dx = x - self.center_x;
        let dy = y - self.center_y;
        dx * dx + dy * dy
    }
}

/// Area whose center is closest to `(x, y)`; first one wins on ties.
pub fn nearest_grid_area(areas: &[GridArea], x: f64, y: f64) -> Option<&GridArea> {
    areas.iter().min_by(|a, b| {
        a.distance_squared_to(x, y)
            .partial_cmp(&b.distance_squared_to(x, y))
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

/// Derive all grid areas for a finished layout.
pub fn synthesize_grid_areas(city: &City, params: &LayoutParams, rng: &mut CityRng) -> Vec<GridArea> {
    let grid_params = &params.grid_areas;
    let mut builder = GridAreaBuilder {
        params,
        areas: Vec::new(),
    };

    // Ordered ring districts
    for ring in &city.rings {
        for district in &ring.district_centers {
            let zone = city.zone_at(district.x, district.y);
            if zone == ZoneTag::HistoricalCenter {
                continue;
            }
            let chaos = chaos_at(zone, district.x.hypot(district.y), city.radius(), params);
            if chaos <= grid_params.chaos_cutoff {
                builder.push(district.x, district.y, zone, rng);
            }
        }
    }

    // Outskirts ring
    let outskirts_mid = (city.outskirts_inner_radius + city.outskirts_outer_radius) / 2.0;
    builder.push_circle(outskirts_mid, grid_params.outskirts_count, ZoneTag::Outskirts, rng);

    // Just beyond the boundary
    let outside_radius = city.radius() * grid_params.outside_radius_fraction;
    builder.push_circle(outside_radius, grid_params.outside_count, ZoneTag::Outside, rng);

    for zone in &city.industrial_zones {
        builder.push(zone.x, zone.y, ZoneTag::Industrial, rng);
    }

    builder.areas
}

struct GridAreaBuilder<'a> {
    params: &'a LayoutParams,
    areas: Vec<GridArea>,
}

impl GridAreaBuilder<'_> {
    fn push(&mut self, x: f64, y: f64, zone: ZoneTag, rng: &mut CityRng) {
        let max_rotation = self.params.grid_areas.max_rotation_degrees.abs().to_radians();
        let spacing = self.params.grid_areas.spacing(zone);

        let rotation = rng.0.gen_range(-max_rotation..=max_rotation);
        let spacing = rng.0.gen_range(spacing.min..=spacing.max);

        self.areas.push(GridArea {
            id: self.areas.len() as u32,
            center_x: x,
            center_y: y,
            rotation,
            spacing,
            zone,
        });
    }

    fn push_circle(&mut self, radius: f64, count: usize, zone: ZoneTag, rng: &mut CityRng) {
        for i in 0..count {
            let angle = i as f64 * TAU / count as f64;
            self.push(radius * angle.cos(), radius * angle.sin(), zone, rng);
        }
    }
}
