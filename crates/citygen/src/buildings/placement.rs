//! Chaos/order placement policy.
//!
//! The chaos factor of a point is the zone's configured override when there
//! is one, otherwise a sigmoid of the normalized distance from the center:
//! `1 / (1 + exp(sharpness * (d / radius - center)))`.
//!
//! | chaos            | placement                                           |
//! |------------------|-----------------------------------------------------|
//! | `0`              | exact snap to the nearest grid area                 |
//! | `(0, 0.5)`       | snap, then jitter by `spacing * (0.02 or 0.15*chaos)` |
//! | `>= 0.5` / no grid | free jitter (~25 m) around the sampled point      |

use rand::Rng;

use crate::city::ZoneTag;
use crate::city_rng::CityRng;
use crate::grid_areas::{nearest_grid_area, GridArea};
use crate::layout_params::{LayoutParams, PlacementParams};

/// How a building position was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementMode {
    /// Exactly on a lattice point.
    GridExact,
    /// Lattice point plus spacing-scaled jitter.
    GridJittered,
    /// Free jitter around the sampled point.
    Chaotic,
}

impl PlacementMode {
    pub fn is_grid_aligned(&self) -> bool {
        !matches!(self, PlacementMode::Chaotic)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub mode: PlacementMode,
}

/// Logistic transition from chaotic (center) to ordered (edge).
pub fn sigmoid_chaos(normalized_distance: f64, transition_center: f64, sharpness: f64) -> f64 {
    1.0 / (1.0 + (sharpness * (normalized_distance - transition_center)).exp())
}

/// Zone override first, sigmoid fallback.
pub fn chaos_at(zone: ZoneTag, distance: f64, city_radius: f64, params: &LayoutParams) -> f64 {
    let placement = &params.placement;
    placement.zone_chaos(zone).unwrap_or_else(|| {
        sigmoid_chaos(
            distance / city_radius,
            placement.transition_center,
            placement.transition_sharpness,
        )
    })
}

/// Minimum separation for a candidate with the given chaos. Fully ordered
/// zones pack tighter so their lattices stay visible.
pub fn min_separation(chaos: f64, params: &PlacementParams) -> f64 {
    if chaos <= 0.0 {
        params.min_building_distance * params.ordered_separation_factor
    } else {
        params.min_building_distance
    }
}

/// Place a sampled point according to its chaos factor.
pub fn place(
    x: f64,
    y: f64,
    chaos: f64,
    grid_areas: &[GridArea],
    params: &PlacementParams,
    rng: &mut CityRng,
) -> Placement {
    if chaos < params.grid_snap_threshold {
        if let Some(area) = nearest_grid_area(grid_areas, x, y) {
            let (sx, sy) = area.snap(x, y);
            if chaos <= 0.0 {
                return Placement {
                    x: sx,
                    y: sy,
                    mode: PlacementMode::GridExact,
                };
            }

            let scale = if chaos < params.low_chaos_cutoff {
                params.low_chaos_jitter
            } else {
                params.chaos_jitter_scale * chaos
            };
            let jitter = area.spacing * scale;
            return Placement {
                x: sx + uniform_jitter(jitter, rng),
                y: sy + uniform_jitter(jitter, rng),
                mode: PlacementMode::GridJittered,
            };
        }
    }

    let jitter = params.chaotic_jitter;
    Placement {
        x: x + uniform_jitter(jitter, rng),
        y: y + uniform_jitter(jitter, rng),
        mode: PlacementMode::Chaotic,
    }
}

fn uniform_jitter(half_width: f64, rng: &mut CityRng) -> f64 {
    if half_width > 0.0 {
        rng.0.gen_range(-half_width..=half_width)
    } else {
        0.0
    }
}
