use std::collections::HashMap;

use bevy::prelude::*;
use rand::Rng;

use super::density::DensityField;
use super::influence::district_influence;
use super::placement::{chaos_at, min_separation, place};
use super::sampling::{ScanGrid, SeparationWindow};
use super::type_selection::{blended_weights, select_building_type};
use crate::city::{Building, City, DistrictType, PlacementStats};
use crate::city_rng::CityRng;
use crate::grid_areas::{synthesize_grid_areas, GridArea};
use crate::layout_params::LayoutParams;

/// Fills a laid-out [`City`] with buildings.
///
/// Per scan cell: accept with probability `density * cell_area`, place
/// according to the local chaos factor, enforce the sliding-window minimum
/// separation, then classify the final position and draw a building type.
/// Candidates whose type draw lands in the "no building" mass are dropped.
pub struct BuildingGenerator<'a> {
    params: &'a LayoutParams,
    next_building_id: u32,
}

impl<'a> BuildingGenerator<'a> {
    pub fn new(params: &'a LayoutParams) -> Self {
        Self {
            params,
            next_building_id: 0,
        }
    }

    /// Derive grid areas, generate buildings and store both on the city.
    pub fn generate(&mut self, city: &mut City, rng: &mut CityRng) -> PlacementStats {
        info!("Generating buildings for city with radius {:.2} km...", city.radius());

        let grid_areas = synthesize_grid_areas(city, self.params, rng);
        let (buildings, stats) = self.generate_buildings(city, &grid_areas, rng);

        city.grid_areas = grid_areas;
        for building in buildings {
            city.add_building(building);
        }
        city.placement_stats = stats;

        info!(
            "Generated {} buildings ({} grid-aligned, {} chaotic) using {} grid areas",
            city.buildings.len(),
            stats.grid_aligned,
            stats.chaotic,
            city.grid_areas.len()
        );
        stats
    }

    fn generate_buildings(
        &mut self,
        city: &City,
        grid_areas: &[GridArea],
        rng: &mut CityRng,
    ) -> (Vec<Building>, PlacementStats) {
        let params = self.params;
        let radius = city.radius();
        let density = DensityField::new(city, params);
        let scan = ScanGrid::new(
            radius * params.density.max_generation_radius,
            params.density.scan_resolution,
        );
        let cell_area = scan.cell_area();
        debug!(
            "Scan grid: {}x{} cells, {:.6} km² per cell",
            scan.cells_per_axis(),
            scan.cells_per_axis(),
            cell_area
        );

        let district_types: HashMap<u32, DistrictType> = city
            .all_district_centers()
            .map(|d| (d.id, d.district_type))
            .collect();
        let influence_sigma = radius * params.building_types.influence_sigma_fraction;

        let mut window = SeparationWindow::new(params.placement.separation_window);
        let mut stats = PlacementStats::default();
        let mut buildings = Vec::new();

        for (x, y) in scan.points() {
            let zone = city.zone_at(x, y);
            let probability = density.density_in_zone(x, y, zone) * cell_area;
            if rng.0.gen::<f64>() >= probability {
                continue;
            }

            let chaos = chaos_at(zone, x.hypot(y), radius, params);
            let placement = place(x, y, chaos, grid_areas, &params.placement, rng);
            if !window.is_clear(
                placement.x,
                placement.y,
                min_separation(chaos, &params.placement),
            ) {
                continue;
            }
            window.push(placement.x, placement.y);

            let final_zone = city.zone_at(placement.x, placement.y);
            let influence = district_influence(
                city.all_district_centers(),
                placement.x,
                placement.y,
                influence_sigma,
                params.building_types.influence_threshold,
            );
            let Some(weights) =
                blended_weights(final_zone, &influence, &district_types, &params.building_types)
            else {
                continue;
            };
            let Some(building_type) = select_building_type(&weights, rng) else {
                continue;
            };

            if placement.mode.is_grid_aligned() {
                stats.grid_aligned += 1;
            } else {
                stats.chaotic += 1;
            }

            buildings.push(Building {
                id: self.take_building_id(),
                x: placement.x,
                y: placement.y,
                building_type,
                zone: final_zone,
                primary_district: influence.primary,
                district_influences: influence.weights,
            });
        }

        (buildings, stats)
    }

    fn take_building_id(&mut self) -> u32 {
        let id = self.next_building_id;
        self.next_building_id += 1;
        id
    }
}
