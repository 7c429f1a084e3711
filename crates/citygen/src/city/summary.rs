//! Flat, serializable summary of a generated city for reporting collaborators.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::model::City;
use super::types::{BuildingType, DistrictType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingSummary {
    pub ring_number: u32,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub num_centers: usize,
    pub num_buildings: usize,
}

/// Counts and scalar geometry of a [`City`]. Every building/district type
/// appears in the per-type maps, with zero counts where nothing was placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitySummary {
    pub radius: f64,
    pub historical_center_radius: f64,
    pub outskirts_inner_radius: f64,
    pub outskirts_outer_radius: f64,
    pub num_rings: usize,
    pub num_district_centers: usize,
    pub num_industrial_zones: usize,
    pub num_grid_areas: usize,
    pub num_buildings: usize,
    pub buildings_by_type: BTreeMap<String, usize>,
    pub buildings_by_zone: BTreeMap<String, usize>,
    pub districts_by_type: BTreeMap<String, usize>,
    pub grid_aligned_buildings: usize,
    pub chaotic_buildings: usize,
    pub rings: Vec<RingSummary>,
}

impl CitySummary {
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }
}

impl City {
    pub fn summary(&self) -> CitySummary {
        let mut buildings_by_type: BTreeMap<String, usize> = BuildingType::ALL
            .iter()
            .map(|t| (t.name().to_string(), 0))
            .collect();
        let mut buildings_by_zone: BTreeMap<String, usize> = BTreeMap::new();
        for building in &self.buildings {
            *buildings_by_type
                .entry(building.building_type.name().to_string())
                .or_default() += 1;
            *buildings_by_zone.entry(building.zone.key()).or_default() += 1;
        }

        let mut districts_by_type: BTreeMap<String, usize> = DistrictType::ALL
            .iter()
            .map(|t| (t.name().to_string(), 0))
            .collect();
        for district in self.all_district_centers() {
            *districts_by_type
                .entry(district.district_type.name().to_string())
                .or_default() += 1;
        }

        let rings = self
            .rings
            .iter()
            .map(|ring| RingSummary {
                ring_number: ring.ring_number,
                inner_radius: ring.inner_radius,
                outer_radius: ring.outer_radius,
                num_centers: ring.district_centers.len(),
                num_buildings: buildings_by_zone
                    .get(&format!("ring_{}", ring.ring_number))
                    .copied()
                    .unwrap_or(0),
            })
            .collect();

        CitySummary {
            radius: self.radius(),
            historical_center_radius: self.historical_center_radius,
            outskirts_inner_radius: self.outskirts_inner_radius,
            outskirts_outer_radius: self.outskirts_outer_radius,
            num_rings: self.num_rings(),
            num_district_centers: self.num_district_centers(),
            num_industrial_zones: self.industrial_zones.len(),
            num_grid_areas: self.grid_areas.len(),
            num_buildings: self.buildings.len(),
            buildings_by_type,
            buildings_by_zone,
            districts_by_type,
            grid_aligned_buildings: self.placement_stats.grid_aligned,
            chaotic_buildings: self.placement_stats.chaotic,
            rings,
        }
    }
}
