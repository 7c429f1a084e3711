use bevy::prelude::*;

use super::types::{
    Building, BuildingType, DistrictCenter, DistrictType, IndustrialZone, PlacementStats, Ring,
    ZoneTag,
};
use crate::grid_areas::GridArea;

/// Padding around the city radius returned by [`City::bounds`]; industrial
/// zones sit at up to 120% of the radius.
const BOUNDS_PADDING_FRACTION: f64 = 0.3;

/// The generated city.
///
/// Zone boundaries partition `[0, radius]` without gaps:
/// `historical_center_radius == rings[0].inner_radius <= ... <=
/// rings[n-1].outer_radius <= outskirts_inner_radius <= outskirts_outer_radius
/// == radius`.
#[derive(Resource, Debug, Clone)]
pub struct City {
    radius: f64,
    pub historical_center_radius: f64,
    pub rings: Vec<Ring>,
    pub outskirts_inner_radius: f64,
    pub outskirts_outer_radius: f64,
    pub industrial_zones: Vec<IndustrialZone>,
    /// The district at the origin (ring 0), if the layout placed one.
    pub historical_center_district: Option<DistrictCenter>,
    pub buildings: Vec<Building>,
    pub grid_areas: Vec<GridArea>,
    pub placement_stats: PlacementStats,
}

impl City {
    /// Assemble a city from already-derived boundaries. The radius has been
    /// validated by the caller (see `LayoutParams::check_radius`).
    pub fn new(
        radius: f64,
        historical_center_radius: f64,
        rings: Vec<Ring>,
        outskirts_inner_radius: f64,
        industrial_zones: Vec<IndustrialZone>,
    ) -> Self {
        Self {
            radius,
            historical_center_radius,
            rings,
            outskirts_inner_radius,
            outskirts_outer_radius: radius,
            industrial_zones,
            historical_center_district: None,
            buildings: Vec::new(),
            grid_areas: Vec::new(),
            placement_stats: PlacementStats::default(),
        }
    }

    /// City radius in km.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn num_rings(&self) -> usize {
        self.rings.len()
    }

    pub fn ring(&self, ring_number: u32) -> Option<&Ring> {
        self.rings.iter().find(|r| r.ring_number == ring_number)
    }

    // -----------------------------------------------------------------------
    // Zone classification
    // -----------------------------------------------------------------------

    /// Classify a point. Industrial zones win over every radial band; the
    /// bands are inclusive on both edges and checked inside-out.
    pub fn zone_at(&self, x: f64, y: f64) -> ZoneTag {
        if self.industrial_zones.iter().any(|z| z.contains(x, y)) {
            return ZoneTag::Industrial;
        }

        let distance = x.hypot(y);
        if distance <= self.historical_center_radius {
            return ZoneTag::HistoricalCenter;
        }

        if let Some(ring) = self.rings.iter().find(|r| r.contains_distance(distance)) {
            return ZoneTag::Ring(ring.ring_number);
        }

        if distance >= self.outskirts_inner_radius && distance <= self.outskirts_outer_radius {
            return ZoneTag::Outskirts;
        }

        ZoneTag::Outside
    }

    // -----------------------------------------------------------------------
    // District lookups
    // -----------------------------------------------------------------------

    /// Historical district first, then rings in order, creation order within
    /// each ring.
    pub fn all_district_centers(&self) -> impl Iterator<Item = &DistrictCenter> + '_ {
        self.historical_center_district
            .iter()
            .chain(self.rings.iter().flat_map(|r| r.district_centers.iter()))
    }

    pub fn num_district_centers(&self) -> usize {
        self.all_district_centers().count()
    }

    /// Linear scan by id.
    pub fn district_by_id(&self, id: u32) -> Option<&DistrictCenter> {
        self.all_district_centers().find(|d| d.id == id)
    }

    pub fn districts_of_type(
        &self,
        district_type: DistrictType,
    ) -> impl Iterator<Item = &DistrictCenter> + '_ {
        self.all_district_centers()
            .filter(move |d| d.district_type == district_type)
    }

    // -----------------------------------------------------------------------
    // Buildings
    // -----------------------------------------------------------------------

    /// Append a building. Fields are trusted as supplied.
    pub fn add_building(&mut self, building: Building) {
        self.buildings.push(building);
    }

    pub fn buildings_of_type(
        &self,
        building_type: BuildingType,
    ) -> impl Iterator<Item = &Building> + '_ {
        self.buildings
            .iter()
            .filter(move |b| b.building_type == building_type)
    }

    pub fn buildings_in_zone(&self, zone: ZoneTag) -> impl Iterator<Item = &Building> + '_ {
        self.buildings.iter().filter(move |b| b.zone == zone)
    }

    // -----------------------------------------------------------------------
    // Geometry
    // -----------------------------------------------------------------------

    /// Square `(min_x, min_y, max_x, max_y)` of half-size `radius * 1.3`.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let half = self.radius * (1.0 + BOUNDS_PADDING_FRACTION);
        (-half, -half, half, half)
    }
}
