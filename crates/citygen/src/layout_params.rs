//! Data-driven generation parameters.
//!
//! Every distribution and threshold used by the layout generator, the
//! grid-area synthesizer and the building generator lives in one
//! [`LayoutParams`] value. It is built once (defaults, or JSON overrides via
//! [`LayoutParams::from_json_str`]) and passed by reference into the
//! generators; nothing reads process-wide tables.
//!
//! Per-zone tables are keyed by [`ZoneTag::key`](crate::city::ZoneTag::key)
//! strings (`"historical_center"`, `"ring_1"`, `"outskirts"`, ...) so that
//! individual zones can be overridden or left out independently.

use std::collections::BTreeMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::city::{BuildingType, DistrictType, ZoneTag};
use crate::error::CityGenError;

// ---------------------------------------------------------------------------
// Shared value types
// ---------------------------------------------------------------------------

/// Relative weights for each building type. Values need not sum to 1: any
/// mass below 1 means "no building".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingTypeWeights {
    pub apartment: f64,
    pub house: f64,
    pub office: f64,
    pub commercial: f64,
    pub factory: f64,
}

impl BuildingTypeWeights {
    pub const fn new(apartment: f64, house: f64, office: f64, commercial: f64, factory: f64) -> Self {
        Self {
            apartment,
            house,
            office,
            commercial,
            factory,
        }
    }

    pub fn get(&self, building_type: BuildingType) -> f64 {
        match building_type {
            BuildingType::Apartment => self.apartment,
            BuildingType::House => self.house,
            BuildingType::Office => self.office,
            BuildingType::Commercial => self.commercial,
            BuildingType::Factory => self.factory,
        }
    }

    pub fn set(&mut self, building_type: BuildingType, value: f64) {
        match building_type {
            BuildingType::Apartment => self.apartment = value,
            BuildingType::House => self.house = value,
            BuildingType::Office => self.office = value,
            BuildingType::Commercial => self.commercial = value,
            BuildingType::Factory => self.factory = value,
        }
    }

    pub fn total(&self) -> f64 {
        BuildingType::ALL.iter().map(|t| self.get(*t)).sum()
    }
}

/// Categorical distribution over district types for one ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistrictTypeWeights {
    pub residential: f64,
    pub commercial: f64,
    pub mixed: f64,
}

impl Default for DistrictTypeWeights {
    fn default() -> Self {
        Self {
            residential: 0.0,
            commercial: 0.0,
            mixed: 1.0,
        }
    }
}

impl DistrictTypeWeights {
    pub fn get(&self, district_type: DistrictType) -> f64 {
        match district_type {
            DistrictType::Residential => self.residential,
            DistrictType::Commercial => self.commercial,
            DistrictType::Mixed => self.mixed,
        }
    }
}

/// Inclusive `[min, max]` range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn check(&self, name: &str) -> Result<(), CityGenError> {
        if !(self.min.is_finite() && self.max.is_finite()) || self.min > self.max {
            return Err(CityGenError::InvalidParams(format!(
                "{name}: expected finite min <= max, got [{}, {}]",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// District count bounds for one ring, interpolated by city radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistrictCountRange {
    pub min: u32,
    pub max: u32,
}

// ---------------------------------------------------------------------------
// City bounds
// ---------------------------------------------------------------------------

/// Accepted city radius range (km).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CityParams {
    pub min_radius: f64,
    pub max_radius: f64,
}

impl Default for CityParams {
    fn default() -> Self {
        Self {
            min_radius: 1.0,
            max_radius: 15.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Zone boundaries
// ---------------------------------------------------------------------------

/// Historical center size as a fraction of the city radius.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoricalCenterParams {
    pub radius_fraction: Range,
}

impl Default for HistoricalCenterParams {
    fn default() -> Self {
        Self {
            radius_fraction: Range::new(0.10, 0.20),
        }
    }
}

/// Where the ring system ends and how it is subdivided.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RingSystemParams {
    /// Ring system ends at roughly this fraction of the city radius.
    pub end_fraction: f64,
    /// Uniform +/- variation applied to `end_fraction`.
    pub end_variation: f64,
    /// Ring count is 1 + the number of thresholds <= radius.
    pub ring_count_thresholds: Vec<f64>,
    /// Range of the random width factor drawn per ring.
    pub width_factor: Range,
}

impl Default for RingSystemParams {
    fn default() -> Self {
        Self {
            end_fraction: 0.65,
            end_variation: 0.05,
            ring_count_thresholds: vec![5.0, 10.0],
            width_factor: Range::new(0.8, 1.2),
        }
    }
}

/// Industrial zones placed along the cardinal directions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndustrialParams {
    /// Zone center distance as a fraction of the city radius.
    pub distance_fraction: f64,
    /// Zone radius as a fraction of the city radius.
    pub radius_fraction: f64,
    /// Below this radius only E/W zones are created; at or above, N/S/E/W.
    pub threshold_radius: f64,
}

impl Default for IndustrialParams {
    fn default() -> Self {
        Self {
            distance_fraction: 1.20,
            radius_fraction: 0.10,
            threshold_radius: 7.5,
        }
    }
}

// ---------------------------------------------------------------------------
// District centers
// ---------------------------------------------------------------------------

/// District placement per ring. Index 0 is ring 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DistrictParams {
    pub counts: Vec<DistrictCountRange>,
    /// City radii mapped to the min and max of `counts`.
    pub interpolation_radius: Range,
    pub type_distribution: Vec<DistrictTypeWeights>,
    /// Keep-out band from ring edges, as a fraction of the city radius.
    pub boundary_buffer_fraction: f64,
    /// Thin rings shrink the buffer to this fraction of the ring width.
    pub thin_ring_buffer_fraction: f64,
    /// Angular inset (radians) from each sector edge.
    pub sector_inset: f64,
}

impl Default for DistrictParams {
    fn default() -> Self {
        Self {
            counts: vec![
                DistrictCountRange { min: 6, max: 10 },
                DistrictCountRange { min: 8, max: 14 },
                DistrictCountRange { min: 10, max: 18 },
            ],
            interpolation_radius: Range::new(1.0, 15.0),
            type_distribution: vec![
                DistrictTypeWeights {
                    residential: 0.2,
                    commercial: 0.6,
                    mixed: 0.2,
                },
                DistrictTypeWeights {
                    residential: 0.3,
                    commercial: 0.3,
                    mixed: 0.4,
                },
                DistrictTypeWeights {
                    residential: 0.6,
                    commercial: 0.2,
                    mixed: 0.2,
                },
            ],
            boundary_buffer_fraction: 0.04,
            thin_ring_buffer_fraction: 0.2,
            sector_inset: 0.1,
        }
    }
}

impl DistrictParams {
    pub fn count_range(&self, ring_number: u32) -> Option<DistrictCountRange> {
        ring_index(ring_number).and_then(|i| self.counts.get(i).copied())
    }

    pub fn type_weights(&self, ring_number: u32) -> Option<&DistrictTypeWeights> {
        ring_index(ring_number).and_then(|i| self.type_distribution.get(i))
    }
}

fn ring_index(ring_number: u32) -> Option<usize> {
    (ring_number as usize).checked_sub(1)
}

// ---------------------------------------------------------------------------
// Building type tables
// ---------------------------------------------------------------------------

/// Building-type probabilities for each district type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DistrictBuildingProbabilities {
    pub residential: BuildingTypeWeights,
    pub commercial: BuildingTypeWeights,
    pub mixed: BuildingTypeWeights,
}

impl Default for DistrictBuildingProbabilities {
    fn default() -> Self {
        Self {
            residential: BuildingTypeWeights::new(0.60, 0.20, 0.05, 0.15, 0.0),
            commercial: BuildingTypeWeights::new(0.10, 0.0, 0.40, 0.50, 0.0),
            mixed: BuildingTypeWeights::new(0.35, 0.10, 0.25, 0.30, 0.0),
        }
    }
}

impl DistrictBuildingProbabilities {
    pub fn for_type(&self, district_type: DistrictType) -> &BuildingTypeWeights {
        match district_type {
            DistrictType::Residential => &self.residential,
            DistrictType::Commercial => &self.commercial,
            DistrictType::Mixed => &self.mixed,
        }
    }
}

/// Tables driving building type selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingTypeParams {
    /// Base probabilities per zone key. Zones missing here never get buildings.
    pub zone_probabilities: BTreeMap<String, BuildingTypeWeights>,
    pub district_probabilities: DistrictBuildingProbabilities,
    /// Weight of the district blend per zone key (0 = pure zone, 1 = pure
    /// district). Falls back to `"ring"` for rings, then `"default"`.
    pub district_influence_strength: BTreeMap<String, f64>,
    /// Gaussian sigma of district influence, as a fraction of the city radius.
    pub influence_sigma_fraction: f64,
    /// Influences at or below this value are discarded before normalizing.
    pub influence_threshold: f64,
}

impl Default for BuildingTypeParams {
    fn default() -> Self {
        let zone_probabilities = [
            ("historical_center", BuildingTypeWeights::new(0.15, 0.0, 0.40, 0.45, 0.0)),
            ("ring_1", BuildingTypeWeights::new(0.35, 0.0, 0.30, 0.35, 0.0)),
            ("ring_2", BuildingTypeWeights::new(0.45, 0.0, 0.20, 0.35, 0.0)),
            ("ring_3", BuildingTypeWeights::new(0.40, 0.15, 0.15, 0.30, 0.0)),
            ("outskirts", BuildingTypeWeights::new(0.10, 0.60, 0.10, 0.20, 0.0)),
            ("industrial", BuildingTypeWeights::new(0.0, 0.0, 0.15, 0.0, 0.85)),
            ("outside", BuildingTypeWeights::new(0.05, 0.70, 0.05, 0.20, 0.0)),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        let district_influence_strength = [
            ("historical_center", 0.0),
            ("ring_1", 0.4),
            ("ring_2", 0.6),
            ("ring_3", 0.8),
            ("outskirts", 0.5),
            ("industrial", 0.0),
            ("outside", 0.5),
            ("default", 0.5),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        Self {
            zone_probabilities,
            district_probabilities: DistrictBuildingProbabilities::default(),
            district_influence_strength,
            influence_sigma_fraction: 0.1,
            influence_threshold: 0.01,
        }
    }
}

impl BuildingTypeParams {
    pub fn zone_weights(&self, zone: ZoneTag) -> Option<&BuildingTypeWeights> {
        self.zone_probabilities.get(&zone.key())
    }

    /// Exact zone key, then `"ring"` for any ring, then `"default"`, then 0.5.
    pub fn influence_strength(&self, zone: ZoneTag) -> f64 {
        let table = &self.district_influence_strength;
        table
            .get(&zone.key())
            .or_else(|| zone.is_ring().then(|| table.get("ring")).flatten())
            .or_else(|| table.get("default"))
            .copied()
            .unwrap_or(0.5)
    }
}

// ---------------------------------------------------------------------------
// Density field
// ---------------------------------------------------------------------------

/// Shape of the building density field and the scan grid that samples it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityParams {
    /// Buildings per km² at the city center.
    pub center_density: f64,
    /// Gaussian sigma as a fraction of the city radius.
    pub sigma_factor: f64,
    /// Steepness of the exponential penalty beyond the city boundary.
    pub falloff_power: f64,
    /// Sampling disk radius as a fraction of the city radius.
    pub max_generation_radius: f64,
    /// Scan points per km along each axis.
    pub scan_resolution: f64,
    /// District attractor sigma as a fraction of the city radius.
    pub attractor_sigma_fraction: f64,
    /// Peak multiplicative boost of the strongest nearby attractor.
    pub attractor_strength: f64,
    pub outskirts_multiplier: f64,
    pub outside_multiplier: f64,
}

impl Default for DensityParams {
    fn default() -> Self {
        Self {
            center_density: 100.0,
            sigma_factor: 0.5,
            falloff_power: 20.0,
            max_generation_radius: 1.15,
            scan_resolution: 50.0,
            attractor_sigma_fraction: 0.05,
            attractor_strength: 0.3,
            outskirts_multiplier: 1.2,
            outside_multiplier: 0.8,
        }
    }
}

// ---------------------------------------------------------------------------
// Placement (chaos / order)
// ---------------------------------------------------------------------------

/// Chaos field and the jitter/separation rules that depend on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementParams {
    /// Chaos override per zone key. Zones missing here use the sigmoid.
    pub zone_chaos: BTreeMap<String, f64>,
    /// Normalized distance at which the sigmoid crosses 0.5.
    pub transition_center: f64,
    pub transition_sharpness: f64,
    /// Chaos values below this snap to a grid area.
    pub grid_snap_threshold: f64,
    /// Below this chaos, grid jitter uses `low_chaos_jitter`.
    pub low_chaos_cutoff: f64,
    /// Jitter as a fraction of spacing for nearly ordered zones.
    pub low_chaos_jitter: f64,
    /// Jitter per unit chaos, as a fraction of spacing.
    pub chaos_jitter_scale: f64,
    /// Free jitter half-width (km) for chaotic placement.
    pub chaotic_jitter: f64,
    /// Minimum building separation (km).
    pub min_building_distance: f64,
    /// Separation multiplier for zero-chaos zones.
    pub ordered_separation_factor: f64,
    /// Number of most recent buildings checked for separation.
    pub separation_window: usize,
}

impl Default for PlacementParams {
    fn default() -> Self {
        let zone_chaos = [
            ("historical_center", 0.9),
            ("ring_1", 0.6),
            ("ring_2", 0.3),
            ("ring_3", 0.05),
            ("outskirts", 0.0),
            ("industrial", 0.0),
            ("outside", 0.2),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        Self {
            zone_chaos,
            transition_center: 0.5,
            transition_sharpness: 10.0,
            grid_snap_threshold: 0.5,
            low_chaos_cutoff: 0.1,
            low_chaos_jitter: 0.02,
            chaos_jitter_scale: 0.15,
            chaotic_jitter: 0.025,
            min_building_distance: 0.005,
            ordered_separation_factor: 0.5,
            separation_window: 50,
        }
    }
}

impl PlacementParams {
    pub fn zone_chaos(&self, zone: ZoneTag) -> Option<f64> {
        self.zone_chaos.get(&zone.key()).copied()
    }
}

// ---------------------------------------------------------------------------
// Grid areas
// ---------------------------------------------------------------------------

/// Local ordered lattices used to snap low-chaos buildings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridAreaParams {
    /// Ring districts in zones with chaos above this get no grid area.
    pub chaos_cutoff: f64,
    pub max_rotation_degrees: f64,
    /// Lattice spacing range (km) per zone key.
    pub zone_spacing: BTreeMap<String, Range>,
    /// Spacing used when a zone has no entry in `zone_spacing`.
    pub default_spacing: Range,
    pub outskirts_count: usize,
    pub outside_count: usize,
    /// Radius of the "outside" anchor circle as a fraction of the city radius.
    pub outside_radius_fraction: f64,
}

impl Default for GridAreaParams {
    fn default() -> Self {
        let zone_spacing = [
            ("ring_1", Range::new(0.04, 0.06)),
            ("ring_2", Range::new(0.05, 0.08)),
            ("ring_3", Range::new(0.06, 0.10)),
            ("outskirts", Range::new(0.08, 0.12)),
            ("industrial", Range::new(0.12, 0.20)),
            ("outside", Range::new(0.10, 0.15)),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        Self {
            chaos_cutoff: 0.8,
            max_rotation_degrees: 15.0,
            zone_spacing,
            default_spacing: Range::new(0.06, 0.10),
            outskirts_count: 8,
            outside_count: 8,
            outside_radius_fraction: 1.05,
        }
    }
}

impl GridAreaParams {
    pub fn spacing(&self, zone: ZoneTag) -> Range {
        self.zone_spacing
            .get(&zone.key())
            .copied()
            .unwrap_or(self.default_spacing)
    }
}

// ---------------------------------------------------------------------------
// Top-level LayoutParams resource
// ---------------------------------------------------------------------------

/// Central resource holding every generation knob.
#[derive(Resource, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LayoutParams {
    pub city: CityParams,
    pub historical_center: HistoricalCenterParams,
    pub ring_system: RingSystemParams,
    pub industrial: IndustrialParams,
    pub districts: DistrictParams,
    pub building_types: BuildingTypeParams,
    pub density: DensityParams,
    pub placement: PlacementParams,
    pub grid_areas: GridAreaParams,
}

impl LayoutParams {
    /// Parse overrides from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, CityGenError> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Serialize to pretty JSON (e.g. to dump the effective configuration).
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }

    /// Check that the radius is usable under these parameters.
    pub fn check_radius(&self, radius: f64) -> Result<(), CityGenError> {
        let CityParams {
            min_radius,
            max_radius,
        } = self.city;
        if !radius.is_finite() || radius <= 0.0 || radius < min_radius || radius > max_radius {
            return Err(CityGenError::InvalidRadius {
                radius,
                min: min_radius,
                max: max_radius,
            });
        }
        Ok(())
    }

    /// Reject parameter sets that would break the zone invariants.
    pub fn validate(&self) -> Result<(), CityGenError> {
        let invalid = |msg: String| Err(CityGenError::InvalidParams(msg));

        if !(self.city.min_radius > 0.0 && self.city.min_radius <= self.city.max_radius) {
            return invalid(format!(
                "city radius bounds must satisfy 0 < min <= max, got [{}, {}]",
                self.city.min_radius, self.city.max_radius
            ));
        }

        let hist = self.historical_center.radius_fraction;
        hist.check("historical_center.radius_fraction")?;
        if hist.min <= 0.0 {
            return invalid("historical_center.radius_fraction.min must be > 0".to_string());
        }

        let rs = &self.ring_system;
        let ring_lo = rs.end_fraction - rs.end_variation;
        let ring_hi = rs.end_fraction + rs.end_variation;
        if rs.end_variation < 0.0 || ring_lo <= hist.max || ring_hi > 1.0 {
            return invalid(format!(
                "ring system end [{ring_lo}, {ring_hi}] must lie in ({}, 1]",
                hist.max
            ));
        }
        rs.width_factor.check("ring_system.width_factor")?;
        if rs.width_factor.min <= 0.0 {
            return invalid("ring_system.width_factor.min must be > 0".to_string());
        }
        if rs.ring_count_thresholds.windows(2).any(|w| w[1] < w[0]) {
            return invalid("ring_system.ring_count_thresholds must be sorted".to_string());
        }

        self.districts
            .interpolation_radius
            .check("districts.interpolation_radius")?;
        if let Some(bad) = self.districts.counts.iter().find(|c| c.min > c.max) {
            return invalid(format!(
                "district count range min {} exceeds max {}",
                bad.min, bad.max
            ));
        }

        let districts = &self.districts;
        if !(districts.boundary_buffer_fraction >= 0.0) {
            return invalid("districts.boundary_buffer_fraction must be >= 0".to_string());
        }
        // A larger fraction would let the shrunk buffer cross itself in thin rings.
        if !(0.0..=0.5).contains(&districts.thin_ring_buffer_fraction) {
            return invalid(format!(
                "districts.thin_ring_buffer_fraction must lie in [0, 0.5], got {}",
                districts.thin_ring_buffer_fraction
            ));
        }
        if !(districts.sector_inset >= 0.0) {
            return invalid("districts.sector_inset must be >= 0".to_string());
        }

        for (zone, range) in &self.grid_areas.zone_spacing {
            range.check(&format!("grid_areas.zone_spacing.{zone}"))?;
            if range.min <= 0.0 {
                return invalid(format!("grid spacing for {zone} must be > 0"));
            }
        }
        self.grid_areas
            .default_spacing
            .check("grid_areas.default_spacing")?;
        if self.grid_areas.default_spacing.min <= 0.0 {
            return invalid("grid_areas.default_spacing.min must be > 0".to_string());
        }

        let d = &self.density;
        if d.sigma_factor <= 0.0 || d.scan_resolution <= 0.0 || d.max_generation_radius <= 0.0 {
            return invalid(
                "density sigma_factor, scan_resolution and max_generation_radius must be > 0"
                    .to_string(),
            );
        }
        if d.attractor_sigma_fraction <= 0.0 || self.building_types.influence_sigma_fraction <= 0.0
        {
            return invalid("attractor and influence sigmas must be > 0".to_string());
        }

        let placement = &self.placement;
        if !(placement.min_building_distance >= 0.0 && placement.ordered_separation_factor >= 0.0) {
            return invalid(
                "placement min_building_distance and ordered_separation_factor must be >= 0"
                    .to_string(),
            );
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
