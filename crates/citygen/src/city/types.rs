//! Plain data types owned by a [`City`](super::City).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Zone classification
// =============================================================================

/// Region classification driving building-type probabilities and chaos level.
///
/// Serializes as its [`key`](ZoneTag::key) string, the same form the
/// configuration tables use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ZoneTag {
    HistoricalCenter,
    /// 1-based ring number.
    Ring(u32),
    Outskirts,
    Industrial,
    Outside,
}

impl ZoneTag {
    /// Stable key used by every per-zone configuration table.
    pub fn key(&self) -> String {
        match self {
            ZoneTag::HistoricalCenter => "historical_center".to_string(),
            ZoneTag::Ring(n) => format!("ring_{n}"),
            ZoneTag::Outskirts => "outskirts".to_string(),
            ZoneTag::Industrial => "industrial".to_string(),
            ZoneTag::Outside => "outside".to_string(),
        }
    }

    /// Inverse of [`ZoneTag::key`].
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "historical_center" => Some(ZoneTag::HistoricalCenter),
            "outskirts" => Some(ZoneTag::Outskirts),
            "industrial" => Some(ZoneTag::Industrial),
            "outside" => Some(ZoneTag::Outside),
            _ => key
                .strip_prefix("ring_")
                .and_then(|n| n.parse::<u32>().ok())
                .filter(|n| *n > 0)
                .map(ZoneTag::Ring),
        }
    }

    pub fn is_ring(&self) -> bool {
        matches!(self, ZoneTag::Ring(_))
    }
}

impl fmt::Display for ZoneTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl From<ZoneTag> for String {
    fn from(zone: ZoneTag) -> Self {
        zone.key()
    }
}

impl TryFrom<String> for ZoneTag {
    type Error = String;

    fn try_from(key: String) -> Result<Self, Self::Error> {
        ZoneTag::from_key(&key).ok_or_else(|| format!("unknown zone key '{key}'"))
    }
}

// =============================================================================
// District and building types
// =============================================================================

/// Character of a district center, used to bias nearby building types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistrictType {
    Residential,
    Commercial,
    Mixed,
}

impl DistrictType {
    pub const ALL: [DistrictType; 3] = [
        DistrictType::Residential,
        DistrictType::Commercial,
        DistrictType::Mixed,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DistrictType::Residential => "residential",
            DistrictType::Commercial => "commercial",
            DistrictType::Mixed => "mixed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingType {
    Apartment,
    House,
    Office,
    Commercial,
    Factory,
}

impl BuildingType {
    pub const ALL: [BuildingType; 5] = [
        BuildingType::Apartment,
        BuildingType::House,
        BuildingType::Office,
        BuildingType::Commercial,
        BuildingType::Factory,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BuildingType::Apartment => "apartment",
            BuildingType::House => "house",
            BuildingType::Office => "office",
            BuildingType::Commercial => "commercial",
            BuildingType::Factory => "factory",
        }
    }
}

/// Compass direction of an industrial zone relative to the city center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardinalDirection {
    N,
    S,
    E,
    W,
}

impl CardinalDirection {
    /// Polar angle (radians, counter-clockwise from east).
    pub fn angle(&self) -> f64 {
        use std::f64::consts::{FRAC_PI_2, PI};
        match self {
            CardinalDirection::E => 0.0,
            CardinalDirection::N => FRAC_PI_2,
            CardinalDirection::W => PI,
            CardinalDirection::S => 3.0 * FRAC_PI_2,
        }
    }
}

// =============================================================================
// Layout elements
// =============================================================================

/// A point attractor inside a ring (or the historical center).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictCenter {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    /// Owning ring number; 0 for the historical center.
    pub ring: u32,
    /// Polar angle in radians, informational only.
    pub angle: f64,
    pub district_type: DistrictType,
}

impl DistrictCenter {
    pub fn distance_to(&self, other: &DistrictCenter) -> f64 {
        self.distance_to_point(other.x, other.y)
    }

    pub fn distance_to_point(&self, x: f64, y: f64) -> f64 {
        (self.x - x).hypot(self.y - y)
    }
}

/// A circular industrial area placed along a cardinal direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustrialZone {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub direction: CardinalDirection,
}

impl IndustrialZone {
    /// Circular containment, boundary inclusive.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (x - self.x).hypot(y - self.y) <= self.radius
    }
}

/// An annulus between two radii.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    pub inner_radius: f64,
    pub outer_radius: f64,
    /// 1-based.
    pub ring_number: u32,
    pub district_centers: Vec<DistrictCenter>,
}

impl Ring {
    pub fn new(inner_radius: f64, outer_radius: f64, ring_number: u32) -> Self {
        Self {
            inner_radius,
            outer_radius,
            ring_number,
            district_centers: Vec::new(),
        }
    }

    pub fn width(&self) -> f64 {
        self.outer_radius - self.inner_radius
    }

    /// Inclusive band test on distance from the origin.
    pub fn contains_distance(&self, distance: f64) -> bool {
        distance >= self.inner_radius && distance <= self.outer_radius
    }
}

// =============================================================================
// Buildings
// =============================================================================

/// A single generated building. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub building_type: BuildingType,
    pub zone: ZoneTag,
    /// District with the highest normalized influence, if any.
    pub primary_district: Option<u32>,
    /// District id -> normalized influence. Sums to 1 or is empty.
    pub district_influences: BTreeMap<u32, f64>,
}

/// Grid-aligned vs. chaotic placement counts for one generation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementStats {
    /// Buildings snapped to a grid area's lattice (with or without jitter).
    pub grid_aligned: usize,
    /// Buildings placed with free jitter around the sampled point.
    pub chaotic: usize,
}

impl PlacementStats {
    pub fn total(&self) -> usize {
        self.grid_aligned + self.chaotic
    }
}
