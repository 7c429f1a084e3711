//! Building type selection.
//!
//! Zone base weights are blended with a district mix weighted by influence:
//! `p(t) = (1 - s) * zone(t) + s * Σ_d influence(d) * district_table[type(d)](t)`,
//! where `s` is the zone's district influence strength. Weights summing above
//! 1 are normalized; mass below 1 is the chance that no building is placed.

use std::collections::HashMap;

use rand::Rng;

use super::influence::DistrictInfluence;
use crate::city::{BuildingType, DistrictType, ZoneTag};
use crate::city_rng::CityRng;
use crate::layout_params::{BuildingTypeParams, BuildingTypeWeights};

/// Effective weights for a candidate, or `None` when the zone has no table.
pub fn blended_weights(
    zone: ZoneTag,
    influence: &DistrictInfluence,
    district_types: &HashMap<u32, DistrictType>,
    params: &BuildingTypeParams,
) -> Option<BuildingTypeWeights> {
    let zone_weights = *params.zone_weights(zone)?;
    if influence.is_empty() {
        return Some(zone_weights);
    }

    let mut district_weights = BuildingTypeWeights::default();
    for (id, weight) in &influence.weights {
        let Some(district_type) = district_types.get(id) else {
            continue;
        };
        let table = params.district_probabilities.for_type(*district_type);
        for t in BuildingType::ALL {
            district_weights.set(t, district_weights.get(t) + weight * table.get(t));
        }
    }

    let strength = params.influence_strength(zone).clamp(0.0, 1.0);
    let mut blended = BuildingTypeWeights::default();
    for t in BuildingType::ALL {
        blended.set(
            t,
            (1.0 - strength) * zone_weights.get(t) + strength * district_weights.get(t),
        );
    }
    Some(blended)
}

/// Draw a type; `None` means "no building" (leftover mass or empty table).
pub fn select_building_type(weights: &BuildingTypeWeights, rng: &mut CityRng) -> Option<BuildingType> {
    let total: f64 = BuildingType::ALL.iter().map(|t| weights.get(*t).max(0.0)).sum();
    if total <= 0.0 {
        return None;
    }
    let scale = if total > 1.0 { 1.0 / total } else { 1.0 };

    let roll: f64 = rng.0.gen();
    let mut cumulative = 0.0;
    for t in BuildingType::ALL {
        cumulative += weights.get(t).max(0.0) * scale;
        if roll < cumulative {
            return Some(t);
        }
    }
    None
}
