//! District influence on a building position.
//!
//! Each district contributes `exp(-d² / 2σ²)`. Contributions at or below the
//! threshold are dropped, the rest are normalized to sum to 1. The primary
//! district is the highest weight; equal weights resolve to the lowest id.

use std::collections::BTreeMap;

use crate::city::DistrictCenter;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistrictInfluence {
    pub weights: BTreeMap<u32, f64>,
    pub primary: Option<u32>,
}

impl DistrictInfluence {
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

pub fn district_influence<'a>(
    districts: impl IntoIterator<Item = &'a DistrictCenter>,
    x: f64,
    y: f64,
    sigma: f64,
    threshold: f64,
) -> DistrictInfluence {
    let two_sigma_sq = 2.0 * sigma * sigma;
    let mut weights: BTreeMap<u32, f64> = districts
        .into_iter()
        .filter_map(|d| {
            let dx = x - d.x;
            let dy = y - d.y;
            let influence = (-(dx * dx + dy * dy) / two_sigma_sq).exp();
            (influence > threshold).then_some((d.id, influence))
        })
        .collect();

    let total: f64 = weights.values().sum();
    if total <= 0.0 {
        return DistrictInfluence::default();
    }
    for w in weights.values_mut() {
        *w /= total;
    }

    // BTreeMap iterates ids ascending; strict `>` keeps the lowest id on ties.
    let mut primary: Option<(u32, f64)> = None;
    for (&id, &w) in &weights {
        if primary.map_or(true, |(_, best)| w > best) {
            primary = Some((id, w));
        }
    }

    DistrictInfluence {
        weights,
        primary: primary.map(|(id, _)| id),
    }
}
