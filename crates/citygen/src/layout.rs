//! Layout generation: zone boundaries, industrial zones and district centers.
//!
//! Boundaries are derived sequentially from the center outwards so that the
//! zones partition `[0, radius]` with no gaps or overlaps by construction:
//!
//! 1. historical center `[0, h]`, `h = radius * U(hist_min, hist_max)`
//! 2. ring system end `e = radius * (end_fraction + U(-variation, variation))`
//! 3. `n` rings subdividing `[h, e]`, widths drawn per ring and normalized;
//!    the last ring's outer edge is pinned to `e`
//! 4. outskirts `[e, radius]`
//!
//! District centers are then scattered per ring, one per equal angular sector.

use std::f64::consts::TAU;

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::city::{
    CardinalDirection, City, DistrictCenter, DistrictType, IndustrialZone, Ring,
};
use crate::city_rng::CityRng;
use crate::error::CityGenError;
use crate::layout_params::LayoutParams;

/// Zone boundaries before they are turned into a [`City`].
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneBoundaries {
    pub historical_center_end: f64,
    /// `(inner, outer)` per ring, contiguous.
    pub rings: Vec<(f64, f64)>,
    pub outskirts_start: f64,
    pub outskirts_end: f64,
}

/// Generates the layout of a city of a given radius.
pub struct LayoutGenerator<'a> {
    city_radius: f64,
    params: &'a LayoutParams,
    buffer_distance: f64,
    next_district_id: u32,
}

impl<'a> LayoutGenerator<'a> {
    /// Fails with [`CityGenError::InvalidRadius`] or
    /// [`CityGenError::InvalidParams`] before any work is done.
    pub fn new(city_radius: f64, params: &'a LayoutParams) -> Result<Self, CityGenError> {
        params.check_radius(city_radius)?;
        params.validate()?;
        Ok(Self {
            city_radius,
            params,
            buffer_distance: city_radius * params.districts.boundary_buffer_fraction,
            next_district_id: 0,
        })
    }

    /// Build the full layout. The returned city has no buildings yet.
    pub fn generate(&mut self, rng: &mut CityRng) -> City {
        let boundaries = self.generate_zone_boundaries(rng);
        debug!(
            "Layout boundaries for r={:.2}: historical {:.3}, rings {:?}, outskirts {:.3}-{:.3}",
            self.city_radius,
            boundaries.historical_center_end,
            boundaries.rings,
            boundaries.outskirts_start,
            boundaries.outskirts_end
        );

        let rings = boundaries
            .rings
            .iter()
            .enumerate()
            .map(|(i, &(inner, outer))| Ring::new(inner, outer, i as u32 + 1))
            .collect();

        let mut city = City::new(
            self.city_radius,
            boundaries.historical_center_end,
            rings,
            boundaries.outskirts_start,
            self.generate_industrial_zones(),
        );

        // The historical center district is always mixed and sits at the origin.
        city.historical_center_district = Some(DistrictCenter {
            id: self.take_district_id(),
            x: 0.0,
            y: 0.0,
            ring: 0,
            angle: 0.0,
            district_type: DistrictType::Mixed,
        });

        for i in 0..city.rings.len() {
            let centers = self.generate_district_centers_for_ring(&city.rings[i], rng);
            city.rings[i].district_centers = centers;
        }

        info!(
            "Generated layout: radius {:.2} km, {} rings, {} districts, {} industrial zones",
            self.city_radius,
            city.num_rings(),
            city.num_district_centers(),
            city.industrial_zones.len()
        );

        city
    }

    // -----------------------------------------------------------------------
    // Zone boundaries
    // -----------------------------------------------------------------------

    pub fn generate_zone_boundaries(&self, rng: &mut CityRng) -> ZoneBoundaries {
        let hist = self.params.historical_center.radius_fraction;
        let historical_center_end = self.city_radius * rng.0.gen_range(hist.min..=hist.max);

        let ring_system = &self.params.ring_system;
        let variation = ring_system.end_variation.abs();
        let ring_system_end =
            self.city_radius * (ring_system.end_fraction + rng.0.gen_range(-variation..=variation));

        let rings = self.generate_ring_boundaries(
            historical_center_end,
            ring_system_end,
            self.num_rings(),
            rng,
        );

        ZoneBoundaries {
            historical_center_end,
            rings,
            outskirts_start: ring_system_end,
            outskirts_end: self.city_radius,
        }
    }

    /// Contiguous rings filling `[start, end]` exactly.
    fn generate_ring_boundaries(
        &self,
        start: f64,
        end: f64,
        num_rings: usize,
        rng: &mut CityRng,
    ) -> Vec<(f64, f64)> {
        match num_rings {
            0 => Vec::new(),
            1 => vec![(start, end)],
            _ => {
                let range = self.params.ring_system.width_factor;
                let factors: Vec<f64> = (0..num_rings)
                    .map(|_| rng.0.gen_range(range.min..=range.max))
                    .collect();
                let total_factor: f64 = factors.iter().sum();
                let total_width = end - start;

                let mut boundaries = Vec::with_capacity(num_rings);
                let mut current = start;
                for (i, factor) in factors.iter().enumerate() {
                    // Pin the last edge to avoid a floating-point gap.
                    let outer = if i == num_rings - 1 {
                        end
                    } else {
                        current + factor / total_factor * total_width
                    };
                    boundaries.push((current, outer));
                    current = outer;
                }
                boundaries
            }
        }
    }

    /// 1 + number of thresholds at or below the radius.
    pub fn num_rings(&self) -> usize {
        ring_count_for_radius(self.city_radius, &self.params.ring_system.ring_count_thresholds)
    }

    // -----------------------------------------------------------------------
    // Industrial zones
    // -----------------------------------------------------------------------

    fn generate_industrial_zones(&self) -> Vec<IndustrialZone> {
        let industrial = &self.params.industrial;
        let distance = self.city_radius * industrial.distance_fraction;
        let zone_radius = self.city_radius * industrial.radius_fraction;

        let directions: &[CardinalDirection] = if self.city_radius < industrial.threshold_radius {
            &[CardinalDirection::E, CardinalDirection::W]
        } else {
            &[
                CardinalDirection::N,
                CardinalDirection::S,
                CardinalDirection::E,
                CardinalDirection::W,
            ]
        };

        directions
            .iter()
            .map(|&direction| {
                let angle = direction.angle();
                IndustrialZone {
                    x: distance * angle.cos(),
                    y: distance * angle.sin(),
                    radius: zone_radius,
                    direction,
                }
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // District centers
    // -----------------------------------------------------------------------

    /// Linear interpolation of the ring's count range over city radius,
    /// clamped, at least 1. Rings without a configured range get none.
    pub fn district_count(&self, ring_number: u32) -> usize {
        let Some(range) = self.params.districts.count_range(ring_number) else {
            return 0;
        };
        let interp = self.params.districts.interpolation_radius;
        let span = interp.max - interp.min;
        let t = if span > 0.0 {
            ((self.city_radius - interp.min) / span).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let count = range.min as f64 + t * (range.max as f64 - range.min as f64);
        (count.floor() as usize).max(1)
    }

    fn select_district_type(&self, ring_number: u32, rng: &mut CityRng) -> DistrictType {
        let Some(weights) = self.params.districts.type_weights(ring_number) else {
            return DistrictType::Mixed;
        };
        DistrictType::ALL
            .choose_weighted(&mut rng.0, |t| weights.get(*t).max(0.0))
            .copied()
            .unwrap_or(DistrictType::Mixed)
    }

    fn generate_district_centers_for_ring(
        &mut self,
        ring: &Ring,
        rng: &mut CityRng,
    ) -> Vec<DistrictCenter> {
        let num_centers = self.district_count(ring.ring_number);
        if num_centers == 0 {
            return Vec::new();
        }

        let angle_per_sector = TAU / num_centers as f64;
        let inset = self
            .params
            .districts
            .sector_inset
            .clamp(0.0, angle_per_sector / 2.0);

        let (min_r, max_r) = self.radial_placement_band(ring);

        let mut centers = Vec::with_capacity(num_centers);
        for i in 0..num_centers {
            let angle_start = i as f64 * angle_per_sector;
            let angle_end = angle_start + angle_per_sector;
            let angle = rng.0.gen_range(angle_start + inset..=angle_end - inset);
            let radius = rng.0.gen_range(min_r..=max_r);

            let district_type = self.select_district_type(ring.ring_number, rng);
            centers.push(DistrictCenter {
                id: self.take_district_id(),
                x: radius * angle.cos(),
                y: radius * angle.sin(),
                ring: ring.ring_number,
                angle,
                district_type,
            });
        }
        centers
    }

    /// `[inner + buffer, outer - buffer]`, shrinking the buffer for thin rings.
    fn radial_placement_band(&self, ring: &Ring) -> (f64, f64) {
        let min_r = ring.inner_radius + self.buffer_distance;
        let max_r = ring.outer_radius - self.buffer_distance;
        if min_r < max_r {
            return (min_r, max_r);
        }
        let buffer = self
            .buffer_distance
            .min(ring.width() * self.params.districts.thin_ring_buffer_fraction);
        (ring.inner_radius + buffer, ring.outer_radius - buffer)
    }

    fn take_district_id(&mut self) -> u32 {
        let id = self.next_district_id;
        self.next_district_id += 1;
        id
    }
}

/// Ring count as a step function of radius over sorted thresholds.
pub fn ring_count_for_radius(radius: f64, thresholds: &[f64]) -> usize {
    1 + thresholds.iter().filter(|&&t| radius >= t).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout_params::Range;

    fn generate(radius: f64, seed: u64) -> City {
        let params = LayoutParams::default();
        let mut rng = CityRng::from_seed_u64(seed);
        LayoutGenerator::new(radius, &params)
            .expect("valid radius")
            .generate(&mut rng)
    }

    #[test]
    fn test_ring_count_step_function() {
        let thresholds = [5.0, 10.0];
        assert_eq!(ring_count_for_radius(1.0, &thresholds), 1);
        assert_eq!(ring_count_for_radius(4.999, &thresholds), 1);
        assert_eq!(ring_count_for_radius(5.0, &thresholds), 2);
        assert_eq!(ring_count_for_radius(9.999, &thresholds), 2);
        assert_eq!(ring_count_for_radius(10.0, &thresholds), 3);
        assert_eq!(ring_count_for_radius(15.0, &thresholds), 3);
    }

    #[test]
    fn test_invalid_radius_rejected_before_work() {
        let params = LayoutParams::default();
        for radius in [0.0, -1.0, 0.5, 15.01, f64::INFINITY] {
            assert!(
                matches!(
                    LayoutGenerator::new(radius, &params),
                    Err(CityGenError::InvalidRadius { .. })
                ),
                "radius {radius} should be rejected"
            );
        }
    }

    #[test]
    fn test_invalid_params_rejected_before_work() {
        let mut params = LayoutParams::default();
        params.historical_center.radius_fraction = Range::new(0.5, 0.1);
        assert!(matches!(
            LayoutGenerator::new(5.0, &params),
            Err(CityGenError::InvalidParams(_))
        ));
    }

    #[test]
    fn test_boundaries_are_contiguous() {
        let city = generate(12.0, 7);
        assert_eq!(city.rings.len(), 3);
        assert!((city.rings[0].inner_radius - city.historical_center_radius).abs() < 1e-12);
        for pair in city.rings.windows(2) {
            assert_eq!(pair[0].outer_radius, pair[1].inner_radius);
        }
        assert_eq!(
            city.rings.last().map(|r| r.outer_radius),
            Some(city.outskirts_inner_radius)
        );
        assert_eq!(city.outskirts_outer_radius, 12.0);
    }

    #[test]
    fn test_boundary_fractions_within_ranges() {
        for seed in 0..50 {
            let city = generate(8.0, seed);
            let hist = city.historical_center_radius / 8.0;
            assert!((0.10..=0.20).contains(&hist), "seed {seed}: hist fraction {hist}");
            let end = city.outskirts_inner_radius / 8.0;
            assert!((0.60 - 1e-12..=0.70 + 1e-12).contains(&end), "seed {seed}: end {end}");
        }
    }

    #[test]
    fn test_industrial_zone_counts() {
        let small = generate(7.4, 1);
        let dirs: Vec<_> = small.industrial_zones.iter().map(|z| z.direction).collect();
        assert_eq!(dirs, vec![CardinalDirection::E, CardinalDirection::W]);

        let large = generate(7.5, 1);
        assert_eq!(large.industrial_zones.len(), 4);
        let north = large
            .industrial_zones
            .iter()
            .find(|z| z.direction == CardinalDirection::N)
            .expect("north zone");
        assert!(north.x.abs() < 1e-9);
        assert!((north.y - 7.5 * 1.2).abs() < 1e-9);
        assert!((north.radius - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_historical_district_is_first_and_mixed() {
        let city = generate(6.0, 3);
        let first = city.all_district_centers().next().expect("districts");
        assert_eq!(first.id, 0);
        assert_eq!(first.ring, 0);
        assert_eq!(first.district_type, DistrictType::Mixed);
        assert_eq!((first.x, first.y), (0.0, 0.0));
    }

    #[test]
    fn test_district_ids_are_unique_and_sequential() {
        let city = generate(15.0, 11);
        let ids: Vec<u32> = city.all_district_centers().map(|d| d.id).collect();
        let expected: Vec<u32> = (0..ids.len() as u32).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_district_count_interpolation() {
        let params = LayoutParams::default();
        let at = |radius: f64, ring: u32| {
            LayoutGenerator::new(radius, &params)
                .expect("valid")
                .district_count(ring)
        };
        assert_eq!(at(1.0, 1), 6);
        assert_eq!(at(15.0, 1), 10);
        assert_eq!(at(8.0, 2), 11); // 8 + 0.5 * 6
        assert_eq!(at(15.0, 3), 18);
        assert_eq!(at(15.0, 4), 0);
    }

    #[test]
    fn test_districts_lie_inside_their_ring_sector() {
        let city = generate(14.0, 5);
        for ring in &city.rings {
            let n = ring.district_centers.len();
            let sector = TAU / n as f64;
            for (i, d) in ring.district_centers.iter().enumerate() {
                let r = d.x.hypot(d.y);
                assert!(r >= ring.inner_radius && r <= ring.outer_radius);
                assert!(d.angle >= i as f64 * sector && d.angle <= (i + 1) as f64 * sector);
                assert_eq!(d.ring, ring.ring_number);
            }
        }
    }

    #[test]
    fn test_thin_ring_shrinks_buffer() {
        let params = LayoutParams::default();
        let generator = LayoutGenerator::new(10.0, &params).expect("valid");
        // buffer is 0.4 km; a 0.5 km ring cannot fit 2 * buffer.
        let ring = Ring::new(3.0, 3.5, 1);
        let (lo, hi) = generator.radial_placement_band(&ring);
        assert!((lo - 3.1).abs() < 1e-12);
        assert!((hi - 3.4).abs() < 1e-12);
    }

    #[test]
    fn test_district_type_without_distribution_is_mixed() {
        let mut params = LayoutParams::default();
        params.districts.type_distribution.clear();
        let mut rng = CityRng::from_seed_u64(0);
        let city = LayoutGenerator::new(10.0, &params)
            .expect("valid")
            .generate(&mut rng);
        assert!(city
            .all_district_centers()
            .all(|d| d.district_type == DistrictType::Mixed));
    }
}
