//! Property-based tests for layout invariants.
//!
//! Uses manual randomized testing with `rand` to verify:
//! - Zone boundaries partition [0, radius] contiguously
//! - Ring count and industrial zone count step functions
//! - `zone_at` is total and industrial containment wins
//! - Grid area snapping is idempotent

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::city::{City, ZoneTag};
use crate::city_rng::CityRng;
use crate::grid_areas::synthesize_grid_areas;
use crate::layout::LayoutGenerator;
use crate::layout_params::LayoutParams;

const NUM_LAYOUTS: usize = 200;
const SEED: u64 = 0xC17_1A70_u64;

fn random_layout(rng: &mut StdRng, params: &LayoutParams) -> City {
    let radius = rng.gen_range(1.0..=15.0);
    let mut city_rng = CityRng::from_seed_u64(rng.gen());
    LayoutGenerator::new(radius, params)
        .expect("radius in bounds")
        .generate(&mut city_rng)
}

// ---------------------------------------------------------------------------
// 1. Boundary partition
// ---------------------------------------------------------------------------

#[test]
fn test_prop_boundaries_contiguous_and_ordered() {
    let params = LayoutParams::default();
    let mut rng = StdRng::seed_from_u64(SEED);
    for _ in 0..NUM_LAYOUTS {
        let city = random_layout(&mut rng, &params);
        let r = city.radius();

        assert!(city.historical_center_radius > 0.0);
        let first = city.rings.first().expect("at least one ring");
        assert_eq!(first.inner_radius, city.historical_center_radius);

        for ring in &city.rings {
            assert!(ring.inner_radius < ring.outer_radius, "r={r}: {ring:?}");
        }
        for pair in city.rings.windows(2) {
            assert_eq!(pair[0].outer_radius, pair[1].inner_radius, "gap at r={r}");
        }

        let last = city.rings.last().expect("at least one ring");
        assert_eq!(last.outer_radius, city.outskirts_inner_radius);
        assert!(city.outskirts_inner_radius <= city.outskirts_outer_radius);
        assert_eq!(city.outskirts_outer_radius, r);
    }
}

#[test]
fn test_prop_every_distance_has_a_band() {
    let params = LayoutParams::default();
    let mut rng = StdRng::seed_from_u64(SEED ^ 1);
    for _ in 0..NUM_LAYOUTS {
        let mut city = random_layout(&mut rng, &params);
        // Without industrial zones every point within the radius is banded.
        city.industrial_zones.clear();
        for _ in 0..50 {
            let d = rng.gen_range(0.0..=city.radius());
            let zone = city.zone_at(d, 0.0);
            assert_ne!(zone, ZoneTag::Outside, "distance {d} unbanded");
            assert_ne!(zone, ZoneTag::Industrial);
        }
    }
}

// ---------------------------------------------------------------------------
// 2. Step functions
// ---------------------------------------------------------------------------

#[test]
fn test_prop_ring_count_step_function() {
    let params = LayoutParams::default();
    let mut rng = StdRng::seed_from_u64(SEED ^ 2);
    for _ in 0..NUM_LAYOUTS {
        let city = random_layout(&mut rng, &params);
        let r = city.radius();
        let expected = if r < 5.0 {
            1
        } else if r < 10.0 {
            2
        } else {
            3
        };
        assert_eq!(city.num_rings(), expected, "radius {r}");
    }
}

#[test]
fn test_prop_industrial_zone_count() {
    let params = LayoutParams::default();
    let mut rng = StdRng::seed_from_u64(SEED ^ 3);
    for _ in 0..NUM_LAYOUTS {
        let city = random_layout(&mut rng, &params);
        let expected = if city.radius() < 7.5 { 2 } else { 4 };
        assert_eq!(city.industrial_zones.len(), expected);
    }
}

// ---------------------------------------------------------------------------
// 3. Zone classification
// ---------------------------------------------------------------------------

#[test]
fn test_prop_zone_at_total_and_industrial_first() {
    let params = LayoutParams::default();
    let mut rng = StdRng::seed_from_u64(SEED ^ 4);
    for _ in 0..50 {
        let city = random_layout(&mut rng, &params);
        let (min_x, min_y, max_x, max_y) = city.bounds();
        for _ in 0..500 {
            let x = rng.gen_range(min_x..=max_x);
            let y = rng.gen_range(min_y..=max_y);
            let zone = city.zone_at(x, y);
            let in_industrial = city.industrial_zones.iter().any(|z| z.contains(x, y));
            assert_eq!(zone == ZoneTag::Industrial, in_industrial);

            let d = x.hypot(y);
            match zone {
                ZoneTag::HistoricalCenter => assert!(d <= city.historical_center_radius),
                ZoneTag::Ring(n) => {
                    let ring = city.ring(n).expect("ring exists");
                    assert!(ring.contains_distance(d));
                }
                ZoneTag::Outskirts => assert!(d >= city.outskirts_inner_radius && d <= city.radius()),
                ZoneTag::Outside => assert!(d > city.radius()),
                ZoneTag::Industrial => {}
            }
        }

        // Industrial centers classify as industrial even though they also
        // sit in a radial band or outside.
        for zone in &city.industrial_zones {
            assert_eq!(city.zone_at(zone.x, zone.y), ZoneTag::Industrial);
        }
    }
}

// ---------------------------------------------------------------------------
// 4. Grid areas
// ---------------------------------------------------------------------------

#[test]
fn test_prop_snap_idempotent_on_synthesized_areas() {
    let params = LayoutParams::default();
    let mut rng = StdRng::seed_from_u64(SEED ^ 5);
    for _ in 0..30 {
        let city = random_layout(&mut rng, &params);
        let mut city_rng = CityRng::from_seed_u64(rng.gen());
        let areas = synthesize_grid_areas(&city, &params, &mut city_rng);
        for area in &areas {
            for _ in 0..20 {
                let x = area.center_x + rng.gen_range(-2.0..2.0);
                let y = area.center_y + rng.gen_range(-2.0..2.0);
                let (sx, sy) = area.snap(x, y);
                let (ssx, ssy) = area.snap(sx, sy);
                assert!((sx - ssx).abs() < 1e-9 && (sy - ssy).abs() < 1e-9);
            }
        }
    }
}

#[test]
fn test_prop_grid_area_anchor_rules() {
    let params = LayoutParams::default();
    let mut rng = StdRng::seed_from_u64(SEED ^ 6);
    for _ in 0..30 {
        let city = random_layout(&mut rng, &params);
        let mut city_rng = CityRng::from_seed_u64(rng.gen());
        let areas = synthesize_grid_areas(&city, &params, &mut city_rng);

        let count = |zone: ZoneTag| areas.iter().filter(|a| a.zone == zone).count();
        assert_eq!(count(ZoneTag::Outskirts), params.grid_areas.outskirts_count);
        assert_eq!(count(ZoneTag::Outside), params.grid_areas.outside_count);
        assert_eq!(count(ZoneTag::Industrial), city.industrial_zones.len());
        assert_eq!(count(ZoneTag::HistoricalCenter), 0);

        let max_rotation = params.grid_areas.max_rotation_degrees.to_radians();
        for (i, area) in areas.iter().enumerate() {
            assert_eq!(area.id, i as u32);
            assert!(area.rotation.abs() <= max_rotation + 1e-12);
            let spacing = params.grid_areas.spacing(area.zone);
            assert!(area.spacing >= spacing.min && area.spacing <= spacing.max);
        }

        // ring_1 (chaos 0.6) and ring_2/ring_3 are under the 0.8 cutoff:
        // every ring district gets an area.
        let ring_districts: usize = city.rings.iter().map(|r| r.district_centers.len()).sum();
        let ring_areas = areas.iter().filter(|a| a.zone.is_ring()).count();
        assert_eq!(ring_areas, ring_districts);
    }
}

#[test]
fn test_chaotic_ring_districts_get_no_grid_area() {
    let mut params = LayoutParams::default();
    params
        .placement
        .zone_chaos
        .insert("ring_1".to_string(), 0.95);
    let mut city_rng = CityRng::from_seed_u64(3);
    let city = LayoutGenerator::new(4.0, &params)
        .expect("valid")
        .generate(&mut city_rng);
    let areas = synthesize_grid_areas(&city, &params, &mut city_rng);
    assert_eq!(areas.iter().filter(|a| a.zone == ZoneTag::Ring(1)).count(), 0);
}
