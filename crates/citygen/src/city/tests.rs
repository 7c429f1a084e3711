//! Tests for the city model.

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::city::{
        Building, BuildingType, CardinalDirection, City, DistrictCenter, DistrictType,
        IndustrialZone, Ring, ZoneTag,
    };

    fn district(id: u32, ring: u32, x: f64, y: f64, district_type: DistrictType) -> DistrictCenter {
        DistrictCenter {
            id,
            x,
            y,
            ring,
            angle: y.atan2(x),
            district_type,
        }
    }

    /// Radius 10: center [0,1.5], rings [1.5,4] [4,6.5], outskirts [6.5,10],
    /// an industrial zone overlapping the outskirts at (9, 0).
    fn fixture() -> City {
        let mut rings = vec![Ring::new(1.5, 4.0, 1), Ring::new(4.0, 6.5, 2)];
        rings[0].district_centers = vec![
            district(1, 1, 2.0, 0.0, DistrictType::Commercial),
            district(2, 1, -2.5, 0.0, DistrictType::Residential),
        ];
        rings[1].district_centers = vec![district(3, 2, 0.0, 5.0, DistrictType::Mixed)];

        let mut city = City::new(
            10.0,
            1.5,
            rings,
            6.5,
            vec![IndustrialZone {
                x: 9.0,
                y: 0.0,
                radius: 1.0,
                direction: CardinalDirection::E,
            }],
        );
        city.historical_center_district = Some(district(0, 0, 0.0, 0.0, DistrictType::Mixed));
        city
    }

    fn building(id: u32, building_type: BuildingType, zone: ZoneTag) -> Building {
        Building {
            id,
            x: 0.0,
            y: 0.0,
            building_type,
            zone,
            primary_district: None,
            district_influences: BTreeMap::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Zone classification
    // -------------------------------------------------------------------------

    #[test]
    fn test_zone_at_each_band() {
        let city = fixture();
        assert_eq!(city.zone_at(0.0, 0.0), ZoneTag::HistoricalCenter);
        assert_eq!(city.zone_at(0.0, 1.5), ZoneTag::HistoricalCenter);
        assert_eq!(city.zone_at(0.0, 3.0), ZoneTag::Ring(1));
        assert_eq!(city.zone_at(-5.0, 0.0), ZoneTag::Ring(2));
        assert_eq!(city.zone_at(0.0, -8.0), ZoneTag::Outskirts);
        assert_eq!(city.zone_at(0.0, 10.0), ZoneTag::Outskirts);
        assert_eq!(city.zone_at(0.0, 10.01), ZoneTag::Outside);
    }

    #[test]
    fn test_shared_boundary_belongs_to_inner_ring() {
        let city = fixture();
        assert_eq!(city.zone_at(4.0, 0.0), ZoneTag::Ring(1));
        assert_eq!(city.zone_at(6.5, 0.0), ZoneTag::Ring(2));
    }

    #[test]
    fn test_industrial_wins_over_bands() {
        let city = fixture();
        // Inside the outskirts band and inside the industrial circle.
        assert_eq!(city.zone_at(8.5, 0.0), ZoneTag::Industrial);
        // Beyond the city radius but inside the industrial circle.
        assert_eq!(city.zone_at(9.9, 0.0), ZoneTag::Industrial);
        assert_eq!(city.zone_at(10.5, 0.0), ZoneTag::Outside);
    }

    // -------------------------------------------------------------------------
    // District lookups
    // -------------------------------------------------------------------------

    #[test]
    fn test_all_district_centers_order() {
        let city = fixture();
        let ids: Vec<u32> = city.all_district_centers().map(|d| d.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(city.num_district_centers(), 4);
    }

    #[test]
    fn test_district_by_id() {
        let city = fixture();
        assert_eq!(city.district_by_id(2).map(|d| d.ring), Some(1));
        assert_eq!(city.district_by_id(0).map(|d| d.ring), Some(0));
        assert!(city.district_by_id(99).is_none());
    }

    #[test]
    fn test_districts_of_type() {
        let city = fixture();
        assert_eq!(city.districts_of_type(DistrictType::Mixed).count(), 2);
        assert_eq!(city.districts_of_type(DistrictType::Commercial).count(), 1);
    }

    #[test]
    fn test_without_historical_district() {
        let mut city = fixture();
        city.historical_center_district = None;
        assert_eq!(city.all_district_centers().next().map(|d| d.id), Some(1));
    }

    // -------------------------------------------------------------------------
    // Buildings, bounds and summary
    // -------------------------------------------------------------------------

    #[test]
    fn test_add_building_and_filters() {
        let mut city = fixture();
        city.add_building(building(0, BuildingType::House, ZoneTag::Outskirts));
        city.add_building(building(1, BuildingType::Office, ZoneTag::Ring(1)));
        city.add_building(building(2, BuildingType::House, ZoneTag::Outside));
        assert_eq!(city.buildings.len(), 3);
        assert_eq!(city.buildings_of_type(BuildingType::House).count(), 2);
        assert_eq!(city.buildings_in_zone(ZoneTag::Ring(1)).count(), 1);
    }

    #[test]
    fn test_bounds() {
        let city = fixture();
        let (min_x, min_y, max_x, max_y) = city.bounds();
        assert!((max_x - 13.0).abs() < 1e-12);
        assert!((max_y - 13.0).abs() < 1e-12);
        assert_eq!(min_x, -max_x);
        assert_eq!(min_y, -max_y);
    }

    #[test]
    fn test_summary_counts() {
        let mut city = fixture();
        city.add_building(building(0, BuildingType::House, ZoneTag::Outskirts));
        city.add_building(building(1, BuildingType::Office, ZoneTag::Ring(1)));
        city.add_building(building(2, BuildingType::Apartment, ZoneTag::Ring(1)));
        city.placement_stats.grid_aligned = 1;
        city.placement_stats.chaotic = 2;

        let summary = city.summary();
        assert_eq!(summary.num_rings, 2);
        assert_eq!(summary.num_district_centers, 4);
        assert_eq!(summary.num_industrial_zones, 1);
        assert_eq!(summary.num_buildings, 3);
        assert_eq!(summary.buildings_by_type["house"], 1);
        assert_eq!(summary.buildings_by_type["factory"], 0);
        assert_eq!(summary.buildings_by_zone["ring_1"], 2);
        assert_eq!(summary.districts_by_type["mixed"], 2);
        assert_eq!(summary.rings[0].num_buildings, 2);
        assert_eq!(summary.rings[1].num_centers, 1);
        assert_eq!(summary.grid_aligned_buildings + summary.chaotic_buildings, 3);
        assert_eq!(
            summary.buildings_by_type.values().sum::<usize>(),
            summary.num_buildings
        );
    }

    #[test]
    fn test_summary_json() {
        let city = fixture();
        let json = city.summary().to_json();
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["num_rings"], 2);
        assert_eq!(value["radius"], 10.0);
    }
}
