//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::{
    AnchorKind, AnchorMarker, Coordinate, MapRegion, RadiusOverlay, Station, StationStatus,
    ViewStateBuilder,
};
use proptest::prelude::*;

// ============================================================================
// Coordinate Property Tests
// ============================================================================

mod coordinate_tests {
    use super::*;

    proptest! {
        #[test]
        fn valid_coordinates_accepted(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let coord = Coordinate::new(lat, lon);
            prop_assert!(coord.is_ok());

            let coord = coord.unwrap();
            prop_assert!((coord.latitude() - lat).abs() < f64::EPSILON);
            prop_assert!((coord.longitude() - lon).abs() < f64::EPSILON);
        }

        #[test]
        fn invalid_latitude_rejected(
            lat in prop_oneof![
                (-1000.0f64..-90.1f64),
                (90.1f64..1000.0f64)
            ],
            lon in -180.0f64..=180.0f64
        ) {
            prop_assert!(Coordinate::new(lat, lon).is_err());
        }

        #[test]
        fn distance_is_symmetric(
            lat1 in -89.0f64..=89.0f64,
            lon1 in -179.0f64..=179.0f64,
            lat2 in -89.0f64..=89.0f64,
            lon2 in -179.0f64..=179.0f64
        ) {
            let a = Coordinate::new_unchecked(lat1, lon1);
            let b = Coordinate::new_unchecked(lat2, lon2);
            prop_assert!((a.distance_meters(&b) - b.distance_meters(&a)).abs() < 1e-6);
        }

        #[test]
        fn distance_to_self_is_zero(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let coord = Coordinate::new_unchecked(lat, lon);
            prop_assert!(coord.distance_meters(&coord).abs() < 0.001);
        }
    }
}

// ============================================================================
// View State Property Tests
// ============================================================================

mod view_state_tests {
    use super::*;

    proptest! {
        #[test]
        fn overlay_radius_is_one_and_a_half_times(radius in 0.001f64..100_000.0f64) {
            let overlay = RadiusOverlay::for_search(Coordinate::new_unchecked(0.0, 0.0), radius);
            prop_assert!((overlay.radius_meters - radius * 1.5).abs() < f64::EPSILON * radius * 4.0);
        }

        #[test]
        fn builder_never_holds_two_markers_at_one_position(
            positions in prop::collection::vec((0u8..5, 0u8..5), 0..40)
        ) {
            let mut builder = ViewStateBuilder::new(0.0);
            builder.insert_marker(AnchorMarker::new(
                AnchorKind::Home,
                "home",
                Coordinate::new_unchecked(0.0, 0.0),
            ));
            for (i, (lat, lon)) in positions.iter().enumerate() {
                let id = u32::try_from(i).unwrap_or(u32::MAX);
                builder.insert_marker(Station::new(
                    id,
                    "s",
                    "a",
                    StationStatus::Active,
                    Coordinate::new_unchecked(f64::from(*lat), f64::from(*lon)),
                ));
            }
            let state = builder.build();
            let markers = state.markers();
            for (i, a) in markers.iter().enumerate() {
                for b in &markers[i + 1..] {
                    prop_assert_ne!(a.coordinate(), b.coordinate());
                }
            }
            prop_assert!(markers[0].is_anchor());
        }

        #[test]
        fn region_deltas_are_positive(
            lat in -80.0f64..=80.0f64,
            span in 1.0f64..50_000.0f64
        ) {
            let region = MapRegion::new(Coordinate::new_unchecked(lat, 0.0), span);
            prop_assert!(region.latitude_delta_degrees() > 0.0);
            prop_assert!(region.longitude_delta_degrees() >= region.latitude_delta_degrees());
        }
    }
}
