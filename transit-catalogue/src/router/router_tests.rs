//! Scenario tests for routing over small catalogues.

use super::*;
use crate::domain::{BusIndex, Coordinates, StopIndex};
use approx::assert_relative_eq;
use proptest::prelude::*;

/// 60 km/h: one kilometer takes one minute.
fn settings(wait_min: f64) -> RoutingSettings {
    RoutingSettings::new(60.0, wait_min).unwrap()
}

fn catalogue(
    stops: &[&str],
    distances: &[(&str, &str, u32)],
    buses: &[(&str, &[&str], bool)],
) -> TransportCatalogue {
    let mut catalogue = TransportCatalogue::new();
    for (i, name) in stops.iter().enumerate() {
        catalogue
            .add_stop(name, Coordinates::new(55.0 + i as f64 * 0.001, 37.0))
            .unwrap();
    }
    for (from, to, meters) in distances {
        catalogue.add_distances(from, [(*to, *meters)]).unwrap();
    }
    for (name, route, is_circular) in buses {
        let indices = catalogue.resolve_stops(*route).unwrap();
        catalogue.add_route(name, indices, *is_circular).unwrap();
    }
    catalogue
}

fn wait(stop: usize, duration_min: f64) -> Segment {
    Segment::Wait {
        stop: StopIndex(stop),
        duration_min,
    }
}

fn ride(bus: usize, duration_min: f64, span_count: usize) -> Segment {
    Segment::Ride {
        bus: BusIndex(bus),
        duration_min,
        span_count,
    }
}

fn assert_segments(travel: &Travel, expected: &[Segment]) {
    assert_eq!(travel.segments().len(), expected.len(), "{travel:?}");
    for (got, want) in travel.segments().iter().zip(expected) {
        match (got, want) {
            (
                Segment::Wait { stop, duration_min },
                Segment::Wait {
                    stop: want_stop,
                    duration_min: want_min,
                },
            ) => {
                assert_eq!(stop, want_stop);
                assert_relative_eq!(*duration_min, *want_min, max_relative = 1e-9);
            }
            (
                Segment::Ride {
                    bus,
                    duration_min,
                    span_count,
                },
                Segment::Ride {
                    bus: want_bus,
                    duration_min: want_min,
                    span_count: want_span,
                },
            ) => {
                assert_eq!(bus, want_bus);
                assert_eq!(span_count, want_span);
                assert_relative_eq!(*duration_min, *want_min, max_relative = 1e-9);
            }
            _ => panic!("segment kind mismatch: got {got:?}, want {want:?}"),
        }
    }
}

#[test]
fn one_kilometer_round_trip_bus() {
    let catalogue = catalogue(&["A", "B"], &[("A", "B", 1000)], &[("1", &["A", "B", "A"], true)]);
    let mut router = TransportRouter::new(&catalogue, settings(6.0)).unwrap();

    let travel = router.route(&catalogue, "A", "B").unwrap();

    assert_segments(&travel, &[wait(0, 6.0), ride(0, 1.0, 1)]);
    assert_relative_eq!(travel.total_time_min(), 7.0);
}

#[test]
fn same_stop_is_free() {
    let catalogue = catalogue(
        &["A", "B", "Lonely"],
        &[("A", "B", 1000)],
        &[("1", &["A", "B", "A"], true)],
    );
    let mut router = TransportRouter::new(&catalogue, settings(6.0)).unwrap();

    let travel = router.route(&catalogue, "A", "A").unwrap();
    assert!(travel.is_empty());
    assert_eq!(travel.total_time_min(), 0.0);

    // Also for a stop no bus visits
    let travel = router.route(&catalogue, "Lonely", "Lonely").unwrap();
    assert!(travel.is_empty());
}

#[test]
fn stop_without_buses_is_unreachable() {
    let catalogue = catalogue(
        &["A", "B", "Lonely"],
        &[("A", "B", 1000), ("B", "Lonely", 10)],
        &[("1", &["A", "B", "A"], true)],
    );
    let mut router = TransportRouter::new(&catalogue, settings(6.0)).unwrap();

    assert!(router.route(&catalogue, "A", "Lonely").is_none());
    assert!(router.route(&catalogue, "Lonely", "A").is_none());
}

#[test]
fn unknown_stop() {
    let catalogue = catalogue(&["A", "B"], &[("A", "B", 1000)], &[("1", &["A", "B"], false)]);
    let mut router = TransportRouter::new(&catalogue, settings(6.0)).unwrap();

    assert!(router.route(&catalogue, "A", "Nowhere").is_none());
    assert!(router.route(&catalogue, "Nowhere", "Nowhere").is_none());
}

#[test]
fn riding_through_waits_once() {
    let catalogue = catalogue(
        &["A", "B", "C", "D"],
        &[("A", "B", 1000), ("B", "C", 1000), ("C", "D", 1000)],
        &[("1", &["A", "B", "C", "D"], false)],
    );
    let mut router = TransportRouter::new(&catalogue, settings(6.0)).unwrap();

    let travel = router.route(&catalogue, "A", "D").unwrap();

    assert_segments(&travel, &[wait(0, 6.0), ride(0, 3.0, 3)]);
    assert_relative_eq!(travel.total_time_min(), 9.0);
}

#[test]
fn linear_route_rides_backwards_with_directed_distances() {
    let catalogue = catalogue(
        &["A", "B"],
        &[("A", "B", 1000), ("B", "A", 3000)],
        &[("1", &["A", "B"], false)],
    );
    let mut router = TransportRouter::new(&catalogue, settings(2.0)).unwrap();

    let back = router.route(&catalogue, "B", "A").unwrap();
    assert_segments(&back, &[wait(1, 2.0), ride(0, 3.0, 1)]);

    let forth = router.route(&catalogue, "A", "B").unwrap();
    assert_segments(&forth, &[wait(0, 2.0), ride(0, 1.0, 1)]);
}

#[test]
fn circular_route_does_not_run_backwards() {
    let catalogue = catalogue(
        &["A", "B", "C"],
        &[("A", "B", 1000), ("B", "C", 1000), ("C", "A", 1000)],
        &[("ring", &["A", "B", "C", "A"], true)],
    );
    let mut router = TransportRouter::new(&catalogue, settings(1.0)).unwrap();

    // B -> A has to go round through C
    let travel = router.route(&catalogue, "B", "A").unwrap();
    assert_segments(&travel, &[wait(1, 1.0), ride(0, 2.0, 2)]);
}

#[test]
fn transfer_between_buses() {
    let catalogue = catalogue(
        &["A", "B", "C"],
        &[("A", "B", 2000), ("B", "C", 3000)],
        &[("1", &["A", "B"], false), ("2", &["B", "C"], false)],
    );
    let mut router = TransportRouter::new(&catalogue, settings(4.0)).unwrap();

    let travel = router.route(&catalogue, "A", "C").unwrap();

    assert_segments(
        &travel,
        &[wait(0, 4.0), ride(0, 2.0, 1), wait(1, 4.0), ride(1, 3.0, 1)],
    );
    assert_relative_eq!(travel.total_time_min(), 13.0);
    assert_eq!(travel.ride_count(), 2);
}

#[test]
fn transfer_beats_slow_direct_bus() {
    let catalogue = catalogue(
        &["A", "B", "C"],
        &[("A", "C", 10000), ("A", "B", 1000), ("B", "C", 1000)],
        &[
            ("slow", &["A", "C"], false),
            ("1", &["A", "B"], false),
            ("2", &["B", "C"], false),
        ],
    );
    let mut router = TransportRouter::new(&catalogue, settings(2.0)).unwrap();

    let travel = router.route(&catalogue, "A", "C").unwrap();
    assert_eq!(travel.ride_count(), 2);
    assert_relative_eq!(travel.total_time_min(), 6.0);
}

#[test]
fn long_wait_favors_direct_bus() {
    let catalogue = catalogue(
        &["A", "B", "C"],
        &[("A", "C", 10000), ("A", "B", 1000), ("B", "C", 1000)],
        &[
            ("slow", &["A", "C"], false),
            ("1", &["A", "B"], false),
            ("2", &["B", "C"], false),
        ],
    );
    let mut router = TransportRouter::new(&catalogue, settings(20.0)).unwrap();

    let travel = router.route(&catalogue, "A", "C").unwrap();
    assert_segments(&travel, &[wait(0, 20.0), ride(0, 10.0, 1)]);
}

#[test]
fn disconnected_networks() {
    let catalogue = catalogue(
        &["A", "B", "C", "D"],
        &[("A", "B", 1000), ("C", "D", 1000)],
        &[("1", &["A", "B"], false), ("2", &["C", "D"], false)],
    );
    let mut router = TransportRouter::new(&catalogue, settings(6.0)).unwrap();

    assert!(router.route(&catalogue, "A", "D").is_none());
    assert!(router.route(&catalogue, "A", "B").is_some());
}

#[test]
fn missing_distances_ride_for_free() {
    let catalogue = catalogue(&["A", "B"], &[], &[("1", &["A", "B"], false)]);
    let mut router = TransportRouter::new(&catalogue, settings(3.0)).unwrap();

    let travel = router.route(&catalogue, "A", "B").unwrap();
    assert_segments(&travel, &[wait(0, 3.0), ride(0, 0.0, 1)]);
}

#[test]
fn total_matches_path_weight() {
    let catalogue = catalogue(
        &["A", "B", "C"],
        &[("A", "B", 1700), ("B", "C", 2300)],
        &[("1", &["A", "B"], false), ("2", &["B", "C"], false)],
    );
    let settings = settings(5.0);
    let mut router = TransportRouter::new(&catalogue, settings).unwrap();

    let travel = router.route(&catalogue, "A", "C").unwrap();
    let weight = 1700 + 2300 + 2 * settings.wait_distance();
    assert_relative_eq!(
        travel.total_time_min(),
        settings.distance_to_time(weight),
        max_relative = 1e-9
    );
}

#[test]
fn rebuilt_router_answers_identically() {
    let catalogue = catalogue(
        &["A", "B", "C", "D"],
        &[("A", "B", 1000), ("B", "C", 1500), ("C", "D", 500), ("D", "A", 4000)],
        &[("1", &["A", "B", "C"], false), ("2", &["C", "D", "A", "C"], true)],
    );
    let mut first = TransportRouter::new(&catalogue, settings(3.0)).unwrap();
    let mut second = TransportRouter::new(&catalogue, settings(3.0)).unwrap();
    assert_eq!(first, second);

    for from in ["A", "B", "C", "D"] {
        for to in ["A", "B", "C", "D"] {
            assert_eq!(
                first.route(&catalogue, from, to),
                second.route(&catalogue, from, to)
            );
        }
    }
}

#[test]
fn precomputed_router_survives_bincode() {
    let catalogue = catalogue(
        &["A", "B", "C"],
        &[("A", "B", 1000), ("B", "C", 1500)],
        &[("1", &["A", "B", "C"], false)],
    );
    let mut router = TransportRouter::new(&catalogue, settings(3.0)).unwrap();
    router.precompute_all();

    let bytes = bincode::serialize(&router).unwrap();
    let mut restored: TransportRouter = bincode::deserialize(&bytes).unwrap();

    assert_eq!(restored, router);
    assert_eq!(restored.engine().cached_sources(), 3);
    assert_eq!(
        restored.route(&catalogue, "C", "A"),
        router.route(&catalogue, "C", "A")
    );
}

fn network_strategy() -> impl Strategy<Value = (Vec<(usize, usize, u32)>, Vec<(Vec<usize>, bool)>)> {
    let distances = prop::collection::vec((0usize..6, 0usize..6, 100u32..5000), 0..20);
    let buses = prop::collection::vec(
        (prop::collection::vec(0usize..6, 2..6), any::<bool>()),
        1..4,
    );
    (distances, buses)
}

proptest! {
    /// Itinerary totals equal the sum of their segments, and alternate wait/ride
    #[test]
    fn itineraries_are_well_formed((distances, buses) in network_strategy(), wait_min in 0.0f64..10.0) {
        let names = ["S0", "S1", "S2", "S3", "S4", "S5"];
        let mut catalogue = TransportCatalogue::new();
        for name in names {
            catalogue.add_stop(name, Coordinates::new(50.0, 30.0)).unwrap();
        }
        for (from, to, meters) in distances {
            catalogue.add_distance(StopIndex(from), StopIndex(to), meters).unwrap();
        }
        for (i, (stops, circular)) in buses.into_iter().enumerate() {
            let stops = stops.into_iter().map(StopIndex).collect();
            catalogue.add_route(&format!("bus{i}"), stops, circular).unwrap();
        }

        let mut router = TransportRouter::new(&catalogue, RoutingSettings::new(30.0, wait_min).unwrap()).unwrap();
        for from in names {
            for to in names {
                if let Some(travel) = router.route(&catalogue, from, to) {
                    let sum: f64 = travel.segments().iter().map(Segment::duration_min).sum();
                    prop_assert!((travel.total_time_min() - sum).abs() < 1e-9);
                    for (k, segment) in travel.segments().iter().enumerate() {
                        prop_assert_eq!(segment.is_wait(), k % 2 == 0);
                    }
                }
            }
        }
    }
}
