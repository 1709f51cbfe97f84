//! Itineraries: the wait/ride segments answering a route query.

use super::builder::EdgeInfo;
use super::engine::RouteInfo;
use super::settings::RoutingSettings;
use crate::domain::{BusIndex, StopIndex};

/// One step of an itinerary.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Wait at a stop for the next bus.
    Wait { stop: StopIndex, duration_min: f64 },
    /// Ride a bus over `span_count` consecutive hops.
    Ride {
        bus: BusIndex,
        duration_min: f64,
        span_count: usize,
    },
}

impl Segment {
    pub fn duration_min(&self) -> f64 {
        match self {
            Segment::Wait { duration_min, .. } | Segment::Ride { duration_min, .. } => *duration_min,
        }
    }

    pub fn is_wait(&self) -> bool {
        matches!(self, Segment::Wait { .. })
    }

    pub fn is_ride(&self) -> bool {
        matches!(self, Segment::Ride { .. })
    }
}

/// An ordered Wait, Ride, Wait, Ride, ... itinerary with its total duration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Travel {
    segments: Vec<Segment>,
    total_time_min: f64,
}

impl Travel {
    /// The itinerary from a stop to itself: nothing to do, no time spent.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn total_time_min(&self) -> f64 {
        self.total_time_min
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of buses boarded.
    pub fn ride_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_ride()).count()
    }
}

/// Turn a path of edge ids into an itinerary.
///
/// Each edge yields a wait of exactly the configured wait time at its
/// origin, then a ride whose time comes from the edge's road distance
/// alone. The edge weight already contains the wait, so using it for the
/// ride would count the wait twice. The total is the sum of the segments.
///
/// Returns `None` if the path names an edge without metadata.
pub fn compose(route: &RouteInfo, edge_infos: &[EdgeInfo], settings: &RoutingSettings) -> Option<Travel> {
    let mut segments = Vec::with_capacity(route.edges.len() * 2);

    for edge_id in &route.edges {
        let info = edge_infos.get(edge_id.0)?;

        segments.push(Segment::Wait {
            stop: info.from,
            duration_min: settings.bus_wait_time_min,
        });
        segments.push(Segment::Ride {
            bus: info.bus,
            duration_min: settings.distance_to_time(info.distance_m),
            span_count: info.span_count,
        });
    }

    let total_time_min = segments.iter().map(Segment::duration_min).sum();
    Some(Travel {
        segments,
        total_time_min,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::graph::EdgeId;
    use approx::assert_relative_eq;

    fn info(bus: usize, from: usize, to: usize, distance_m: u64, span_count: usize) -> EdgeInfo {
        EdgeInfo {
            bus: BusIndex(bus),
            from: StopIndex(from),
            to: StopIndex(to),
            distance_m,
            span_count,
        }
    }

    #[test]
    fn empty_path_is_empty_travel() {
        let settings = RoutingSettings::new(60.0, 6.0).unwrap();
        let route = RouteInfo {
            weight: 0,
            edges: vec![],
        };

        let travel = compose(&route, &[], &settings).unwrap();
        assert_eq!(travel, Travel::empty());
        assert_eq!(travel.total_time_min(), 0.0);
    }

    #[test]
    fn one_edge_is_wait_then_ride() {
        let settings = RoutingSettings::new(60.0, 6.0).unwrap();
        let infos = [info(0, 0, 1, 1000, 1)];
        let route = RouteInfo {
            weight: 7000,
            edges: vec![EdgeId(0)],
        };

        let travel = compose(&route, &infos, &settings).unwrap();
        assert_eq!(
            travel.segments(),
            &[
                Segment::Wait {
                    stop: StopIndex(0),
                    duration_min: 6.0
                },
                Segment::Ride {
                    bus: BusIndex(0),
                    duration_min: 1.0,
                    span_count: 1
                },
            ]
        );
        assert_relative_eq!(travel.total_time_min(), 7.0);
        assert_relative_eq!(travel.total_time_min(), settings.distance_to_time(route.weight));
    }

    #[test]
    fn transfer_has_two_waits() {
        let settings = RoutingSettings::new(40.0, 2.0).unwrap();
        let infos = [info(0, 0, 3, 4000, 3), info(1, 3, 5, 2000, 1)];
        let route = RouteInfo {
            weight: 6000 + 2 * settings.wait_distance(),
            edges: vec![EdgeId(0), EdgeId(1)],
        };

        let travel = compose(&route, &infos, &settings).unwrap();
        let kinds: Vec<bool> = travel.segments().iter().map(Segment::is_wait).collect();
        assert_eq!(kinds, vec![true, false, true, false]);
        assert_eq!(travel.ride_count(), 2);
        assert_eq!(
            travel.segments()[2],
            Segment::Wait {
                stop: StopIndex(3),
                duration_min: 2.0
            }
        );
        // 6 km at 40 km/h is 9 minutes of riding
        assert_relative_eq!(travel.total_time_min(), 4.0 + 9.0, max_relative = 1e-12);
    }

    #[test]
    fn missing_edge_metadata() {
        let settings = RoutingSettings::new(60.0, 6.0).unwrap();
        let route = RouteInfo {
            weight: 1,
            edges: vec![EdgeId(3)],
        };
        assert!(compose(&route, &[], &settings).is_none());
    }
}
