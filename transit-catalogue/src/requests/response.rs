//! Responses to stat requests.

use serde::Serialize;

use crate::catalogue::TransportCatalogue;
use crate::domain::{BusStats, Stop};
use crate::router::{Segment, Travel};

/// Message carried by every failed query.
pub const NOT_FOUND: &str = "not found";

/// One answered stat request, tagged with the request's id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatResponse {
    pub request_id: i64,

    #[serde(flatten)]
    pub payload: ResponsePayload,
}

impl StatResponse {
    pub fn new(request_id: i64, payload: ResponsePayload) -> Self {
        Self {
            request_id,
            payload,
        }
    }

    pub fn not_found(request_id: i64) -> Self {
        Self::new(request_id, ResponsePayload::not_found())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.payload, ResponsePayload::NotFound { .. })
    }
}

/// The body of a response. Serialized without a tag: the fields present
/// tell the kinds apart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponsePayload {
    Bus(BusStatPayload),
    Stop(StopStatPayload),
    Route(RoutePayload),
    NotFound { error_message: String },
}

impl ResponsePayload {
    pub fn not_found() -> Self {
        ResponsePayload::NotFound {
            error_message: NOT_FOUND.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BusStatPayload {
    pub curvature: f64,
    pub route_length: u64,
    pub stop_count: usize,
    pub unique_stop_count: usize,
}

impl From<&BusStats> for BusStatPayload {
    fn from(stats: &BusStats) -> Self {
        Self {
            curvature: stats.curvature,
            route_length: stats.length_traveled,
            stop_count: stats.stop_count,
            unique_stop_count: stats.unique_stop_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StopStatPayload {
    /// Names of the buses through the stop, sorted.
    pub buses: Vec<String>,
}

impl From<&Stop> for StopStatPayload {
    fn from(stop: &Stop) -> Self {
        Self {
            buses: stop.buses().iter().cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePayload {
    pub total_time: f64,
    pub items: Vec<RouteItem>,
}

impl RoutePayload {
    /// Name every stop and bus in an itinerary.
    ///
    /// Returns `None` if the itinerary refers to an index the catalogue
    /// does not have.
    pub fn from_travel(travel: &Travel, catalogue: &TransportCatalogue) -> Option<Self> {
        let items = travel
            .segments()
            .iter()
            .map(|segment| match *segment {
                Segment::Wait { stop, duration_min } => Some(RouteItem::Wait {
                    stop_name: catalogue.stop_at(stop)?.name().to_string(),
                    time: duration_min,
                }),
                Segment::Ride {
                    bus,
                    duration_min,
                    span_count,
                } => Some(RouteItem::Bus {
                    bus: catalogue.bus_at(bus)?.name().to_string(),
                    span_count,
                    time: duration_min,
                }),
            })
            .collect::<Option<Vec<_>>>()?;

        Some(Self {
            total_time: travel.total_time_min(),
            items,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum RouteItem {
    Wait { stop_name: String, time: f64 },
    Bus { bus: String, span_count: usize, time: f64 },
}
