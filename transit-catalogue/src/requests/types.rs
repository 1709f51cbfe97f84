//! Incoming requests.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::router::RoutingSettings;

/// A request to add data to the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BaseRequest {
    Stop {
        name: String,
        latitude: f64,
        longitude: f64,
        /// Directed road distances from this stop to named neighbors.
        #[serde(default)]
        road_distances: BTreeMap<String, u32>,
    },
    Bus {
        name: String,
        stops: Vec<String>,
        /// A round-trip bus lists its first stop again at the end.
        is_roundtrip: bool,
    },
}

/// A query against the built catalogue. `id` is echoed in the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StatRequest {
    #[serde(rename = "Bus")]
    BusStat { id: i64, name: String },

    #[serde(rename = "Stop")]
    StopStat { id: i64, name: String },

    #[serde(rename = "Map")]
    MapRender { id: i64 },

    Route { id: i64, from: String, to: String },
}

impl StatRequest {
    pub fn id(&self) -> i64 {
        match self {
            StatRequest::BusStat { id, .. }
            | StatRequest::StopStat { id, .. }
            | StatRequest::MapRender { id }
            | StatRequest::Route { id, .. } => *id,
        }
    }
}

/// Where the binary snapshot lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializationSettings {
    pub file: PathBuf,
}

/// One batch document: build data, settings and queries.
///
/// Every part is optional so the same shape serves both the build step
/// and the query step.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RequestDocument {
    #[serde(default)]
    pub base_requests: Vec<BaseRequest>,

    #[serde(default)]
    pub routing_settings: Option<RoutingSettings>,

    /// Map rendering parameters, carried through untouched.
    #[serde(default)]
    pub render_settings: Option<serde_json::Value>,

    #[serde(default)]
    pub serialization_settings: Option<SerializationSettings>,

    #[serde(default)]
    pub stat_requests: Vec<StatRequest>,
}
