//! Binary snapshot of a built catalogue and router.
//!
//! The catalogue is stored as plain records and rebuilt through its own
//! add operations on load, so derived statistics are always recomputed
//! by the same code. The router is stored whole, including any
//! shortest-path tables already computed.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalogue::TransportCatalogue;
use crate::domain::{CatalogueError, Coordinates, StopIndex};
use crate::requests::RequestHandler;
use crate::router::TransportRouter;

/// Bumped whenever the encoded layout changes.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors from writing or reading a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot encoding error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("snapshot version {found} is not supported (expected {expected})")]
    Version { found: u32, expected: u32 },

    #[error("snapshot catalogue is invalid: {0}")]
    Catalogue(#[from] CatalogueError),

    #[error("snapshot is inconsistent: {0}")]
    Inconsistent(String),
}

impl SnapshotError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        SnapshotError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct StopRecord {
    index: StopIndex,
    name: String,
    coordinates: Coordinates,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct BusRecord {
    name: String,
    stops: Vec<StopIndex>,
    is_circular: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct DistanceRecord {
    from: StopIndex,
    to: StopIndex,
    meters: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CatalogueRecord {
    stops: Vec<StopRecord>,
    /// Sorted by `(from, to)` so equal catalogues encode identically.
    distances: Vec<DistanceRecord>,
    buses: Vec<BusRecord>,
}

impl CatalogueRecord {
    fn capture(catalogue: &TransportCatalogue) -> Self {
        let stops = catalogue
            .stops()
            .iter()
            .map(|stop| StopRecord {
                index: stop.index(),
                name: stop.name().to_string(),
                coordinates: stop.coordinates(),
            })
            .collect();

        let mut distances: Vec<DistanceRecord> = catalogue
            .distances()
            .iter()
            .map(|(from, to, meters)| DistanceRecord { from, to, meters })
            .collect();
        distances.sort_by_key(|d| (d.from, d.to));

        let buses = catalogue
            .buses()
            .iter()
            .map(|bus| BusRecord {
                name: bus.name().to_string(),
                stops: bus.stops().to_vec(),
                is_circular: bus.is_circular(),
            })
            .collect();

        Self {
            stops,
            distances,
            buses,
        }
    }

    fn restore(self) -> Result<TransportCatalogue, SnapshotError> {
        let mut catalogue = TransportCatalogue::new();

        for stop in self.stops {
            let index = catalogue.add_stop(&stop.name, stop.coordinates)?;
            if index != stop.index {
                return Err(SnapshotError::Inconsistent(format!(
                    "stop {} stored at index {} but restored at {}",
                    stop.name, stop.index, index
                )));
            }
        }
        for d in self.distances {
            catalogue.add_distance(d.from, d.to, d.meters)?;
        }
        for bus in self.buses {
            catalogue.add_route(&bus.name, bus.stops, bus.is_circular)?;
        }

        Ok(catalogue)
    }
}

/// Everything needed to answer stat requests without the original input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Encoded first so it can be checked before the rest is decoded.
    version: u32,
    catalogue: CatalogueRecord,
    render_settings: Option<String>,
    router: Option<TransportRouter>,
}

impl Snapshot {
    pub fn capture(handler: &RequestHandler) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            catalogue: CatalogueRecord::capture(handler.catalogue()),
            render_settings: handler.render_settings().map(str::to_string),
            router: handler.router().cloned(),
        }
    }

    /// Rebuild the handler this snapshot was captured from.
    pub fn restore(self) -> Result<RequestHandler, SnapshotError> {
        let catalogue = self.catalogue.restore()?;

        if let Some(router) = &self.router {
            let vertices = router.engine().graph().vertex_count();
            if vertices != catalogue.stops().len() {
                return Err(SnapshotError::Inconsistent(format!(
                    "router has {} vertices for {} stops",
                    vertices,
                    catalogue.stops().len()
                )));
            }
            let edges = router.engine().graph().edge_count();
            if edges != router.edge_infos().len() {
                return Err(SnapshotError::Inconsistent(format!(
                    "router has {} edges but {} edge records",
                    edges,
                    router.edge_infos().len()
                )));
            }
            router
                .engine()
                .validate_tables()
                .map_err(|e| SnapshotError::Inconsistent(e.to_string()))?;
        }

        Ok(RequestHandler::new(catalogue, self.router, self.render_settings))
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a snapshot, rejecting other versions before decoding the body.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let found: u32 = bincode::deserialize(bytes)?;
        if found != SNAPSHOT_VERSION {
            return Err(SnapshotError::Version {
                found,
                expected: SNAPSHOT_VERSION,
            });
        }
        Ok(bincode::deserialize(bytes)?)
    }

    /// Write the snapshot to `path`.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        let bytes = self.to_bytes()?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| SnapshotError::io(parent, e))?;
        }

        std::fs::write(path, &bytes).map_err(|e| SnapshotError::io(path, e))?;
        info!(path = %path.display(), bytes = bytes.len(), "saved snapshot");
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let bytes = std::fs::read(path).map_err(|e| SnapshotError::io(path, e))?;
        let snapshot = Self::from_bytes(&bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), "loaded snapshot");
        Ok(snapshot)
    }
}
