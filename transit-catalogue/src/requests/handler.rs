//! Builds the catalogue and router from a request document and answers
//! stat requests against them.

use tracing::{debug, info};

use super::response::{BusStatPayload, ResponsePayload, RoutePayload, StatResponse, StopStatPayload};
use super::types::{BaseRequest, RequestDocument, StatRequest};
use crate::catalogue::TransportCatalogue;
use crate::domain::{CatalogueError, Coordinates};
use crate::router::{InvalidGraph, InvalidSettings, TransportRouter};

/// Errors that abort building from a request document.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Catalogue(#[from] CatalogueError),

    #[error("invalid routing settings: {0}")]
    Settings(#[from] InvalidSettings),

    #[error("failed to build routing graph: {0}")]
    Graph(#[from] InvalidGraph),
}

/// Fill a catalogue from base requests.
///
/// Requests are applied in three passes regardless of their order in the
/// input: every stop, then every road distance, then every bus. A bus's
/// statistics depend on the distances between its stops, and a distance
/// may name a stop that appears later in the input.
pub fn build_catalogue(requests: &[BaseRequest]) -> Result<TransportCatalogue, CatalogueError> {
    let mut catalogue = TransportCatalogue::new();

    for request in requests {
        if let BaseRequest::Stop {
            name,
            latitude,
            longitude,
            ..
        } = request
        {
            catalogue.add_stop(name, Coordinates::new(*latitude, *longitude))?;
        }
    }

    for request in requests {
        if let BaseRequest::Stop {
            name,
            road_distances,
            ..
        } = request
            && !road_distances.is_empty()
        {
            catalogue.add_distances(
                name,
                road_distances
                    .iter()
                    .map(|(to, meters)| (to.as_str(), *meters)),
            )?;
        }
    }

    for request in requests {
        if let BaseRequest::Bus {
            name,
            stops,
            is_roundtrip,
        } = request
        {
            let stops = catalogue.resolve_stops(stops)?;
            catalogue.add_route(name, stops, *is_roundtrip)?;
        }
    }

    info!(
        stops = catalogue.stops().len(),
        buses = catalogue.buses().len(),
        distances = catalogue.distances().len(),
        "built catalogue"
    );
    Ok(catalogue)
}

/// The catalogue, its router, and the settings carried alongside them.
#[derive(Debug, Clone)]
pub struct RequestHandler {
    catalogue: TransportCatalogue,
    router: Option<TransportRouter>,
    render_settings: Option<String>,
}

impl RequestHandler {
    pub fn new(
        catalogue: TransportCatalogue,
        router: Option<TransportRouter>,
        render_settings: Option<String>,
    ) -> Self {
        Self {
            catalogue,
            router,
            render_settings,
        }
    }

    /// Build everything a document describes.
    ///
    /// The router is only built when the document carries routing
    /// settings; without one, route queries answer "not found".
    pub fn build(document: &RequestDocument) -> Result<Self, BuildError> {
        let catalogue = build_catalogue(&document.base_requests)?;

        let router = match document.routing_settings {
            Some(settings) => {
                settings.validate()?;
                Some(TransportRouter::new(&catalogue, settings)?)
            }
            None => None,
        };

        let render_settings = document.render_settings.as_ref().map(|v| v.to_string());

        Ok(Self::new(catalogue, router, render_settings))
    }

    pub fn catalogue(&self) -> &TransportCatalogue {
        &self.catalogue
    }

    pub fn router(&self) -> Option<&TransportRouter> {
        self.router.as_ref()
    }

    /// Render settings as JSON text, exactly as supplied.
    pub fn render_settings(&self) -> Option<&str> {
        self.render_settings.as_deref()
    }

    /// Fill the router's shortest-path cache for every source stop.
    pub fn precompute_routes(&mut self) {
        if let Some(router) = self.router.as_mut() {
            router.precompute_all();
        }
    }

    pub fn bus_stat(&self, name: &str) -> Option<BusStatPayload> {
        self.catalogue
            .bus(name)
            .map(|bus| BusStatPayload::from(bus.stats()))
    }

    pub fn stop_stat(&self, name: &str) -> Option<StopStatPayload> {
        self.catalogue.stop(name).map(StopStatPayload::from)
    }

    pub fn route(&mut self, from: &str, to: &str) -> Option<RoutePayload> {
        let router = self.router.as_mut()?;
        let travel = router.route(&self.catalogue, from, to)?;
        RoutePayload::from_travel(&travel, &self.catalogue)
    }

    /// Answer one stat request. Unknown names, unreachable routes and map
    /// requests all answer "not found".
    pub fn answer(&mut self, request: &StatRequest) -> StatResponse {
        let id = request.id();
        let payload = match request {
            StatRequest::BusStat { name, .. } => self.bus_stat(name).map(ResponsePayload::Bus),
            StatRequest::StopStat { name, .. } => self.stop_stat(name).map(ResponsePayload::Stop),
            StatRequest::Route { from, to, .. } => self.route(from, to).map(ResponsePayload::Route),
            StatRequest::MapRender { .. } => None,
        };

        match payload {
            Some(payload) => StatResponse::new(id, payload),
            None => {
                debug!(request_id = id, "not found");
                StatResponse::not_found(id)
            }
        }
    }

    /// Answer requests in order, one response per request.
    pub fn answer_all(&mut self, requests: &[StatRequest]) -> Vec<StatResponse> {
        let responses: Vec<StatResponse> = requests.iter().map(|r| self.answer(r)).collect();
        info!(
            requests = responses.len(),
            not_found = responses.iter().filter(|r| r.is_not_found()).count(),
            "answered stat requests"
        );
        responses
    }
}
