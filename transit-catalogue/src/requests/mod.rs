//! Request and response records and the handler that answers them.
//!
//! These types are the fixed internal shape of a batch: every input format
//! parses into a [`RequestDocument`] and renders [`StatResponse`]s.

mod handler;
mod response;
mod types;

pub use handler::{BuildError, RequestHandler, build_catalogue};
pub use response::{
    BusStatPayload, NOT_FOUND, ResponsePayload, RouteItem, RoutePayload, StatResponse, StopStatPayload,
};
pub use types::{BaseRequest, RequestDocument, SerializationSettings, StatRequest};
