//! Transport catalogue and bus router.
//!
//! Builds a catalogue of stops, buses and road distances from a batch of
//! requests, then answers bus, stop and fastest-route queries against it,
//! either directly, from a saved snapshot, or over HTTP.

pub mod catalogue;
pub mod domain;
pub mod format;
pub mod requests;
pub mod router;
pub mod snapshot;
pub mod web;
