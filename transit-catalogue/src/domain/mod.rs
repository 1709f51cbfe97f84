//! Domain types for the transit catalogue.
//!
//! Stops and buses are owned by the catalogue and cross-reference each
//! other only through dense integer indices, never through pointers.

mod bus;
mod coordinates;
mod error;
mod stop;

pub use bus::{Bus, BusIndex, BusStats};
pub use coordinates::{Coordinates, EARTH_RADIUS_M};
pub use error::CatalogueError;
pub use stop::{Stop, StopIndex};
