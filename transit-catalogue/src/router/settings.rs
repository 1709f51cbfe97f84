//! Routing settings and unit conversions.

use serde::{Deserialize, Serialize};

use super::graph::Weight;

const METERS_PER_KM: f64 = 1000.0;
const MINUTES_PER_HOUR: f64 = 60.0;

/// Error returned for settings the router cannot work with.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidSettings {
    #[error("bus velocity must be positive and finite, got {0}")]
    Velocity(f64),

    #[error("bus wait time must be non-negative and finite, got {0}")]
    WaitTime(f64),
}

/// Parameters that turn road distances into travel times.
///
/// Supplied once with the batch input and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutingSettings {
    /// Bus speed in km/h.
    #[serde(rename = "bus_velocity")]
    pub bus_velocity_kmh: f64,

    /// Time spent waiting for any bus at a stop, in minutes.
    #[serde(rename = "bus_wait_time")]
    pub bus_wait_time_min: f64,
}

impl RoutingSettings {
    /// Create validated settings.
    pub fn new(bus_velocity_kmh: f64, bus_wait_time_min: f64) -> Result<Self, InvalidSettings> {
        let settings = Self {
            bus_velocity_kmh,
            bus_wait_time_min,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Check the invariants `new` enforces, for settings that arrived
    /// through deserialization.
    pub fn validate(&self) -> Result<(), InvalidSettings> {
        if !self.bus_velocity_kmh.is_finite() || self.bus_velocity_kmh <= 0.0 {
            return Err(InvalidSettings::Velocity(self.bus_velocity_kmh));
        }
        if !self.bus_wait_time_min.is_finite() || self.bus_wait_time_min < 0.0 {
            return Err(InvalidSettings::WaitTime(self.bus_wait_time_min));
        }
        Ok(())
    }

    /// Distance a bus covers in one minute.
    pub fn meters_per_minute(&self) -> f64 {
        self.bus_velocity_kmh * METERS_PER_KM / MINUTES_PER_HOUR
    }

    /// The wait time expressed as the distance a bus would cover meanwhile,
    /// truncated to whole meters.
    pub fn wait_distance(&self) -> Weight {
        (self.bus_wait_time_min * self.meters_per_minute()).trunc() as Weight
    }

    /// Ride time in minutes for a distance in meters.
    pub fn distance_to_time(&self, meters: Weight) -> f64 {
        meters as f64 / self.meters_per_minute()
    }
}
