//! Geographic coordinates and great-circle distance.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A point on the Earth's surface, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance to `other` in meters (spherical law of cosines).
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_catalogue::domain::Coordinates;
    ///
    /// let a = Coordinates::new(55.611087, 37.20829);
    /// assert_eq!(a.distance_to(&a), 0.0);
    ///
    /// let b = Coordinates::new(55.595884, 37.209755);
    /// let d = a.distance_to(&b);
    /// assert!(d > 1600.0 && d < 1700.0);
    /// ```
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        if self == other {
            return 0.0;
        }

        let dr = std::f64::consts::PI / 180.0;
        let cos_angle = (self.lat * dr).sin() * (other.lat * dr).sin()
            + (self.lat * dr).cos() * (other.lat * dr).cos() * ((self.lng - other.lng).abs() * dr).cos();

        // Rounding can push nearly-identical points just outside acos's domain.
        cos_angle.clamp(-1.0, 1.0).acos() * EARTH_RADIUS_M
    }
}
