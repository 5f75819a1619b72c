//! Great-circle distances on a spherical body.
//!
//! Positions are planetocentric longitude/latitude in degrees. Distances are
//! surface arc lengths in kilometers, computed with the spherical law of
//! cosines:
//!
//! ```text
//! θ = arccos(sin φ₁ sin φ₂ + cos φ₁ cos φ₂ cos(λ₁ − λ₂))
//! d = θ · R
//! ```
//!
//! At zero separation rounding can push the arccos argument a few ULP past
//! 1.0, so the argument is clamped to [-1, 1] before the call. Identical and
//! antipodal points therefore always give a finite distance.
//!
//! Longitude normalization happens when a [`SurfacePoint`] is built from
//! catalog data, not here: the distance function accepts either convention
//! because only the longitude difference enters the formula.

use crate::constants::{DEG_TO_RAD, FULL_CIRCLE_DEG, MARS_MEAN_RADIUS_KM, MOON_MEAN_RADIUS_KM};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A sphere with a named mean radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalBody {
    pub name: &'static str,
    /// Mean radius, in kilometers.
    pub mean_radius_km: f64,
}

impl SphericalBody {
    pub const MOON: SphericalBody = SphericalBody {
        name: "Moon",
        mean_radius_km: MOON_MEAN_RADIUS_KM,
    };

    pub const MARS: SphericalBody = SphericalBody {
        name: "Mars",
        mean_radius_km: MARS_MEAN_RADIUS_KM,
    };

    /// A body with a custom radius, e.g. from a `--radius` override.
    pub const fn with_radius(name: &'static str, mean_radius_km: f64) -> Self {
        Self {
            name,
            mean_radius_km,
        }
    }

    /// Surface distance between two points on this body, in kilometers.
    #[inline]
    pub fn distance(&self, a: SurfacePoint, b: SurfacePoint) -> f64 {
        great_circle_distance(a, b, self.mean_radius_km)
    }
}

impl Default for SphericalBody {
    fn default() -> Self {
        Self::MOON
    }
}

impl fmt::Display for SphericalBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (R = {} km)", self.name, self.mean_radius_km)
    }
}

/// A position on the surface, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfacePoint {
    pub lon_deg: f64,
    pub lat_deg: f64,
}

impl SurfacePoint {
    pub const fn new(lon_deg: f64, lat_deg: f64) -> Self {
        Self { lon_deg, lat_deg }
    }

    /// Builds a point with its longitude wrapped into [0, 360).
    pub fn normalized(lon_deg: f64, lat_deg: f64) -> Self {
        Self {
            lon_deg: normalize_longitude_360(lon_deg),
            lat_deg,
        }
    }
}

impl fmt::Display for SurfacePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(lon {:.4}°, lat {:+.4}°)", self.lon_deg, self.lat_deg)
    }
}

/// Wraps a longitude in degrees into [0, 360).
///
/// Values from the [-180, 180) convention map to the same meridian in
/// [0, 360): `-90.0` becomes `270.0`.
#[inline]
pub fn normalize_longitude_360(lon_deg: f64) -> f64 {
    let wrapped = lon_deg.rem_euclid(FULL_CIRCLE_DEG);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= FULL_CIRCLE_DEG {
        0.0
    } else {
        wrapped
    }
}

/// Central angle between two surface points, in radians.
///
/// Spherical law of cosines with the arccos argument clamped to [-1, 1].
pub fn central_angle(a: SurfacePoint, b: SurfacePoint) -> f64 {
    let lat_a = a.lat_deg * DEG_TO_RAD;
    let lat_b = b.lat_deg * DEG_TO_RAD;
    // cos is even, so the sign of the longitude difference does not matter
    let delta_lon = libm::fabs(a.lon_deg - b.lon_deg) * DEG_TO_RAD;

    let cos_angle = libm::sin(lat_a) * libm::sin(lat_b)
        + libm::cos(lat_a) * libm::cos(lat_b) * libm::cos(delta_lon);

    libm::acos(cos_angle.clamp(-1.0, 1.0))
}

/// Great-circle distance between two points on a sphere of `radius_km`.
#[inline]
pub fn great_circle_distance(a: SurfacePoint, b: SurfacePoint, radius_km: f64) -> f64 {
    central_angle(a, b) * radius_km
}

/// Great-circle distance on the Moon, in kilometers.
#[inline]
pub fn distance(a: SurfacePoint, b: SurfacePoint) -> f64 {
    great_circle_distance(a, b, MOON_MEAN_RADIUS_KM)
}
