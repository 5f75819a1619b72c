//! Point-in-crater containment.
//!
//! A point lies inside a crater when its great-circle distance from the crater
//! center is less than the crater's radius (half its diameter). The rim itself
//! is handled by a [`Boundary`] policy: the matcher uses a strict test, the
//! corrector an inclusive one.

use crate::crater::Crater;
use crate::geodesy::{SphericalBody, SurfacePoint};

/// How a point exactly on the rim is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Boundary {
    /// `distance < radius`; the rim is outside.
    #[default]
    Exclusive,
    /// `distance <= radius`; the rim is inside.
    Inclusive,
}

impl Boundary {
    #[inline]
    pub fn admits(self, distance_km: f64, radius_km: f64) -> bool {
        match self {
            Self::Exclusive => distance_km < radius_km,
            Self::Inclusive => distance_km <= radius_km,
        }
    }
}

/// Strict containment on the Moon: `distance(child, center) < diameter / 2`.
#[inline]
pub fn contains(child: SurfacePoint, parent_center: SurfacePoint, parent_diameter_km: f64) -> bool {
    contains_with(
        &SphericalBody::MOON,
        child,
        parent_center,
        parent_diameter_km,
        Boundary::Exclusive,
    )
}

/// Containment on an arbitrary body with an explicit rim policy.
#[inline]
pub fn contains_with(
    body: &SphericalBody,
    child: SurfacePoint,
    parent_center: SurfacePoint,
    parent_diameter_km: f64,
    boundary: Boundary,
) -> bool {
    let distance_km = body.distance(child, parent_center);
    boundary.admits(distance_km, parent_diameter_km / 2.0)
}

impl Crater {
    /// Whether `child`'s center lies inside this crater's footprint.
    #[inline]
    pub fn contains_center_of(&self, child: &Crater, body: &SphericalBody, boundary: Boundary) -> bool {
        contains_with(body, child.center, self.center, self.diameter_km, boundary)
    }
}
