//! Geometry and records for crater-in-crater containment.
//!
//! Everything here is pure: no I/O, no logging. Catalog loading, matching and
//! correction live in `crater-catalog`.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`geodesy`] | [`SurfacePoint`], [`SphericalBody`], clamped great-circle [`distance`] |
//! | [`containment`] | [`contains`], [`contains_with`] and the rim [`Boundary`] policy |
//! | [`crater`] | [`Crater`] records and [`CraterId`] |
//! | [`overlap`] | [`OverlapMapping`], parent id → set of child ids |
//! | [`errors`] | [`CraterError`] |
//!
//! ```
//! use crater_core::{contains, SurfacePoint};
//!
//! let child = SurfacePoint::new(10.0, 0.0);
//! let parent = SurfacePoint::new(10.0, 0.0);
//! assert!(contains(child, parent, 20.0));
//! ```

pub mod constants;
pub mod containment;
pub mod crater;
pub mod errors;
pub mod geodesy;
pub mod overlap;

pub use containment::{contains, contains_with, Boundary};
pub use crater::{Crater, CraterId};
pub use errors::{CraterError, CraterResult};
pub use geodesy::{distance, great_circle_distance, normalize_longitude_360, SphericalBody, SurfacePoint};
pub use overlap::OverlapMapping;
