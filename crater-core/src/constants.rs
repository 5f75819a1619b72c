#[allow(clippy::excessive_precision)]
#[allow(clippy::approx_constant)]
pub const PI: f64 = 3.141592653589793238462643;

#[allow(clippy::excessive_precision)]
pub const DEG_TO_RAD: f64 = 1.745329251994329576923691e-2;

pub const FULL_CIRCLE_DEG: f64 = 360.0;

/// Mean radius of the Moon in kilometers (NSSDC Moon fact sheet).
pub const MOON_MEAN_RADIUS_KM: f64 = 1737.4;

/// Volumetric mean radius of Mars in kilometers (NSSDC Mars fact sheet).
pub const MARS_MEAN_RADIUS_KM: f64 = 3389.5;
