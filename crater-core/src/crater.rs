//! Crater identifiers and normalized crater records.
//!
//! Catalogs disagree on identifier shape: the Yang et al. aged database uses
//! integers, the Robbins 2018 database uses text such as `"00-1-000001"`.
//! [`CraterId`] holds either. Text that is the canonical form of an integer
//! becomes the integer, so `"1207"` read from a JSON key and `1207` read from a
//! CSV column are the same id. Text such as `"0042"` or `"+7"` stays text, so
//! it is written back exactly as the source catalog spelled it.
//!
//! A [`Crater`] is validated on construction and its longitude is wrapped into
//! [0, 360). Everything downstream (matching, correction) can rely on that.

use crate::errors::{CraterError, CraterResult};
use crate::geodesy::SurfacePoint;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CraterId {
    Numeric(i64),
    Text(String),
}

impl CraterId {
    pub fn parse(s: &str) -> CraterResult<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CraterError::InvalidId {
                message: "identifier is empty".to_string(),
            });
        }
        Ok(match trimmed.parse::<i64>() {
            Ok(n) if n.to_string() == trimmed => Self::Numeric(n),
            _ => Self::Text(trimmed.to_string()),
        })
    }
}

impl FromStr for CraterId {
    type Err = CraterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CraterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => fmt::Display::fmt(n, f),
            Self::Text(s) => f.pad(s),
        }
    }
}

impl From<i64> for CraterId {
    fn from(n: i64) -> Self {
        Self::Numeric(n)
    }
}

impl Serialize for CraterId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Numeric(n) => serializer.serialize_i64(*n),
            Self::Text(s) => serializer.serialize_str(s),
        }
    }
}

struct CraterIdVisitor;

impl<'de> Visitor<'de> for CraterIdVisitor {
    type Value = CraterId;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an integer or a non-empty string crater id")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<CraterId, E> {
        Ok(CraterId::Numeric(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<CraterId, E> {
        i64::try_from(v)
            .map(CraterId::Numeric)
            .map_err(|_| E::custom(format!("crater id {} does not fit in i64", v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<CraterId, E> {
        if v.fract() == 0.0 && v >= i64::MIN as f64 && v <= i64::MAX as f64 {
            Ok(CraterId::Numeric(v as i64))
        } else {
            Err(E::custom(format!("crater id {} is not an integer", v)))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<CraterId, E> {
        CraterId::parse(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for CraterId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CraterIdVisitor)
    }
}

/// A crater reduced to what containment matching needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Crater {
    pub id: CraterId,
    /// Center, longitude in [0, 360).
    pub center: SurfacePoint,
    /// Rim diameter, in kilometers.
    pub diameter_km: f64,
    /// Model age carried by parent catalogs; opaque to matching.
    pub age: Option<String>,
}

impl Crater {
    /// Validates and normalizes a crater record.
    ///
    /// Longitudes in the [-180, 180) convention are wrapped into [0, 360).
    /// Fails on non-finite coordinates, latitude outside [-90, 90] or a
    /// diameter that is not strictly positive.
    pub fn new(
        id: impl Into<CraterId>,
        lon_deg: f64,
        lat_deg: f64,
        diameter_km: f64,
    ) -> CraterResult<Self> {
        let id = id.into();
        if !lon_deg.is_finite() || !lat_deg.is_finite() {
            return Err(CraterError::invalid_crater(&id, "coordinates must be finite"));
        }
        if !(-90.0..=90.0).contains(&lat_deg) {
            return Err(CraterError::invalid_crater(
                &id,
                &format!("latitude {} outside [-90, 90]", lat_deg),
            ));
        }
        if !diameter_km.is_finite() || diameter_km <= 0.0 {
            return Err(CraterError::invalid_crater(
                &id,
                &format!("diameter {} must be positive", diameter_km),
            ));
        }
        Ok(Self {
            id,
            center: SurfacePoint::normalized(lon_deg, lat_deg),
            diameter_km,
            age: None,
        })
    }

    pub fn with_age(mut self, age: impl Into<String>) -> Self {
        self.age = Some(age.into());
        self
    }

    #[inline]
    pub fn radius_km(&self) -> f64 {
        self.diameter_km / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crater_id_parse_numeric() {
        assert_eq!(CraterId::parse("1207").unwrap(), CraterId::Numeric(1207));
        assert_eq!(CraterId::parse("  -3 ").unwrap(), CraterId::Numeric(-3));
    }

    #[test]
    fn test_crater_id_parse_text() {
        assert_eq!(
            CraterId::parse("00-1-000001").unwrap(),
            CraterId::Text("00-1-000001".to_string())
        );
    }

    #[test]
    fn test_crater_id_parse_empty_fails() {
        assert!(CraterId::parse("   ").is_err());
    }

    #[test]
    fn test_crater_id_json_forms() {
        let ids = vec![CraterId::Numeric(5), CraterId::Text("03-1-000010".into())];
        let json = serde_json::to_string(&ids).unwrap();
        assert_eq!(json, r#"[5,"03-1-000010"]"#);

        let back: Vec<CraterId> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ids);
    }

    #[test]
    fn test_crater_id_numeric_text_is_numeric() {
        let id: CraterId = serde_json::from_str(r#""42""#).unwrap();
        assert_eq!(id, CraterId::Numeric(42));
    }

    #[test]
    fn test_crater_id_keeps_leading_zeros() {
        for raw in ["0042", "+7", "-0", "007"] {
            let id = CraterId::parse(raw).unwrap();
            assert_eq!(id, CraterId::Text(raw.to_string()));
            assert_eq!(id.to_string(), raw);
        }
        assert_eq!(CraterId::parse("0").unwrap(), CraterId::Numeric(0));

        let json = serde_json::to_string(&CraterId::parse("0042").unwrap()).unwrap();
        assert_eq!(json, r#""0042""#);
    }

    #[test]
    fn test_crater_new_wraps_longitude() {
        let crater = Crater::new(1i64, -170.0, 12.5, 30.0).unwrap();
        assert_eq!(crater.center.lon_deg, 190.0);
        assert_eq!(crater.center.lat_deg, 12.5);
        assert_eq!(crater.radius_km(), 15.0);
        assert!(crater.age.is_none());
    }

    #[test]
    fn test_crater_new_rejects_bad_geometry() {
        assert!(Crater::new(1i64, 0.0, 91.0, 1.0).is_err());
        assert!(Crater::new(1i64, f64::NAN, 0.0, 1.0).is_err());
        assert!(Crater::new(1i64, 0.0, 0.0, 0.0).is_err());
        assert!(Crater::new(1i64, 0.0, 0.0, -4.0).is_err());
        assert!(Crater::new(1i64, 0.0, 0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_crater_with_age() {
        let crater = Crater::new(7i64, 10.0, 0.0, 120.0).unwrap().with_age("3.91");
        assert_eq!(crater.age.as_deref(), Some("3.91"));
    }
}
