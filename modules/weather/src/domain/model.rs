//! Domain models and validated request inputs.

use chrono::{DateTime, Utc};

use crate::domain::error::DomainError;
use crate::domain::validate::{self, FieldViolation, Violations};

/// A city temperature observations are recorded against.
#[derive(Debug, Clone, PartialEq)]
pub struct City {
    pub id: i32,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}

/// A single temperature observation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Temperature {
    pub id: i32,
    pub city_id: i32,
    pub min: i32,
    pub max: i32,
    pub created_at: DateTime<Utc>,
}

/// Derived aggregate over the trailing observation window of one city.
/// Never stored; recomputed on every query. `min`/`max` are `None`
/// when no observation fell inside the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Forecast {
    pub city_id: i32,
    pub min: Option<i32>,
    pub max: Option<i32>,
    pub sample: i64,
}

impl Forecast {
    /// The well-defined "no data" projection for a city.
    pub fn empty(city_id: i32) -> Self {
        Self {
            city_id,
            min: None,
            max: None,
            sample: 0,
        }
    }
}

/// A registered callback for a city. Registration record only, no
/// delivery state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Webhook {
    pub id: i32,
    pub city_id: i32,
    pub callback_url: String,
}

/// City creation input prior to validation. Fields are optional so a
/// missing field is reported as a violation rather than a decode error.
#[derive(Debug, Clone, Default)]
pub struct CreateCity {
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// City creation input with all rules applied.
#[derive(Debug, Clone)]
pub struct NewCity {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl CreateCity {
    /// Rules: `name` required with length 1-128, `latitude` and
    /// `longitude` required.
    pub fn validate(self) -> Result<NewCity, DomainError> {
        let mut v = Violations::new();
        validate::required_text(&mut v, "name", self.name.as_deref());
        validate::length(&mut v, "name", self.name.as_deref(), 1, 128);
        validate::required(&mut v, "latitude", self.latitude.as_ref());
        validate::required(&mut v, "longitude", self.longitude.as_ref());
        v.finish()?;

        Ok(NewCity {
            name: self.name.unwrap_or_default(),
            latitude: self.latitude.unwrap_or_default(),
            longitude: self.longitude.unwrap_or_default(),
        })
    }
}

/// Partial city update. Absent fields leave the entity untouched;
/// presence is explicit, so `0.0` is a legitimate coordinate value
/// and never means "unset".
#[derive(Debug, Clone, Default)]
pub struct CityPatch {
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl CityPatch {
    /// Rules: every field optional; a present `name` must be non-empty
    /// and at most 128 characters.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut v = Violations::new();
        if let Some(name) = self.name.as_deref() {
            if name.is_empty() {
                v.add("name", validate::MSG_BLANK);
            }
            validate::length(&mut v, "name", Some(name), 1, 128);
        }
        v.finish()
    }

    /// Merges every present field onto `city`, field by field.
    /// Returns whether anything was written; an all-absent patch is a
    /// no-op and the caller must skip the persistence write.
    pub fn apply_to(&self, city: &mut City) -> bool {
        let mut changed = false;
        if let Some(name) = &self.name {
            city.name.clone_from(name);
            changed = true;
        }
        if let Some(latitude) = self.latitude {
            city.latitude = latitude;
            changed = true;
        }
        if let Some(longitude) = self.longitude {
            city.longitude = longitude;
            changed = true;
        }
        changed
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.latitude.is_none() && self.longitude.is_none()
    }
}

/// Temperature creation input prior to validation.
#[derive(Debug, Clone, Default)]
pub struct CreateTemperature {
    pub city_id: Option<i32>,
    pub min: Option<i32>,
    pub max: Option<i32>,
}

/// Temperature creation input with all rules applied.
#[derive(Debug, Clone, Copy)]
pub struct NewTemperature {
    pub city_id: i32,
    pub min: i32,
    pub max: i32,
}

impl CreateTemperature {
    /// Rules: `city_id` required and non-zero, `min`/`max` required and
    /// within [-100, 100]. The cross-field ordering rule runs only once
    /// the per-field rules pass, and fails on the `min` field.
    pub fn validate(self) -> Result<NewTemperature, DomainError> {
        let mut v = Violations::new();
        validate::required_id(&mut v, "city_id", self.city_id);
        validate::required(&mut v, "min", self.min.as_ref());
        validate::range(&mut v, "min", self.min, -100, 100);
        validate::required(&mut v, "max", self.max.as_ref());
        validate::range(&mut v, "max", self.max, -100, 100);
        v.finish()?;

        let (city_id, min, max) = match (self.city_id, self.min, self.max) {
            (Some(c), Some(lo), Some(hi)) => (c, lo, hi),
            _ => unreachable!("required rules passed"),
        };

        if min > max {
            return Err(DomainError::validation(vec![FieldViolation::new(
                "min",
                "min should be less than max",
            )]));
        }

        Ok(NewTemperature { city_id, min, max })
    }
}

/// Webhook creation input prior to validation.
#[derive(Debug, Clone, Default)]
pub struct CreateWebhook {
    pub city_id: Option<i32>,
    pub callback_url: Option<String>,
}

/// Webhook creation input with all rules applied.
#[derive(Debug, Clone)]
pub struct NewWebhook {
    pub city_id: i32,
    pub callback_url: String,
}

impl CreateWebhook {
    /// Rules: `city_id` required and non-zero, `callback_url` required
    /// and syntactically a URL.
    pub fn validate(self) -> Result<NewWebhook, DomainError> {
        let mut v = Violations::new();
        validate::required_id(&mut v, "city_id", self.city_id);
        validate::required_text(&mut v, "callback_url", self.callback_url.as_deref());
        validate::valid_url(&mut v, "callback_url", self.callback_url.as_deref());
        v.finish()?;

        Ok(NewWebhook {
            city_id: self.city_id.unwrap_or_default(),
            callback_url: self.callback_url.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn munich() -> City {
        City {
            id: 7,
            name: "Munich".to_owned(),
            latitude: 48.13,
            longitude: 11.57,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_patch_is_a_noop() {
        let mut city = munich();
        let before = city.clone();
        let patch = CityPatch::default();

        assert!(patch.is_empty());
        assert!(!patch.apply_to(&mut city));
        assert_eq!(city, before);
    }

    #[test]
    fn patch_overwrites_only_present_fields() {
        let mut city = munich();
        let patch = CityPatch {
            name: Some("Neu-Munich".to_owned()),
            latitude: None,
            longitude: None,
        };

        assert!(patch.apply_to(&mut city));
        assert_eq!(city.name, "Neu-Munich");
        assert_eq!(city.latitude, 48.13);
        assert_eq!(city.longitude, 11.57);
    }

    #[test]
    fn patch_accepts_explicit_zero_coordinate() {
        let mut city = munich();
        let patch = CityPatch {
            name: None,
            latitude: Some(0.0),
            longitude: None,
        };

        assert!(patch.validate().is_ok());
        assert!(patch.apply_to(&mut city));
        assert_eq!(city.latitude, 0.0);
    }

    #[test]
    fn create_city_reports_all_missing_fields() {
        let err = CreateCity::default().validate().unwrap_err();
        match err {
            DomainError::Validation { violations } => {
                let fields: Vec<_> = violations.iter().map(|f| f.field).collect();
                assert_eq!(fields, vec!["name", "latitude", "longitude"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn create_city_rejects_overlong_name() {
        let input = CreateCity {
            name: Some("x".repeat(129)),
            latitude: Some(1.0),
            longitude: Some(2.0),
        };
        match input.validate().unwrap_err() {
            DomainError::Validation { violations } => {
                assert_eq!(violations[0].field, "name");
                assert_eq!(violations[0].error, "the length must be between 1 and 128");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn temperature_min_above_max_fails_on_min() {
        let input = CreateTemperature {
            city_id: Some(1),
            min: Some(10),
            max: Some(5),
        };
        match input.validate().unwrap_err() {
            DomainError::Validation { violations } => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].field, "min");
                assert_eq!(violations[0].error, "min should be less than max");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn temperature_min_equal_max_is_accepted() {
        let input = CreateTemperature {
            city_id: Some(1),
            min: Some(5),
            max: Some(5),
        };
        let new = input.validate().unwrap();
        assert_eq!(new.min, 5);
        assert_eq!(new.max, 5);
    }

    #[test]
    fn temperature_range_violations_come_before_cross_field_rule() {
        let input = CreateTemperature {
            city_id: Some(1),
            min: Some(150),
            max: Some(-150),
        };
        match input.validate().unwrap_err() {
            DomainError::Validation { violations } => {
                assert_eq!(violations.len(), 2);
                assert_eq!(violations[0].field, "min");
                assert_eq!(violations[1].field, "max");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn webhook_requires_parsable_url() {
        let input = CreateWebhook {
            city_id: Some(1),
            callback_url: Some("url".to_owned()),
        };
        match input.validate().unwrap_err() {
            DomainError::Validation { violations } => {
                assert_eq!(violations[0].field, "callback_url");
                assert_eq!(violations[0].error, "must be a valid URL");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
