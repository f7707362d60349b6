//! Player Feature Encoder
//!
//! Turns submitted form fields into the model's feature vector in two steps:
//! [`PlayerProfile::parse`] validates and types the raw strings, then
//! [`PlayerProfile::to_features`] lays the profile out in column order.

use crate::categories::{CategoryGroup, CLUB, POSITION, POSITION_CATEGORY, REGION};
use crate::error::{EncodeError, NumericKind};
use crate::features::{FeatureVector, ScalarField};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Raw form submission, every field as the client sent it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInput {
    pub age: String,
    pub page_views: String,
    pub fpl_value: String,
    pub fpl_sel: String,
    pub fpl_points: String,
    pub new_foreign: String,
    pub new_signing: String,
    pub big_club: String,
    pub club: String,
    pub position: String,
    pub position_cat: String,
    pub region: String,
}

impl RawInput {
    /// Build from a field-name → value mapping; extra keys are ignored
    pub fn from_fields(fields: &HashMap<String, String>) -> Result<Self, EncodeError> {
        let take = |name: &'static str| {
            fields
                .get(name)
                .cloned()
                .ok_or(EncodeError::MissingField(name))
        };

        Ok(Self {
            age: take("age")?,
            page_views: take("page_views")?,
            fpl_value: take("fpl_value")?,
            fpl_sel: take("fpl_sel")?,
            fpl_points: take("fpl_points")?,
            new_foreign: take("new_foreign")?,
            new_signing: take("new_signing")?,
            big_club: take("big_club")?,
            club: take(CLUB.field)?,
            position: take(POSITION.field)?,
            position_cat: take(POSITION_CATEGORY.field)?,
            region: take(REGION.field)?,
        })
    }

    /// Raw string of a scalar field
    pub fn scalar(&self, field: ScalarField) -> &str {
        match field {
            ScalarField::Age => &self.age,
            ScalarField::PageViews => &self.page_views,
            ScalarField::FplValue => &self.fpl_value,
            ScalarField::FplSel => &self.fpl_sel,
            ScalarField::FplPoints => &self.fpl_points,
            ScalarField::NewForeign => &self.new_foreign,
            ScalarField::BigClub => &self.big_club,
            ScalarField::NewSigning => &self.new_signing,
        }
    }
}

/// Validated, typed player attributes
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerProfile {
    pub age: i64,
    /// Always > 0
    pub page_views: i64,
    pub fpl_value: f64,
    pub fpl_sel: f64,
    pub fpl_points: i64,
    pub new_foreign: i64,
    pub new_signing: i64,
    pub big_club: i64,
    /// Matched known category, `None` when the model has no column for it
    pub club: Option<&'static str>,
    pub position: Option<&'static str>,
    pub position_cat: Option<&'static str>,
    pub region: Option<&'static str>,
}

fn parse_integer(raw: &RawInput, field: ScalarField) -> Result<i64, EncodeError> {
    let value = raw.scalar(field);
    value.trim().parse::<i64>().map_err(|_| EncodeError::Parse {
        field: field.name(),
        kind: NumericKind::Integer,
        value: value.to_string(),
    })
}

fn parse_float(raw: &RawInput, field: ScalarField) -> Result<f64, EncodeError> {
    let value = raw.scalar(field);
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(EncodeError::Parse {
            field: field.name(),
            kind: NumericKind::Float,
            value: value.to_string(),
        }),
    }
}

fn resolve(group: &CategoryGroup, value: &str) -> Option<&'static str> {
    let matched = group.lookup(value);
    if matched.is_none() {
        debug!(
            "Unknown {} {:?}, leaving {}* indicators off",
            group.field, value, group.prefix
        );
    }
    matched
}

impl PlayerProfile {
    /// Parse and validate a raw submission
    pub fn parse(raw: &RawInput) -> Result<Self, EncodeError> {
        let profile = Self {
            age: parse_integer(raw, ScalarField::Age)?,
            page_views: parse_integer(raw, ScalarField::PageViews)?,
            fpl_value: parse_float(raw, ScalarField::FplValue)?,
            fpl_sel: parse_float(raw, ScalarField::FplSel)?,
            fpl_points: parse_integer(raw, ScalarField::FplPoints)?,
            new_foreign: parse_integer(raw, ScalarField::NewForeign)?,
            new_signing: parse_integer(raw, ScalarField::NewSigning)?,
            big_club: parse_integer(raw, ScalarField::BigClub)?,
            club: resolve(&CLUB, &raw.club),
            position: resolve(&POSITION, &raw.position),
            position_cat: resolve(&POSITION_CATEGORY, &raw.position_cat),
            region: resolve(&REGION, &raw.region),
        };

        // ln is undefined at and below zero
        if profile.page_views <= 0 {
            return Err(EncodeError::Domain {
                field: ScalarField::PageViews.name(),
                value: profile.page_views,
            });
        }

        Ok(profile)
    }

    /// Lay the profile out in model column order
    pub fn to_features(&self) -> FeatureVector {
        let mut features = FeatureVector::zeroed();

        features.set_scalar(ScalarField::Age, self.age as f64);
        features.set_scalar(ScalarField::PageViews, (self.page_views as f64).ln());
        features.set_scalar(ScalarField::FplValue, self.fpl_value);
        features.set_scalar(ScalarField::FplSel, self.fpl_sel);
        features.set_scalar(ScalarField::FplPoints, self.fpl_points as f64);
        features.set_scalar(ScalarField::NewForeign, self.new_foreign as f64);
        features.set_scalar(ScalarField::BigClub, self.big_club as f64);
        features.set_scalar(ScalarField::NewSigning, self.new_signing as f64);

        let selections = [
            (&CLUB, self.club),
            (&POSITION, self.position),
            (&POSITION_CATEGORY, self.position_cat),
            (&REGION, self.region),
        ];
        for (group, category) in selections {
            if let Some(category) = category {
                features.set_indicator(group, category);
            }
        }

        features
    }
}

/// Encode a raw submission into the model's feature vector
pub fn encode(raw: &RawInput) -> Result<FeatureVector, EncodeError> {
    let profile = PlayerProfile::parse(raw)?;
    debug!(
        "Encoding player: club={:?}, position={:?}, position_cat={:?}, region={:?}",
        profile.club, profile.position, profile.position_cat, profile.region
    );
    Ok(profile.to_features())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::{CLUBS, POSITIONS, POSITION_CATEGORIES, REGIONS};
    use crate::features::{column_names, FEATURE_DIMENSION, SCALAR_COUNT};
    use proptest::prelude::*;

    fn chelsea_midfielder() -> RawInput {
        RawInput {
            age: "25".into(),
            page_views: "1000".into(),
            fpl_value: "5.5".into(),
            fpl_sel: "10.0".into(),
            fpl_points: "100".into(),
            new_foreign: "0".into(),
            new_signing: "0".into(),
            big_club: "1".into(),
            club: "Chelsea".into(),
            position: "CM".into(),
            position_cat: "Midfielders".into(),
            region: "England".into(),
        }
    }

    #[test]
    fn test_worked_example() {
        let features = encode(&chelsea_midfielder()).unwrap();

        assert_eq!(features.len(), FEATURE_DIMENSION);
        assert_eq!(features.scalar(ScalarField::Age), 25.0);
        assert!((features.scalar(ScalarField::PageViews) - 1000f64.ln()).abs() < 1e-12);
        assert_eq!(features.scalar(ScalarField::FplValue), 5.5);
        assert_eq!(features.scalar(ScalarField::FplSel), 10.0);
        assert_eq!(features.scalar(ScalarField::FplPoints), 100.0);
        assert_eq!(features.scalar(ScalarField::BigClub), 1.0);
        assert_eq!(features.scalar(ScalarField::NewSigning), 0.0);

        let on = [
            "club_Chelsea",
            "position_CM",
            "position_cat_Midfielders",
            "region_England",
        ];
        for (name, value) in column_names().iter().zip(features.values()).skip(SCALAR_COUNT) {
            let expected = if on.contains(&name.as_str()) { 1.0 } else { 0.0 };
            assert_eq!(*value, expected, "column {}", name);
        }
    }

    #[test]
    fn test_big_club_precedes_new_signing() {
        let mut raw = chelsea_midfielder();
        raw.big_club = "0".into();
        raw.new_signing = "1".into();

        let values = encode(&raw).unwrap().into_values();
        assert_eq!(values[6], 0.0);
        assert_eq!(values[7], 1.0);
    }

    #[test]
    fn test_single_page_view_logs_to_zero() {
        let mut raw = chelsea_midfielder();
        raw.page_views = "1".into();

        let features = encode(&raw).unwrap();
        assert_eq!(features.scalar(ScalarField::PageViews), 0.0);
    }

    #[test]
    fn test_unknown_club_degrades_to_zero_block() {
        let mut raw = chelsea_midfielder();
        raw.club = "Arsenal".into();

        let features = encode(&raw).unwrap();
        assert_eq!(features.group_sum(&CLUB), 0.0);
        assert_eq!(features.get("position_CM"), Some(1.0));
    }

    #[test]
    fn test_forwards_has_no_column() {
        let mut raw = chelsea_midfielder();
        raw.position = "ST".into();
        raw.position_cat = "Forwards".into();

        let features = encode(&raw).unwrap();
        assert_eq!(features.group_sum(&POSITION), 0.0);
        assert_eq!(features.group_sum(&POSITION_CATEGORY), 0.0);
    }

    #[test]
    fn test_literal_plus_and_space_categories() {
        let mut raw = chelsea_midfielder();
        raw.club = "West+Ham".into();
        raw.region = "Rest of World".into();

        let features = encode(&raw).unwrap();
        assert_eq!(features.get("club_West+Ham"), Some(1.0));
        assert_eq!(features.get("region_Rest of World"), Some(1.0));

        raw.club = "West Ham".into();
        assert_eq!(encode(&raw).unwrap().group_sum(&CLUB), 0.0);
    }

    #[test]
    fn test_non_numeric_age() {
        let mut raw = chelsea_midfielder();
        raw.age = "abc".into();

        let err = encode(&raw).unwrap_err();
        assert_eq!(
            err,
            EncodeError::Parse {
                field: "age",
                kind: NumericKind::Integer,
                value: "abc".into(),
            }
        );
    }

    #[test]
    fn test_integer_field_rejects_decimal() {
        let mut raw = chelsea_midfielder();
        raw.fpl_points = "100.5".into();
        assert_eq!(encode(&raw).unwrap_err().field(), "fpl_points");
    }

    #[test]
    fn test_integer_range_and_grammar() {
        let mut raw = chelsea_midfielder();
        raw.age = "+25".into();
        assert_eq!(encode(&raw).unwrap().scalar(ScalarField::Age), 25.0);

        // Digit separators and values beyond i64 are not integers here
        for value in ["1_000", "99999999999999999999"] {
            let mut raw = chelsea_midfielder();
            raw.page_views = value.into();
            assert_eq!(
                encode(&raw).unwrap_err(),
                EncodeError::Parse {
                    field: "page_views",
                    kind: NumericKind::Integer,
                    value: value.into(),
                }
            );
        }
    }

    #[test]
    fn test_float_field_rejects_non_finite() {
        let mut raw = chelsea_midfielder();
        raw.fpl_value = "NaN".into();
        assert!(matches!(
            encode(&raw),
            Err(EncodeError::Parse { field: "fpl_value", .. })
        ));

        raw.fpl_value = "inf".into();
        assert!(encode(&raw).is_err());
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let mut raw = chelsea_midfielder();
        raw.age = " 25 ".into();
        raw.fpl_sel = "10.0\n".into();

        assert_eq!(encode(&raw).unwrap(), encode(&chelsea_midfielder()).unwrap());
    }

    #[test]
    fn test_zero_page_views_is_domain_error() {
        let mut raw = chelsea_midfielder();
        raw.page_views = "0".into();
        assert_eq!(
            encode(&raw).unwrap_err(),
            EncodeError::Domain {
                field: "page_views",
                value: 0
            }
        );

        raw.page_views = "-5".into();
        assert!(matches!(encode(&raw), Err(EncodeError::Domain { value: -5, .. })));
    }

    #[test]
    fn test_from_fields() {
        let raw = chelsea_midfielder();
        let mut fields: HashMap<String, String> = [
            ("age", &raw.age),
            ("page_views", &raw.page_views),
            ("fpl_value", &raw.fpl_value),
            ("fpl_sel", &raw.fpl_sel),
            ("fpl_points", &raw.fpl_points),
            ("new_foreign", &raw.new_foreign),
            ("new_signing", &raw.new_signing),
            ("big_club", &raw.big_club),
            ("club", &raw.club),
            ("position", &raw.position),
            ("position_cat", &raw.position_cat),
            ("region", &raw.region),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();
        fields.insert("submit".into(), "Predict".into());

        assert_eq!(RawInput::from_fields(&fields).unwrap(), raw);

        fields.remove("region");
        assert_eq!(
            RawInput::from_fields(&fields).unwrap_err(),
            EncodeError::MissingField("region")
        );
    }

    fn category(known: &'static [&'static str]) -> impl Strategy<Value = String> {
        prop_oneof![
            prop::sample::select(known.to_vec()).prop_map(String::from),
            "[A-Za-z+ ]{0,16}",
        ]
    }

    prop_compose! {
        fn raw_input()(
            age in 15i64..45,
            page_views in 1i64..10_000_000,
            fpl_value in 0.0f64..15.0,
            fpl_sel in 0.0f64..80.0,
            fpl_points in 0i64..300,
            new_foreign in 0i64..2,
            new_signing in 0i64..2,
            big_club in 0i64..2,
            club in category(CLUBS),
            position in category(POSITIONS),
            position_cat in category(POSITION_CATEGORIES),
            region in category(REGIONS),
        ) -> RawInput {
            RawInput {
                age: age.to_string(),
                page_views: page_views.to_string(),
                fpl_value: fpl_value.to_string(),
                fpl_sel: fpl_sel.to_string(),
                fpl_points: fpl_points.to_string(),
                new_foreign: new_foreign.to_string(),
                new_signing: new_signing.to_string(),
                big_club: big_club.to_string(),
                club,
                position,
                position_cat,
                region,
            }
        }
    }

    proptest! {
        #[test]
        fn prop_fixed_width_and_one_hot(raw in raw_input()) {
            let features = encode(&raw).unwrap();
            prop_assert_eq!(features.len(), FEATURE_DIMENSION);

            for (group, value) in [
                (&CLUB, &raw.club),
                (&POSITION, &raw.position),
                (&POSITION_CATEGORY, &raw.position_cat),
                (&REGION, &raw.region),
            ] {
                let sum = features.group_sum(group);
                let known = group.lookup(value).is_some();
                prop_assert_eq!(sum, if known { 1.0 } else { 0.0 });
                prop_assert!(features.group(group).iter().all(|v| *v == 0.0 || *v == 1.0));
            }
        }

        #[test]
        fn prop_encoding_is_idempotent(raw in raw_input()) {
            prop_assert_eq!(encode(&raw).unwrap(), encode(&raw).unwrap());
        }

        #[test]
        fn prop_page_views_slot_is_log(raw in raw_input()) {
            let features = encode(&raw).unwrap();
            let expected = raw.page_views.parse::<f64>().unwrap().ln();
            prop_assert!(features.scalar(ScalarField::PageViews).is_finite());
            prop_assert_eq!(features.scalar(ScalarField::PageViews), expected);
        }
    }
}
