//! Feature Vector Layout

use crate::categories::{CategoryGroup, GROUPS, INDICATOR_COUNT};
use crate::error::NumericKind;
use once_cell::sync::Lazy;
use serde::Serialize;

/// Number of scalar fields at the head of the vector
pub const SCALAR_COUNT: usize = 8;

/// Number of features in the vector (8 scalars + 37 indicators)
pub const FEATURE_DIMENSION: usize = SCALAR_COUNT + INDICATOR_COUNT;

/// Scalar input fields, declared in vector order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarField {
    Age,
    /// Stored as `ln(page_views)`
    PageViews,
    FplValue,
    FplSel,
    FplPoints,
    NewForeign,
    BigClub,
    NewSigning,
}

impl ScalarField {
    /// All scalar fields in vector order
    pub const ALL: [ScalarField; SCALAR_COUNT] = [
        ScalarField::Age,
        ScalarField::PageViews,
        ScalarField::FplValue,
        ScalarField::FplSel,
        ScalarField::FplPoints,
        ScalarField::NewForeign,
        ScalarField::BigClub,
        ScalarField::NewSigning,
    ];

    /// Form field and column name
    pub fn name(&self) -> &'static str {
        match self {
            ScalarField::Age => "age",
            ScalarField::PageViews => "page_views",
            ScalarField::FplValue => "fpl_value",
            ScalarField::FplSel => "fpl_sel",
            ScalarField::FplPoints => "fpl_points",
            ScalarField::NewForeign => "new_foreign",
            ScalarField::BigClub => "big_club",
            ScalarField::NewSigning => "new_signing",
        }
    }

    /// Numeric type the raw string must parse as
    pub fn kind(&self) -> NumericKind {
        match self {
            ScalarField::FplValue | ScalarField::FplSel => NumericKind::Float,
            _ => NumericKind::Integer,
        }
    }

    /// Slot of this field in the feature vector
    pub fn index(self) -> usize {
        self as usize
    }
}

static COLUMN_NAMES: Lazy<Vec<String>> = Lazy::new(|| {
    let mut names = Vec::with_capacity(FEATURE_DIMENSION);
    names.extend(ScalarField::ALL.iter().map(|f| f.name().to_string()));
    for group in &GROUPS {
        names.extend(group.column_names());
    }
    names
});

/// Column names in the order the model was trained on
pub fn column_names() -> &'static [String] {
    &COLUMN_NAMES
}

/// Offset of a group's first indicator column
pub fn group_offset(group: &CategoryGroup) -> usize {
    let mut offset = SCALAR_COUNT;
    for g in &GROUPS {
        if g.prefix == group.prefix {
            return offset;
        }
        offset += g.len();
    }
    offset
}

/// Feature vector for ML inference
///
/// Always exactly [`FEATURE_DIMENSION`] values in [`column_names`] order.
/// Only the encoder builds one, so the width cannot drift.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    /// All scalars zero, all indicators off
    pub(crate) fn zeroed() -> Self {
        Self {
            values: vec![0.0; FEATURE_DIMENSION],
        }
    }

    pub(crate) fn set_scalar(&mut self, field: ScalarField, value: f64) {
        self.values[field.index()] = value;
    }

    /// Switch on the indicator of `category`; unknown categories are ignored
    pub(crate) fn set_indicator(&mut self, group: &CategoryGroup, category: &str) {
        if let Some(idx) = group.index_of(category) {
            self.values[group_offset(group) + idx] = 1.0;
        }
    }

    /// Raw feature values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of a scalar field
    pub fn scalar(&self, field: ScalarField) -> f64 {
        self.values[field.index()]
    }

    /// Value of a column by name, e.g. `"club_Chelsea"`
    pub fn get(&self, column: &str) -> Option<f64> {
        column_names()
            .iter()
            .position(|name| name == column)
            .map(|idx| self.values[idx])
    }

    /// Indicator block of one group
    pub fn group(&self, group: &CategoryGroup) -> &[f64] {
        let start = group_offset(group);
        &self.values[start..start + group.len()]
    }

    /// Sum of a group's indicators (0 or 1)
    pub fn group_sum(&self, group: &CategoryGroup) -> f64 {
        self.group(group).iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::{CLUB, POSITION, POSITION_CATEGORY, REGION};

    #[test]
    fn test_dimension() {
        assert_eq!(FEATURE_DIMENSION, 45);
        assert_eq!(column_names().len(), FEATURE_DIMENSION);
        assert_eq!(FeatureVector::zeroed().len(), FEATURE_DIMENSION);
    }

    #[test]
    fn test_column_order() {
        let names = column_names();
        assert_eq!(
            &names[..SCALAR_COUNT],
            &[
                "age",
                "page_views",
                "fpl_value",
                "fpl_sel",
                "fpl_points",
                "new_foreign",
                "big_club",
                "new_signing"
            ]
        );
        assert_eq!(names[8], "club_Bournemouth");
        assert_eq!(names[26], "club_West+Ham");
        assert_eq!(names[27], "position_CB");
        assert_eq!(names[39], "position_cat_Defenders");
        assert_eq!(names[42], "region_EU");
        assert_eq!(names[44], "region_Rest of World");
    }

    #[test]
    fn test_scalar_kinds() {
        let floats: Vec<&str> = ScalarField::ALL
            .iter()
            .filter(|f| f.kind() == NumericKind::Float)
            .map(|f| f.name())
            .collect();
        assert_eq!(floats, vec!["fpl_value", "fpl_sel"]);
        assert_eq!(ScalarField::NewSigning.index(), 7);
    }

    #[test]
    fn test_group_offsets() {
        assert_eq!(group_offset(&CLUB), 8);
        assert_eq!(group_offset(&POSITION), 27);
        assert_eq!(group_offset(&POSITION_CATEGORY), 39);
        assert_eq!(group_offset(&REGION), 42);
    }

    #[test]
    fn test_set_indicator() {
        let mut features = FeatureVector::zeroed();
        features.set_indicator(&REGION, "England");
        features.set_indicator(&CLUB, "Arsenal");

        assert_eq!(features.get("region_England"), Some(1.0));
        assert_eq!(features.group_sum(&REGION), 1.0);
        assert_eq!(features.group_sum(&CLUB), 0.0);
        assert_eq!(features.get("club_Arsenal"), None);
    }
}
