//! Categorical Lookup Tables
//!
//! The known categories of each one-hot group, in model column order.
//! Categories missing from a group (e.g. the `Forwards` position category)
//! were dropped as the baseline level when the model was fitted.

/// Known clubs (`club_*` columns)
pub const CLUBS: &[&str] = &[
    "Bournemouth",
    "Brighton+and+Hove",
    "Burnley",
    "Chelsea",
    "Crystal+Palace",
    "Everton",
    "Huddersfield",
    "Leicester+City",
    "Liverpool",
    "Manchester+City",
    "Manchester+United",
    "Newcastle+United",
    "Southampton",
    "Stoke+City",
    "Swansea",
    "Tottenham",
    "Watford",
    "West+Brom",
    "West+Ham",
];

/// Known playing positions (`position_*` columns)
pub const POSITIONS: &[&str] = &[
    "CB", "CF", "CM", "DM", "GK", "LB", "LM", "LW", "RB", "RM", "RW", "SS",
];

/// Known position categories (`position_cat_*` columns)
pub const POSITION_CATEGORIES: &[&str] = &["Defenders", "Goalkeeper", "Midfielders"];

/// Known regions (`region_*` columns)
pub const REGIONS: &[&str] = &["EU", "England", "Rest of World"];

/// A one-hot encoded categorical input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryGroup {
    /// Form field carrying the raw value
    pub field: &'static str,
    /// Column name prefix
    pub prefix: &'static str,
    /// Known categories in column order
    pub categories: &'static [&'static str],
}

pub const CLUB: CategoryGroup = CategoryGroup {
    field: "club",
    prefix: "club_",
    categories: CLUBS,
};

pub const POSITION: CategoryGroup = CategoryGroup {
    field: "position",
    prefix: "position_",
    categories: POSITIONS,
};

pub const POSITION_CATEGORY: CategoryGroup = CategoryGroup {
    field: "position_cat",
    prefix: "position_cat_",
    categories: POSITION_CATEGORIES,
};

pub const REGION: CategoryGroup = CategoryGroup {
    field: "region",
    prefix: "region_",
    categories: REGIONS,
};

/// All groups, in the order their blocks appear in the feature vector
pub const GROUPS: [CategoryGroup; 4] = [CLUB, POSITION, POSITION_CATEGORY, REGION];

/// Total number of indicator columns across all groups
pub const INDICATOR_COUNT: usize =
    CLUBS.len() + POSITIONS.len() + POSITION_CATEGORIES.len() + REGIONS.len();

impl CategoryGroup {
    /// Resolve a raw value to a known category.
    ///
    /// Matching is exact and case-sensitive; `"Manchester+United"` and
    /// `"Rest of World"` are matched literally. Returns `None` for values the
    /// model has no column for.
    pub fn lookup(&self, value: &str) -> Option<&'static str> {
        self.categories.iter().copied().find(|c| *c == value)
    }

    /// Index of a category within this group's block
    pub fn index_of(&self, category: &str) -> Option<usize> {
        self.categories.iter().position(|c| *c == category)
    }

    /// Number of indicator columns in this group
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Column names of this group's block, in order
    pub fn column_names(&self) -> impl Iterator<Item = String> + '_ {
        self.categories
            .iter()
            .map(move |c| format!("{}{}", self.prefix, c))
    }
}
