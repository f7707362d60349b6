//! Feature Engineering Engine
//!
//! Encodes football-player form submissions into the fixed-order feature
//! vector the market value model was trained on.

pub mod categories;
mod encoder;
mod error;
mod features;

pub use categories::CategoryGroup;
pub use encoder::{encode, PlayerProfile, RawInput};
pub use error::{EncodeError, NumericKind};
pub use features::{column_names, FeatureVector, ScalarField, FEATURE_DIMENSION, SCALAR_COUNT};
