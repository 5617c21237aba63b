//! Product category enumeration.

use serde::{Deserialize, Serialize};

/// Product category.
///
/// The catalog recognizes a fixed set of categories. Wire records from the
/// legacy backend carry Vietnamese tokens (`dogiadung`, `dientu`,
/// `thucpham`, `douong`); those are accepted as aliases during
/// deserialization and normalized here, at the type level, so nothing past
/// the ingestion boundary ever sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[serde(alias = "dogiadung")]
    Household,
    #[serde(alias = "dientu")]
    Electronics,
    #[serde(alias = "thucpham")]
    Food,
    #[serde(alias = "douong")]
    Beverage,
}

impl Category {
    /// All categories, in catalog tab order.
    pub const ALL: [Self; 4] = [Self::Household, Self::Electronics, Self::Food, Self::Beverage];

    /// Human-readable label for display.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Household => "Household",
            Self::Electronics => "Electronics",
            Self::Food => "Food",
            Self::Beverage => "Beverage",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Household => write!(f, "household"),
            Self::Electronics => write!(f, "electronics"),
            Self::Food => write!(f, "food"),
            Self::Beverage => write!(f, "beverage"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "household" | "dogiadung" => Ok(Self::Household),
            "electronics" | "dientu" => Ok(Self::Electronics),
            "food" | "thucpham" => Ok(Self::Food),
            "beverage" | "douong" => Ok(Self::Beverage),
            _ => Err(format!("invalid category: {s}")),
        }
    }
}
