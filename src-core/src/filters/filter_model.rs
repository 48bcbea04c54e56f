use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A user choice over a set of observed values.
///
/// `All` follows whatever values the current sheet contains, so a fresh load
/// with new apps or platforms is included without re-selecting. Serialized as
/// `null` (all) or a list of values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<BTreeSet<String>>", into = "Option<BTreeSet<String>>")]
pub enum Selection {
    #[default]
    All,
    Only(BTreeSet<String>),
}

impl Selection {
    pub fn only<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Selection::Only(values.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(values) => values.contains(value),
        }
    }
}

impl From<Option<BTreeSet<String>>> for Selection {
    fn from(value: Option<BTreeSet<String>>) -> Self {
        value.map(Selection::Only).unwrap_or_default()
    }
}

impl From<Selection> for Option<BTreeSet<String>> {
    fn from(value: Selection) -> Self {
        match value {
            Selection::All => None,
            Selection::Only(values) => Some(values),
        }
    }
}

/// Which date a single-date view shows. `null` means the most recent one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum DateSelection {
    #[default]
    Latest,
    Exact(String),
}

impl From<Option<String>> for DateSelection {
    fn from(value: Option<String>) -> Self {
        value.map(DateSelection::Exact).unwrap_or_default()
    }
}

impl From<DateSelection> for Option<String> {
    fn from(value: DateSelection) -> Self {
        match value {
            DateSelection::Latest => None,
            DateSelection::Exact(date) => Some(date),
        }
    }
}

/// Inclusion filter applied after subtotal rows are removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub apps: Selection,
    pub platforms: Selection,
    /// Exact sheet date to keep; `None` keeps every date.
    pub date: Option<String>,
}
