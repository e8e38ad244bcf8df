use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::{EngineError, YearMonth};

/// A record with a year-month start date.
pub trait Dated {
    fn start_date(&self) -> &str;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Latest,
    Oldest,
}

impl FromStr for SortOrder {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(SortOrder::Latest),
            "oldest" => Ok(SortOrder::Oldest),
            other => Err(EngineError::InvalidSortOrder(other.to_string())),
        }
    }
}

/// Returns a new list ordered by start month: descending for `Latest`,
/// ascending for `Oldest`. Equal months keep their input order.
pub fn sort_by_start_date<T: Dated + Clone>(
    items: &[T],
    order: SortOrder,
) -> Result<Vec<T>, EngineError> {
    let mut keyed = items
        .iter()
        .map(|item| Ok((item.start_date().parse::<YearMonth>()?, item.clone())))
        .collect::<Result<Vec<(YearMonth, T)>, EngineError>>()?;

    // slice::sort_by is stable
    match order {
        SortOrder::Latest => keyed.sort_by(|a, b| b.0.cmp(&a.0)),
        SortOrder::Oldest => keyed.sort_by(|a, b| a.0.cmp(&b.0)),
    }

    Ok(keyed.into_iter().map(|(_, item)| item).collect())
}
