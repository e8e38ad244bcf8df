// Career engine: pure computations over already-resolved records.
// Nothing in here touches the record store, the session, or the clock directly;
// "now" is always passed in by the caller.

pub mod duration;
pub mod grouping;
pub mod sorting;
pub mod stats;
pub mod tech_category;
pub mod year_month;

use thiserror::Error;

pub use duration::{compute_duration_at, compute_total_tenure_at, Tenure, Timespan};
pub use grouping::{group_by_category, CategoryGroup, Categorized};
pub use sorting::{sort_by_start_date, Dated, SortOrder};
pub use stats::{tech_stack_stats, HasTechStack, TechStackGroup};
pub use tech_category::{classify_tech, TechCategory};
pub use year_month::YearMonth;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Invalid date format: '{0}' (expected YYYY-MM)")]
    InvalidDateFormat(String),

    #[error("Invalid skill level: {0} (expected 1, 2 or 3)")]
    InvalidSkillLevel(i16),

    #[error("Invalid sort order: '{0}' (expected 'latest' or 'oldest')")]
    InvalidSortOrder(String),

    #[error("Unknown document section: '{0}'")]
    UnknownSection(String),
}
