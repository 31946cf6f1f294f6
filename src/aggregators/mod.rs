//! Aggregate views over the loaded vehicle rows.
//!
//! Both aggregators are pure functions of the row slice; memoization lives
//! in [`crate::store::DataStore`].

pub mod group_usage;
pub mod modal_split;
pub mod types;
pub mod utility;

pub use group_usage::usage_by_group;
pub use modal_split::modal_split;
pub use types::{GroupUsageRow, ModalSplit, ModalSplitRow, select_usage};
