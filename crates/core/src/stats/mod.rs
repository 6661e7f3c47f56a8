//! Aggregation helpers used by the analytics engine.
//!
//! - [`rank`] - top-N with deterministic tie-breaks
//! - [`window`] - current / previous calendar-month partitioning
//! - [`duration`] - fulfillment time averaging and formatting

pub mod duration;
pub mod rank;
pub mod window;

pub use duration::FulfillmentTime;
pub use rank::{SortDirection, rank_by, rank_with_alpha_tiebreak, top_n_with_alpha_tiebreak};
pub use window::{MonthWindow, TimeWindow, start_of_month};
