//! Monthly data consumption per subscriber.
//!
//! Rows whose sub-category starts with the data usage prefix are dated by
//! their billing period, grouped by subscriber identity and summed per calendar
//! month. Each subscriber gets a total, an average over the most recent
//! months and an average over every month present in the data.

mod aggregator;
mod billing;
mod columns;
mod identity;
mod month;
mod summary;

pub use aggregator::{ConsumptionAggregator, DEFAULT_SUBCATEGORY_PREFIX, DEFAULT_TRAILING_WINDOW};
pub use billing::{BillingPartition, DatedRow, RejectReason, RejectedRow, parse_billing_date, partition_by_billing_period};
pub use columns::{ColumnIndices, ConsumptionColumns};
pub use identity::IdentityKey;
pub use month::{MonthBucket, MonthLocale, MonthNames};
pub use summary::{
    ConsumptionSummary, LIFETIME_AVERAGE_HEADER, SummaryOutcome, SummaryRow, TOTAL_HEADER, round2, window_average_header,
};
