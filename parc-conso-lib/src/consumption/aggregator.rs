use super::{
    ConsumptionColumns, ConsumptionSummary, IdentityKey, MonthBucket, SummaryOutcome, SummaryRow, partition_by_billing_period,
};
use crate::table::{Cell, ColumnKind, RecordTable};
use crate::volume::Volume;
use log::{debug, info};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Sub-category prefix of data usage rows in operator exports.
pub const DEFAULT_SUBCATEGORY_PREFIX: &str = "Echanges";

/// Number of most recent months averaged by default.
pub const DEFAULT_TRAILING_WINDOW: usize = 4;

/// Builds the per-subscriber monthly consumption summary from a merged table.
#[derive(Debug, Clone)]
pub struct ConsumptionAggregator {
    columns: ConsumptionColumns,
    subcategory_prefix: String,
    window: usize,
}

impl Default for ConsumptionAggregator {
    fn default() -> Self {
        Self::new(ConsumptionColumns::default(), DEFAULT_SUBCATEGORY_PREFIX, DEFAULT_TRAILING_WINDOW)
    }
}

struct SubscriberUsage {
    identity: IdentityKey,
    monthly: BTreeMap<MonthBucket, Volume>,
}

impl ConsumptionAggregator {
    /// A window of zero months is treated as one month.
    #[must_use]
    pub fn new(columns: ConsumptionColumns, subcategory_prefix: impl Into<String>, window: usize) -> Self {
        Self {
            columns,
            subcategory_prefix: subcategory_prefix.into(),
            window: window.max(1),
        }
    }

    #[must_use]
    pub const fn columns(&self) -> &ConsumptionColumns {
        &self.columns
    }

    #[must_use]
    pub const fn window(&self) -> usize {
        self.window
    }

    /// Summarizes the data usage rows of `table`.
    ///
    /// The table is only read, so summarizing the same table twice yields the same outcome.
    #[must_use]
    pub fn summarize(&self, table: &RecordTable) -> SummaryOutcome {
        let indices = match self.columns.resolve(table) {
            Ok(indices) => indices,
            Err(missing) => {
                info!("consumption summary skipped, missing column(s): {}", missing.join(", "));
                return SummaryOutcome::MissingColumns(missing);
            }
        };

        let matching = table
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, cells)| self.is_data_usage(cells.get(indices.subcategory)))
            .map(|(row, cells)| (row, cells.as_slice()));

        let partition = partition_by_billing_period(matching, indices.billing_period, indices.identity[1]);
        if partition.dated.is_empty() {
            return if partition.rejected.is_empty() {
                SummaryOutcome::NoMatchingRows
            } else {
                SummaryOutcome::NoDatedRows(partition.rejected)
            };
        }
        if !partition.rejected.is_empty() {
            info!("{} data usage row(s) dropped from the summary", partition.rejected.len());
        }

        let mut order: Vec<String> = Vec::new();
        let mut usage: HashMap<String, SubscriberUsage> = HashMap::new();
        let mut months = BTreeSet::new();

        for dated in &partition.dated {
            let identity = IdentityKey::from_row(dated.cells, indices.identity);
            let volume = Volume::parse(&dated.cells.get(indices.volume).map(ToString::to_string).unwrap_or_default());
            let _ = months.insert(dated.month);

            let entry = usage.entry(identity.grouping_key()).or_insert_with_key(|key| {
                order.push(key.clone());
                SubscriberUsage {
                    identity,
                    monthly: BTreeMap::new(),
                }
            });
            let slot = entry.monthly.entry(dated.month).or_insert(Volume::ZERO);
            *slot = slot.saturating_add(volume);
        }

        let months: Vec<MonthBucket> = months.into_iter().rev().collect();
        let mut rows: Vec<SummaryRow> = order
            .into_iter()
            .filter_map(|key| usage.remove(&key))
            .map(|subscriber| {
                let monthly = months
                    .iter()
                    .map(|m| (*m, subscriber.monthly.get(m).copied().unwrap_or(Volume::ZERO)))
                    .collect();
                SummaryRow::new(subscriber.identity, monthly, self.window)
            })
            .collect();
        rows.sort_by(|a, b| a.identity.compare(&b.identity));

        debug!("summarized {} subscriber(s) over {} month(s)", rows.len(), months.len());

        let identity_names = self.columns.identity();
        SummaryOutcome::Summary(ConsumptionSummary {
            identity_headers: identity_names.map(str::to_string),
            identity_kinds: indices.identity.map(|i| table.columns().get(i).map_or(ColumnKind::Text, |c| c.kind)),
            months,
            rows,
            window: self.window,
            rejected: partition.rejected,
        })
    }

    fn is_data_usage(&self, subcategory: Option<&Cell>) -> bool {
        subcategory
            .and_then(Cell::as_text)
            .is_some_and(|text| text.starts_with(&self.subcategory_prefix))
    }
}
