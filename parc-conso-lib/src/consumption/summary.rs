use super::{IdentityKey, MonthBucket, MonthNames, RejectedRow};
use crate::table::{Cell, Column, ColumnKind, RecordTable};
use crate::volume::{GO, Volume};

pub const TOTAL_HEADER: &str = "Total (Go)";
pub const LIFETIME_AVERAGE_HEADER: &str = "Moyenne (Go) total";

/// Header of the trailing-window average column, e.g. `Moyenne (Go) 4 mois`.
#[must_use]
pub fn window_average_header(window: usize) -> String {
    format!("Moyenne (Go) {window} mois")
}

/// Rounds to two decimal places, halves going to the even neighbour.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Consumption of one subscriber.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub identity: IdentityKey,

    /// One entry per month of the summary, most recent first, zero when the
    /// subscriber consumed nothing that month.
    pub monthly: Vec<(MonthBucket, Volume)>,

    pub total: Volume,
    pub total_go: f64,
    pub window_average_go: f64,
    pub lifetime_average_go: f64,
}

impl SummaryRow {
    /// Derives the totals and averages from per-month volumes ordered most recent first.
    #[must_use]
    pub fn new(identity: IdentityKey, monthly: Vec<(MonthBucket, Volume)>, window: usize) -> Self {
        let total: Volume = monthly.iter().map(|(_, v)| *v).sum();
        let recent = window.min(monthly.len());
        let recent_total: Volume = monthly.iter().take(recent).map(|(_, v)| *v).sum();

        Self {
            identity,
            total_go: round2(total.as_go()),
            window_average_go: average_go(recent_total, recent),
            lifetime_average_go: average_go(total, monthly.len()),
            total,
            monthly,
        }
    }
}

#[expect(clippy::cast_precision_loss, reason = "month counts and byte totals are small")]
fn average_go(total: Volume, months: usize) -> f64 {
    if months == 0 {
        return 0.0;
    }
    round2(total.bytes() as f64 / (months as f64 * GO as f64))
}

/// Monthly consumption per subscriber.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsumptionSummary {
    /// Header names of the identity columns, in output order.
    pub identity_headers: [String; 5],

    /// Kinds of the identity columns in the source table.
    pub identity_kinds: [ColumnKind; 5],

    /// Every month present in the data, most recent first.
    pub months: Vec<MonthBucket>,

    pub rows: Vec<SummaryRow>,

    /// Number of most recent months averaged in the window column.
    pub window: usize,

    /// Matching rows left out because they could not be dated or attributed.
    pub rejected: Vec<RejectedRow>,
}

impl ConsumptionSummary {
    /// Materializes the summary as a table: identity columns, the total and the two
    /// averages in Go, then one formatted volume column per month, most recent first.
    #[must_use]
    pub fn to_table(&self, month_names: &MonthNames) -> RecordTable {
        let mut columns: Vec<Column> = self
            .identity_headers
            .iter()
            .zip(self.identity_kinds)
            .map(|(name, kind)| Column { name: name.clone(), kind })
            .collect();

        for name in [TOTAL_HEADER.to_string(), window_average_header(self.window), LIFETIME_AVERAGE_HEADER.to_string()] {
            columns.push(Column {
                name,
                kind: ColumnKind::Float,
            });
        }
        columns.extend(self.months.iter().map(|m| Column::text(month_names.label(*m))));

        let mut table = RecordTable::with_columns(columns);
        for row in &self.rows {
            let mut cells: Vec<Cell> = row.identity.cells().into_iter().cloned().collect();
            cells.push(Cell::Float(row.total_go));
            cells.push(Cell::Float(row.window_average_go));
            cells.push(Cell::Float(row.lifetime_average_go));
            cells.extend(row.monthly.iter().map(|(_, v)| Cell::Text(v.to_string())));
            table.push_row(cells);
        }
        table
    }

    /// Positions of the three Go columns in [`Self::to_table`]'s output.
    #[must_use]
    pub const fn go_columns() -> [usize; 3] {
        [5, 6, 7]
    }
}

/// Result of summarizing a merged table.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryOutcome {
    Summary(ConsumptionSummary),

    /// The table lacks some required columns.
    MissingColumns(Vec<String>),

    /// No row belongs to a matching sub-category.
    NoMatchingRows,

    /// Rows matched, but none could be dated and attributed to a subscriber.
    NoDatedRows(Vec<RejectedRow>),
}

impl SummaryOutcome {
    /// The summary, if there is anything to report.
    #[must_use]
    pub const fn summary(&self) -> Option<&ConsumptionSummary> {
        match self {
            Self::Summary(summary) => Some(summary),
            _ => None,
        }
    }

    /// `true` when there is nothing to report.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.summary().is_none()
    }

    /// Human readable reason for an empty outcome.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Summary(summary) => format!("{} subscriber(s) over {} month(s)", summary.rows.len(), summary.months.len()),
            Self::MissingColumns(missing) => format!("missing column(s): {}", missing.join(", ")),
            Self::NoMatchingRows => "no data usage rows".to_string(),
            Self::NoDatedRows(rejected) => format!("none of the {} data usage row(s) has a valid billing period", rejected.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(y: i32, m: u32) -> MonthBucket {
        MonthBucket::new(y, m).unwrap()
    }

    fn identity() -> IdentityKey {
        IdentityKey {
            category: Cell::Text("Mobile".into()),
            subscriber_number: Cell::Int(1),
            last_name: Cell::Text("Martin".into()),
            first_name: Cell::Text("Zoé".into()),
            phone: Cell::Text("0612345678".into()),
        }
    }

    #[test]
    fn test_round2() {
        assert!((round2(1.234_9) - 1.23).abs() < 1e-9);
        assert!((round2(2.0) - 2.0).abs() < 1e-9);
        assert!((round2(0.125_1) - 0.13).abs() < 1e-9);
    }

    #[test]
    fn test_round2_halves_go_to_even() {
        assert!((round2(0.125) - 0.12).abs() < 1e-9);
        assert!((round2(0.375) - 0.38).abs() < 1e-9);
    }

    #[test]
    fn test_average_over_available_months() {
        let monthly = vec![(month(2024, 2), Volume::from_bytes(3 * GO)), (month(2024, 1), Volume::from_bytes(GO))];
        let row = SummaryRow::new(identity(), monthly, 4);
        assert!((row.total_go - 4.0).abs() < 1e-9);
        assert!((row.window_average_go - 2.0).abs() < 1e-9);
        assert!((row.lifetime_average_go - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_window_uses_most_recent_months() {
        let monthly: Vec<_> = (1..=6).rev().map(|m| (month(2024, m), Volume::from_bytes(u64::from(m) * GO))).collect();
        let row = SummaryRow::new(identity(), monthly, 4);
        // 6 + 5 + 4 + 3 over 4 months, 21 over 6 months
        assert!((row.window_average_go - 4.5).abs() < 1e-9);
        assert!((row.lifetime_average_go - 3.5).abs() < 1e-9);
        assert!((row.total_go - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_to_table_layout() {
        let monthly = vec![(month(2024, 2), Volume::from_bytes(3 * GO)), (month(2024, 1), Volume::from_bytes(GO))];
        let summary = ConsumptionSummary {
            identity_headers: ["Cat", "Num", "Nom", "Prénom", "Tel"].map(str::to_string),
            identity_kinds: [ColumnKind::Text, ColumnKind::Int, ColumnKind::Text, ColumnKind::Text, ColumnKind::Text],
            months: vec![month(2024, 2), month(2024, 1)],
            rows: vec![SummaryRow::new(identity(), monthly, 4)],
            window: 4,
            rejected: Vec::new(),
        };

        let table = summary.to_table(&MonthNames::for_identifier("fr"));

        insta::assert_snapshot!(
            table.column_names().collect::<Vec<_>>().join(" | "),
            @"Cat | Num | Nom | Prénom | Tel | Total (Go) | Moyenne (Go) 4 mois | Moyenne (Go) total | février-24 | janvier-24"
        );
        let row = &table.rows()[0];
        assert_eq!(row[5], Cell::Float(4.0));
        assert_eq!(row[8], Cell::Text("3 Go 0 Mo 0 Ko".into()));
        assert_eq!(row[9], Cell::Text("1 Go 0 Mo 0 Ko".into()));
        assert_eq!(table.columns()[1].kind, ColumnKind::Int);
        for index in ConsumptionSummary::go_columns() {
            assert_eq!(table.columns()[index].kind, ColumnKind::Float);
        }
    }

    #[test]
    fn test_describe_empty_outcomes() {
        assert_eq!(SummaryOutcome::NoMatchingRows.describe(), "no data usage rows");
        assert_eq!(
            SummaryOutcome::MissingColumns(vec!["A".into(), "B".into()]).describe(),
            "missing column(s): A, B"
        );
        assert!(SummaryOutcome::NoMatchingRows.is_empty());
    }
}
