use super::MonthBucket;
use crate::table::Cell;
use chrono::NaiveDate;

/// Day-first date layouts accepted for the billing period. Two-digit year
/// layouts come first so that `01/03/24` is not read as year 24.
const DATE_FORMATS: [&str; 8] = [
    "%d/%m/%y",
    "%d/%m/%Y",
    "%d-%m-%y",
    "%d-%m-%Y",
    "%d.%m.%y",
    "%d.%m.%Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
];

/// Parses a billing period value as a day-first calendar date.
///
/// A trailing time of day is ignored, and a bare `MM/YYYY` means the first day
/// of that month.
#[must_use]
pub fn parse_billing_date(value: &Cell) -> Option<NaiveDate> {
    let text = value.as_text()?.trim();
    let date_part = text.split([' ', 'T']).next().unwrap_or(text);

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(date_part, format).ok())
        .or_else(|| NaiveDate::parse_from_str(&format!("01/{date_part}"), "%d/%m/%Y").ok())
}

/// Why a row was left out of the consumption summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// The billing period cell is empty.
    MissingDate,

    /// The billing period cell holds something that is not a date.
    InvalidDate(String),

    /// The subscriber number cell is empty.
    MissingSubscriber,
}

/// A row excluded from aggregation, identified by its index in the input table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    pub row: usize,
    pub reason: RejectReason,
}

/// A row accepted for aggregation.
#[derive(Debug, Clone, Copy)]
pub struct DatedRow<'a> {
    pub row: usize,
    pub month: MonthBucket,
    pub cells: &'a [Cell],
}

/// Rows split by whether they can be placed in a billing month.
#[derive(Debug, Default)]
pub struct BillingPartition<'a> {
    pub dated: Vec<DatedRow<'a>>,
    pub rejected: Vec<RejectedRow>,
}

/// Splits rows into those with a usable billing month and subscriber number and those without.
///
/// Each item is the row's index in its table together with its cells.
pub fn partition_by_billing_period<'a, I>(rows: I, billing_period: usize, subscriber_number: usize) -> BillingPartition<'a>
where
    I: IntoIterator<Item = (usize, &'a [Cell])>,
{
    let mut partition = BillingPartition::default();

    for (row, cells) in rows {
        let date_cell = cells.get(billing_period).unwrap_or(&Cell::Empty);
        let subscriber_cell = cells.get(subscriber_number).unwrap_or(&Cell::Empty);

        let reason = if date_cell.is_empty() {
            Some(RejectReason::MissingDate)
        } else if subscriber_cell.is_empty() {
            Some(RejectReason::MissingSubscriber)
        } else {
            match parse_billing_date(date_cell) {
                Some(date) => {
                    partition.dated.push(DatedRow {
                        row,
                        month: MonthBucket::from_date(date),
                        cells,
                    });
                    None
                }
                None => Some(RejectReason::InvalidDate(date_cell.to_string())),
            }
        };

        if let Some(reason) = reason {
            partition.rejected.push(RejectedRow { row, reason });
        }
    }

    partition
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn text(s: &str) -> Cell {
        Cell::Text(s.into())
    }

    #[test]
    fn test_parse_day_first() {
        assert_eq!(parse_billing_date(&text("01/03/2024")), date(2024, 3, 1));
        assert_eq!(parse_billing_date(&text("12/01/2024")), date(2024, 1, 12));
        assert_eq!(parse_billing_date(&text("5/2/24")), date(2024, 2, 5));
        assert_eq!(parse_billing_date(&text("31-12-2023")), date(2023, 12, 31));
        assert_eq!(parse_billing_date(&text("31.12.2023")), date(2023, 12, 31));
    }

    #[test]
    fn test_parse_iso_and_time_suffix() {
        assert_eq!(parse_billing_date(&text("2024-03-15")), date(2024, 3, 15));
        assert_eq!(parse_billing_date(&text("15/03/2024 00:00:00")), date(2024, 3, 15));
        assert_eq!(parse_billing_date(&text("2024-03-15T10:00:00")), date(2024, 3, 15));
    }

    #[test]
    fn test_parse_month_and_year() {
        assert_eq!(parse_billing_date(&text("03/2024")), date(2024, 3, 1));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_billing_date(&text("bientôt")), None);
        assert_eq!(parse_billing_date(&text("32/01/2024")), None);
        assert_eq!(parse_billing_date(&Cell::Empty), None);
        assert_eq!(parse_billing_date(&Cell::Int(20_240_301)), None);
    }

    #[test]
    fn test_partition_keeps_both_sides() {
        let rows = [
            vec![text("01/01/2024"), text("A1")],
            vec![text("pas une date"), text("A2")],
            vec![Cell::Empty, text("A3")],
            vec![text("01/02/2024"), Cell::Empty],
            vec![text("15/02/2024"), text("A5")],
        ];
        let partition = partition_by_billing_period(rows.iter().map(Vec::as_slice).enumerate(), 0, 1);

        let dated: Vec<_> = partition.dated.iter().map(|d| (d.row, d.month.to_string())).collect();
        assert_eq!(dated, vec![(0, "2024-01".to_string()), (4, "2024-02".to_string())]);
        assert_eq!(
            partition.rejected,
            vec![
                RejectedRow {
                    row: 1,
                    reason: RejectReason::InvalidDate("pas une date".into())
                },
                RejectedRow {
                    row: 2,
                    reason: RejectReason::MissingDate
                },
                RejectedRow {
                    row: 3,
                    reason: RejectReason::MissingSubscriber
                },
            ]
        );
    }
}
