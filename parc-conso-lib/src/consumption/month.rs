use chrono::{Datelike, NaiveDate};
use core::fmt::{Display, Formatter};
use core::str::FromStr;
use log::warn;
use strum::EnumString;

/// A calendar month, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthBucket {
    year: i32,
    month: u32,
}

impl MonthBucket {
    /// Returns `None` when `month` is not in `1..=12`.
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }
}

impl Display for MonthBucket {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Languages with a built-in month name table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum MonthLocale {
    #[strum(serialize = "fr")]
    French,

    #[strum(serialize = "en")]
    English,
}

impl MonthLocale {
    /// Parses locale identifiers such as `fr`, `fr_FR` or `fr_FR.UTF-8` by their language part.
    #[must_use]
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        let language = identifier.split(['_', '-', '.']).next().unwrap_or_default();
        Self::from_str(language.trim()).ok()
    }
}

const FRENCH_MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

const ENGLISH_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Month names used to label monthly columns as `<name>-<yy>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthNames {
    names: [String; 12],
}

impl MonthNames {
    /// A custom table, January first.
    #[must_use]
    pub fn new(names: [String; 12]) -> Self {
        Self { names }
    }

    #[must_use]
    pub fn for_locale(locale: MonthLocale) -> Self {
        let table = match locale {
            MonthLocale::French => FRENCH_MONTHS,
            MonthLocale::English => ENGLISH_MONTHS,
        };
        Self::new(table.map(str::to_string))
    }

    /// The table for a locale identifier, falling back to English names when the
    /// locale has no table.
    #[must_use]
    pub fn for_identifier(identifier: &str) -> Self {
        MonthLocale::from_identifier(identifier).map_or_else(
            || {
                warn!("no month names for locale '{identifier}', using English names");
                Self::default()
            },
            Self::for_locale,
        )
    }

    /// Label such as `janvier-24`.
    #[must_use]
    pub fn label(&self, bucket: MonthBucket) -> String {
        let index = usize::try_from(bucket.month().saturating_sub(1)).unwrap_or_default();
        let name = self.names.get(index).map_or("", String::as_str);
        format!("{name}-{:02}", bucket.year().rem_euclid(100))
    }
}

impl Default for MonthNames {
    fn default() -> Self {
        Self::for_locale(MonthLocale::English)
    }
}
