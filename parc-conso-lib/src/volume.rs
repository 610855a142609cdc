//! Binary data volumes written as `X Go Y Mo Z Ko`.
//!
//! Billing exports express data usage as a free-form string such as
//! `8 Go 206 Mo 633 Ko`. The three units are scanned independently, so
//! extraneous text around them is tolerated and absent units contribute
//! nothing. Formatting always emits all three components.

use core::fmt::{Display, Formatter};
use regex::Regex;
use std::sync::LazyLock;

pub const KO: u64 = 1024;
pub const MO: u64 = 1024 * KO;
pub const GO: u64 = 1024 * MO;

static GO_PATTERN: LazyLock<Regex> = LazyLock::new(|| unit_pattern("Go"));
static MO_PATTERN: LazyLock<Regex> = LazyLock::new(|| unit_pattern("Mo"));
static KO_PATTERN: LazyLock<Regex> = LazyLock::new(|| unit_pattern("Ko"));

#[expect(clippy::unwrap_used, reason = "patterns are built from static literals")]
fn unit_pattern(unit: &str) -> Regex {
    Regex::new(&format!(r"(?i)(\d+(?:\.\d+)?)\s*{unit}")).unwrap()
}

/// A number of bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Volume(u64);

impl Volume {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn from_bytes(bytes: u64) -> Self {
        Self(bytes)
    }

    /// Normalizes a possibly negative or missing byte count; anything that is not a
    /// non-negative number becomes zero.
    #[must_use]
    pub fn from_signed(bytes: Option<i64>) -> Self {
        bytes.and_then(|b| u64::try_from(b).ok()).map_or(Self::ZERO, Self)
    }

    #[must_use]
    pub const fn bytes(self) -> u64 {
        self.0
    }

    /// Parses a textual volume such as `8 Go 206 Mo 633 Ko` or `1,5 Go`.
    ///
    /// Never fails: text without any recognized unit is zero bytes.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        if text.trim().is_empty() {
            return Self::ZERO;
        }

        let text = text.replace(',', ".");
        let go = scan_unit(&GO_PATTERN, &text);
        let mo = scan_unit(&MO_PATTERN, &text);
        let ko = scan_unit(&KO_PATTERN, &text);

        if go == 0.0 && mo == 0.0 && ko == 0.0 {
            return Self::ZERO;
        }

        #[expect(clippy::cast_precision_loss, reason = "unit multipliers are exact powers of two")]
        let bytes = ko.mul_add(KO as f64, mo.mul_add(MO as f64, go * GO as f64));

        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "fractional bytes are truncated and the scanned numbers are never negative"
        )]
        let bytes = bytes as u64;
        Self(bytes)
    }

    /// Parses an optional value; a missing value is zero bytes.
    #[must_use]
    pub fn parse_opt(text: Option<&str>) -> Self {
        text.map_or(Self::ZERO, Self::parse)
    }

    /// Splits the byte count into whole `(Go, Mo, Ko)` components, dropping the sub-Ko remainder.
    #[must_use]
    pub const fn components(self) -> (u64, u64, u64) {
        let go = self.0 / GO;
        let mo = (self.0 % GO) / MO;
        let ko = (self.0 % MO) / KO;
        (go, mo, ko)
    }

    /// Adds two volumes, capping at the largest representable byte count.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Volume in Go as a decimal number.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "consumption totals stay far below 2^52 bytes")]
    pub fn as_go(self) -> f64 {
        self.0 as f64 / GO as f64
    }
}

impl Display for Volume {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let (go, mo, ko) = self.components();
        write!(f, "{go} Go {mo} Mo {ko} Ko")
    }
}

impl core::iter::Sum for Volume {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

fn scan_unit(pattern: &Regex, text: &str) -> f64 {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Formats an optional signed byte count; negative or missing input formats as zero.
#[must_use]
pub fn format_volume(bytes: Option<i64>) -> String {
    Volume::from_signed(bytes).to_string()
}
