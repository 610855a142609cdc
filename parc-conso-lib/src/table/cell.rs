use core::fmt::{Display, Formatter};

/// The inferred type shared by every value of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Text,
    Int,
    Float,
}

impl ColumnKind {
    /// The kind able to hold values of both `self` and `other` without loss of meaning.
    #[must_use]
    pub const fn unify(self, other: Self) -> Self {
        match (self, other) {
            (Self::Int, Self::Int) => Self::Int,
            (Self::Int | Self::Float, Self::Int | Self::Float) => Self::Float,
            _ => Self::Text,
        }
    }
}

/// A single value in a [`RecordTable`](super::RecordTable).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
}

impl Cell {
    /// Builds a cell from a raw CSV field; blank fields are empty cells.
    #[must_use]
    pub fn from_field(field: &str) -> Self {
        if field.trim().is_empty() {
            Self::Empty
        } else {
            Self::Text(field.to_string())
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The raw text if this cell holds text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Converts the cell so that it fits in a column of `kind`.
    #[must_use]
    pub fn into_kind(self, kind: ColumnKind) -> Self {
        match (self, kind) {
            (Self::Int(i), ColumnKind::Float) => {
                #[expect(clippy::cast_precision_loss, reason = "mirrors the integer-to-float widening of mixed numeric columns")]
                let f = i as f64;
                Self::Float(f)
            }
            (cell @ (Self::Int(_) | Self::Float(_)), ColumnKind::Text) => Self::Text(cell.to_string()),
            (cell, _) => cell,
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
        }
    }
}
