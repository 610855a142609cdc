//! In-memory tabular data loaded from billing exports
//!
//! A [`RecordTable`] is an ordered list of rows sharing one header. Columns are
//! untyped when read and receive a single inferred [`ColumnKind`] afterwards:
//!
//! - [`infer_column_types`] turns plainly numeric columns into integers or floats.
//! - [`normalize_decimal_commas`] converts comma-decimal text columns, all or nothing per column.
//! - [`merge_tables`] concatenates tables over the union of their columns, reconciling kinds.

mod cell;
mod merge;
mod normalize;
mod record_table;

pub use cell::{Cell, ColumnKind};
pub use merge::merge_tables;
pub use normalize::{CoercionOutcome, ColumnCoercion, infer_column_types, normalize_decimal_commas, try_coerce_comma_decimal};
pub use record_table::{Column, RecordTable};
