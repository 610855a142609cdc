use crate::table::Cell;
use core::cmp::Ordering;

/// The subscriber a consumption row belongs to.
///
/// The subscriber number identifies the subscriber. The other fields are
/// descriptive; when they differ between rows of the same number, the first
/// row seen wins.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityKey {
    pub category: Cell,
    pub subscriber_number: Cell,
    pub last_name: Cell,
    pub first_name: Cell,
    pub phone: Cell,
}

impl IdentityKey {
    /// Builds the key from a row using the identity column positions
    /// (category, subscriber number, last name, first name, phone).
    #[must_use]
    pub fn from_row(cells: &[Cell], indices: [usize; 5]) -> Self {
        let [category, subscriber_number, last_name, first_name, phone] =
            indices.map(|i| cells.get(i).cloned().unwrap_or_default());
        Self {
            category,
            subscriber_number,
            last_name,
            first_name,
            phone,
        }
    }

    /// The text that groups rows of the same subscriber.
    #[must_use]
    pub fn grouping_key(&self) -> String {
        self.subscriber_number.to_string()
    }

    /// The identity fields in output order.
    #[must_use]
    pub fn cells(&self) -> [&Cell; 5] {
        [
            &self.category,
            &self.subscriber_number,
            &self.last_name,
            &self.first_name,
            &self.phone,
        ]
    }

    /// Orders identities field by field; numbers compare numerically.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        self.cells()
            .into_iter()
            .zip(other.cells())
            .map(|(a, b)| compare_cells(a, b))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

fn compare_cells(a: &Cell, b: &Cell) -> Ordering {
    match (a, b) {
        (Cell::Int(x), Cell::Int(y)) => x.cmp(y),
        (Cell::Int(_) | Cell::Float(_), Cell::Int(_) | Cell::Float(_)) => {
            let x = numeric(a);
            let y = numeric(b);
            x.total_cmp(&y)
        }
        _ => a.to_string().cmp(&b.to_string()),
    }
}

#[expect(clippy::cast_precision_loss, reason = "only used for ordering")]
fn numeric(cell: &Cell) -> f64 {
    match cell {
        Cell::Int(i) => *i as f64,
        Cell::Float(f) => *f,
        Cell::Empty | Cell::Text(_) => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(category: &str, number: Cell) -> IdentityKey {
        IdentityKey {
            category: Cell::Text(category.into()),
            subscriber_number: number,
            last_name: Cell::Empty,
            first_name: Cell::Empty,
            phone: Cell::Empty,
        }
    }

    #[test]
    fn test_from_row() {
        let row = vec![
            Cell::Text("x".into()),
            Cell::Text("Mobile".into()),
            Cell::Int(42),
            Cell::Text("Martin".into()),
            Cell::Text("Zoé".into()),
            Cell::Text("0612345678".into()),
        ];
        let id = IdentityKey::from_row(&row, [1, 2, 3, 4, 5]);
        assert_eq!(id.subscriber_number, Cell::Int(42));
        assert_eq!(id.first_name, Cell::Text("Zoé".into()));
        assert_eq!(id.grouping_key(), "42");
    }

    #[test]
    fn test_grouping_key_ignores_descriptive_fields() {
        let mut a = key("Mobile", Cell::Int(10));
        a.last_name = Cell::Text("Martin".into());
        let mut b = key("Fixe", Cell::Int(10));
        b.last_name = Cell::Text("MARTIN".into());
        assert_eq!(a.grouping_key(), b.grouping_key());
        assert_ne!(a.grouping_key(), key("Mobile", Cell::Int(11)).grouping_key());
    }

    #[test]
    fn test_numbers_compare_numerically() {
        let a = key("Mobile", Cell::Int(9));
        let b = key("Mobile", Cell::Int(10));
        assert_eq!(a.compare(&b), Ordering::Less);
    }

    #[test]
    fn test_category_is_compared_first() {
        let a = key("Fixe", Cell::Int(99));
        let b = key("Mobile", Cell::Int(1));
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(b.compare(&a), Ordering::Greater);
        assert_eq!(a.compare(&a.clone()), Ordering::Equal);
    }
}
