use crate::table::RecordTable;
use serde::{Deserialize, Serialize};

/// Names of the export columns the consumption summary reads.
///
/// Names are matched exactly, including case and accents.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsumptionColumns {
    pub subcategory: String,
    pub billing_period: String,
    pub volume: String,
    pub category: String,
    pub subscriber_number: String,
    pub last_name: String,
    pub first_name: String,
    pub phone: String,
}

impl Default for ConsumptionColumns {
    fn default() -> Self {
        Self {
            subcategory: "Nom de la sous-rubrique".into(),
            billing_period: "Période de la facture".into(),
            volume: "Quantité ou volume".into(),
            category: "Nom de la rubrique de niveau 1".into(),
            subscriber_number: "Numéro de l\u{2019}utilisateur".into(),
            last_name: "Nom de l\u{2019}utilisateur".into(),
            first_name: "Prénom de l\u{2019}utilisateur".into(),
            phone: "Numéro de téléphone".into(),
        }
    }
}

/// Positions of the consumption columns within one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndices {
    pub subcategory: usize,
    pub billing_period: usize,
    pub volume: usize,
    pub identity: [usize; 5],
}

impl ConsumptionColumns {
    /// Identity column names in output order: category, subscriber number, last name, first name, phone.
    #[must_use]
    pub fn identity(&self) -> [&str; 5] {
        [
            &self.category,
            &self.subscriber_number,
            &self.last_name,
            &self.first_name,
            &self.phone,
        ]
    }

    fn all(&self) -> [&str; 8] {
        let [category, number, last, first, phone] = self.identity();
        [
            &self.subcategory,
            &self.billing_period,
            &self.volume,
            category,
            number,
            last,
            first,
            phone,
        ]
    }

    /// Locates every required column in `table`.
    ///
    /// # Errors
    ///
    /// Returns the names of the required columns `table` lacks.
    pub fn resolve(&self, table: &RecordTable) -> Result<ColumnIndices, Vec<String>> {
        let missing: Vec<String> = self
            .all()
            .into_iter()
            .filter(|name| !table.has_column(name))
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(missing);
        }

        let index = |name: &str| table.column_index(name).unwrap_or_default();
        Ok(ColumnIndices {
            subcategory: index(&self.subcategory),
            billing_period: index(&self.billing_period),
            volume: index(&self.volume),
            identity: self.identity().map(index),
        })
    }

    /// Keys whose column name is blank.
    pub(crate) fn blank_names(&self) -> Vec<&'static str> {
        let labels = [
            "subcategory",
            "billing_period",
            "volume",
            "category",
            "subscriber_number",
            "last_name",
            "first_name",
            "phone",
        ];
        labels
            .into_iter()
            .zip(self.all())
            .filter(|(_, name)| name.trim().is_empty())
            .map(|(label, _)| label)
            .collect()
    }
}
