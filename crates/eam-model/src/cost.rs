//! Cost figures attached to overlay diagram cells

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Total cost shown for one overlay diagram cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostWidgetDatum {
    pub cell_external_id: String,
    pub total_cost: Decimal,
}

impl CostWidgetDatum {
    /// Create datum
    #[inline]
    #[must_use]
    pub fn new(cell_external_id: impl Into<String>, total_cost: Decimal) -> Self {
        Self {
            cell_external_id: cell_external_id.into(),
            total_cost,
        }
    }

    /// Sum costs per cell, preserving first-seen cell order
    #[must_use]
    pub fn totals_by_cell<I>(entries: I) -> Vec<CostWidgetDatum>
    where
        I: IntoIterator<Item = (String, Decimal)>,
    {
        let mut totals: Vec<CostWidgetDatum> = Vec::new();
        for (cell, amount) in entries {
            match totals.iter_mut().find(|d| d.cell_external_id == cell) {
                Some(existing) => existing.total_cost += amount,
                None => totals.push(CostWidgetDatum::new(cell, amount)),
            }
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn totals_by_cell_sums_per_cell() {
        let totals = CostWidgetDatum::totals_by_cell(vec![
            ("CAP_1".to_string(), Decimal::from_str("10.50").unwrap()),
            ("CAP_2".to_string(), Decimal::from(3)),
            ("CAP_1".to_string(), Decimal::from_str("0.25").unwrap()),
        ]);

        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].cell_external_id, "CAP_1");
        assert_eq!(totals[0].total_cost, Decimal::from_str("10.75").unwrap());
        assert_eq!(totals[1].total_cost, Decimal::from(3));
    }
}
