//! Shopping-list aggregation and plain-text rendering.

use std::collections::BTreeMap;

use crate::domain::types::CartLine;

pub const SHOPPING_LIST_HEADER: &str = "Shopping list:\n";
pub const SHOPPING_LIST_FILENAME: &str = "shopping_list.txt";

/// Summed amount of one `(name, unit)` group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingItem {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

/// Group cart lines by `(name, unit)` and sum amounts, ordered by name then unit.
pub fn aggregate(lines: impl IntoIterator<Item = CartLine>) -> Vec<ShoppingItem> {
    let mut groups: BTreeMap<(String, String), i64> = BTreeMap::new();
    for line in lines {
        *groups
            .entry((line.name, line.measurement_unit))
            .or_default() += i64::from(line.amount);
    }
    groups
        .into_iter()
        .map(|((name, measurement_unit), amount)| ShoppingItem {
            name,
            measurement_unit,
            amount,
        })
        .collect()
}

/// Header followed by one `\n<name> - <amount>, <unit>` per item.
pub fn render(items: &[ShoppingItem]) -> String {
    let mut out = String::from(SHOPPING_LIST_HEADER);
    for item in items {
        out.push_str(&format!(
            "\n{} - {}, {}",
            item.name, item.amount, item.measurement_unit
        ));
    }
    out
}
