use crate::domain::model::{price_cell_key, PivotRow, PriceEntry};
use std::collections::{HashMap, HashSet};

/// Distinct currencies in first-seen order.
pub fn discover_currencies(entries: &[PriceEntry]) -> Vec<String> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .filter(|entry| seen.insert(entry.currency.as_str()))
        .map(|entry| entry.currency.clone())
        .collect()
}

/// Folds flat entries into one row per product key.
///
/// Rows come back in first-seen product order. A new row gets a blank cell
/// for every currency, keyed with that entry's own book id, then its own
/// price. Later entries for the same product overwrite their price cell and
/// the row's `is_active`, so a duplicated product/currency pair keeps the
/// last price.
pub fn pivot(entries: &[PriceEntry], currencies: &[String]) -> Vec<PivotRow> {
    let mut rows: Vec<PivotRow> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        match index.get(&entry.product_key) {
            Some(&pos) => {
                let row = &mut rows[pos];
                row.cells.insert(entry.price_cell_key(), entry.price.clone());
                row.is_active = entry.is_active.clone();
            }
            None => {
                let mut cells: HashMap<String, String> = currencies
                    .iter()
                    .map(|currency| (price_cell_key(&entry.book_id, currency), String::new()))
                    .collect();
                cells.insert(entry.price_cell_key(), entry.price.clone());

                index.insert(entry.product_key.clone(), rows.len());
                rows.push(PivotRow {
                    product_key: entry.product_key.clone(),
                    cells,
                    is_active: entry.is_active.clone(),
                });
            }
        }
    }

    rows
}
