use crate::domain::model::{price_cell_key, Column, PriceEntry};
use std::collections::HashSet;

/// `[product key, one price column per currency, status]`.
///
/// Every price column is labelled with `book_id`, which callers take from the
/// first record of the export even when later records name another book.
pub fn derive_columns(book_id: &str, currencies: &[String]) -> Vec<Column> {
    let mut columns = Vec::with_capacity(currencies.len() + 2);
    columns.push(Column::ProductKey);
    columns.extend(
        currencies
            .iter()
            .map(|currency| Column::Price(price_cell_key(book_id, currency))),
    );
    columns.push(Column::Status);
    columns
}

/// Book ids other than `primary`, in first-seen order.
pub fn foreign_book_ids<'a>(primary: &str, entries: &'a [PriceEntry]) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .map(|entry| entry.book_id.as_str())
        .filter(|book| *book != primary && seen.insert(*book))
        .collect()
}
