use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Nested field on `Product2` holding the SKU.
pub const PRODUCT_KEY_FIELD: &str = "Article_SAP_Code__c";
pub const PRODUCT_KEY_COLUMN: &str = "Product StockKeepingUnit";
pub const STATUS_COLUMN: &str = "IsActive";

/// Raw export as produced by the CRM: `{ "records": [ ... ] }`.
///
/// Records stay untyped here so a single bad record surfaces as a
/// malformed-record error instead of failing the whole parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricebookExport {
    pub records: Vec<serde_json::Value>,
}

/// One flat price-book entry after normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceEntry {
    pub product_key: String,
    pub book_id: String,
    pub currency: String,
    /// Price already rendered as cell text.
    pub price: String,
    /// `IsActive` as cell text; blank when absent.
    pub is_active: String,
}

impl PriceEntry {
    pub fn price_cell_key(&self) -> String {
        price_cell_key(&self.book_id, &self.currency)
    }
}

/// `Price (<book id>) <currency>`, used as both header title and row key.
pub fn price_cell_key(book_id: &str, currency: &str) -> String {
    format!("Price ({}) {}", book_id, currency)
}

/// One output row per distinct product key.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotRow {
    pub product_key: String,
    pub cells: HashMap<String, String>,
    pub is_active: String,
}

impl PivotRow {
    /// Cell text for a price label; blank when the row has no such cell.
    pub fn cell(&self, label: &str) -> &str {
        self.cells.get(label).map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Column {
    ProductKey,
    Price(String),
    Status,
}

impl Column {
    pub fn title(&self) -> &str {
        match self {
            Column::ProductKey => PRODUCT_KEY_COLUMN,
            Column::Price(label) => label.as_str(),
            Column::Status => STATUS_COLUMN,
        }
    }

    pub fn render<'a>(&'a self, row: &'a PivotRow) -> &'a str {
        match self {
            Column::ProductKey => row.product_key.as_str(),
            Column::Price(label) => row.cell(label),
            Column::Status => row.is_active.as_str(),
        }
    }
}

/// Result of pivoting one export file.
#[derive(Debug, Clone)]
pub struct PivotTable {
    pub book_id: String,
    pub currencies: Vec<String>,
    pub columns: Vec<Column>,
    pub rows: Vec<PivotRow>,
}

impl PivotTable {
    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(Column::title).collect()
    }
}

/// One input file scheduled for conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileJob {
    pub name: String,
    pub input_path: String,
    pub output_path: String,
}
