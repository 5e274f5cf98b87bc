use crate::domain::model::PivotTable;
use crate::utils::error::Result;

/// Serializes a pivot table to CSV bytes: header line, then one line per row.
pub fn write_csv(table: &PivotTable) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(table.headers())?;
    for row in &table.rows {
        writer.write_record(table.columns.iter().map(|column| column.render(row)))?;
    }

    writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::header::derive_columns;
    use crate::domain::model::PivotRow;
    use std::collections::HashMap;

    fn row(sku: &str, cells: &[(&str, &str)], active: &str) -> PivotRow {
        PivotRow {
            product_key: sku.to_string(),
            cells: cells
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
            is_active: active.to_string(),
        }
    }

    #[test]
    fn test_write_csv_layout() {
        let currencies = vec!["USD".to_string(), "EUR".to_string()];
        let table = PivotTable {
            book_id: "PB1".to_string(),
            columns: derive_columns("PB1", &currencies),
            currencies,
            rows: vec![
                row("SKU1", &[("Price (PB1) USD", "10"), ("Price (PB1) EUR", "9")], "true"),
                row("SKU2", &[("Price (PB1) USD", "5"), ("Price (PB1) EUR", "")], "false"),
            ],
        };

        let csv = String::from_utf8(write_csv(&table).unwrap()).unwrap();
        assert_eq!(
            csv,
            "Product StockKeepingUnit,Price (PB1) USD,Price (PB1) EUR,IsActive\n\
             SKU1,10,9,true\n\
             SKU2,5,,false\n"
        );
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let currencies = vec!["USD".to_string()];
        let table = PivotTable {
            book_id: "PB1".to_string(),
            columns: derive_columns("PB1", &currencies),
            currencies,
            rows: vec![row("SKU,1", &[("Price (PB1) USD", "3")], "")],
        };

        let csv = String::from_utf8(write_csv(&table).unwrap()).unwrap();
        assert_eq!(csv.lines().nth(1), Some("\"SKU,1\",3,"));
    }
}
