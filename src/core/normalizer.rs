use crate::domain::model::{PriceEntry, PRODUCT_KEY_FIELD};
use crate::utils::error::{PivotError, Result};
use serde_json::Value;

/// Turns one raw export record into a [`PriceEntry`].
///
/// Fails with [`PivotError::MalformedRecordError`] only when the product
/// reference, the product key or the currency is missing. Every other field is
/// copied as cell text whatever its JSON type.
pub fn normalize_record(index: usize, record: &Value) -> Result<PriceEntry> {
    let malformed = |reason: String| PivotError::MalformedRecordError { index, reason };

    let obj = record
        .as_object()
        .ok_or_else(|| malformed("record is not a JSON object".to_string()))?;

    let product = obj
        .get("Product2")
        .and_then(Value::as_object)
        .ok_or_else(|| malformed("missing Product2 reference".to_string()))?;

    let product_key = cell_text(product.get(PRODUCT_KEY_FIELD))
        .ok_or_else(|| malformed(format!("missing Product2.{}", PRODUCT_KEY_FIELD)))?;
    let currency = cell_text(obj.get("CurrencyIsoCode"))
        .ok_or_else(|| malformed("missing CurrencyIsoCode".to_string()))?;

    Ok(PriceEntry {
        product_key,
        book_id: cell_text(obj.get("Pricebook2Id")).unwrap_or_default(),
        currency,
        price: format_price(obj.get("UnitPrice")),
        is_active: cell_text(obj.get("IsActive")).unwrap_or_default(),
    })
}

/// Normalizes every record, stopping at the first malformed one.
pub fn normalize_records(records: &[Value]) -> Result<Vec<PriceEntry>> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| normalize_record(index, record))
        .collect()
}

/// Text written to a cell for a field; `None` when missing or null.
fn cell_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(format_number(n)),
        other => Some(other.to_string()),
    }
}

/// Renders `UnitPrice` as cell text. `null` or a missing price is blank.
pub fn format_price(value: Option<&Value>) -> String {
    cell_text(value).unwrap_or_default()
}

// 與試算表/JS 的數字字串一致：整數不帶小數，極大或極小值用指數表示
fn format_number(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    let Some(f) = n.as_f64() else {
        return n.to_string();
    };
    if f == 0.0 {
        return "0".to_string();
    }

    let magnitude = f.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{}", f);
    }

    let exp = format!("{:e}", f);
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
        _ => exp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(code: &str, currency: &str, price: Value) -> Value {
        json!({
            "Product2": { "Article_SAP_Code__c": code },
            "Pricebook2Id": "PB1",
            "CurrencyIsoCode": currency,
            "UnitPrice": price,
            "IsActive": true
        })
    }

    #[test]
    fn test_normalize_complete_record() {
        let entry = normalize_record(0, &record("SKU1", "USD", json!(10))).unwrap();

        assert_eq!(entry.product_key, "SKU1");
        assert_eq!(entry.book_id, "PB1");
        assert_eq!(entry.currency, "USD");
        assert_eq!(entry.price, "10");
        assert_eq!(entry.is_active, "true");
        assert_eq!(entry.price_cell_key(), "Price (PB1) USD");
    }

    #[test]
    fn test_missing_product_reference_is_malformed() {
        let raw = json!({
            "Pricebook2Id": "PB1",
            "CurrencyIsoCode": "USD",
            "UnitPrice": 1,
            "IsActive": true
        });

        let err = normalize_record(4, &raw).unwrap_err();
        match err {
            PivotError::MalformedRecordError { index, reason } => {
                assert_eq!(index, 4);
                assert!(reason.contains("Product2"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_currency_is_malformed() {
        let mut raw = record("SKU1", "USD", json!(1));
        raw.as_object_mut().unwrap().remove("CurrencyIsoCode");

        assert!(matches!(
            normalize_record(0, &raw),
            Err(PivotError::MalformedRecordError { .. })
        ));
    }

    #[test]
    fn test_normalize_records_stops_at_first_bad_record() {
        let records = vec![
            record("SKU1", "USD", json!(1)),
            json!("not an object"),
            json!({}),
        ];

        match normalize_records(&records) {
            Err(PivotError::MalformedRecordError { index, .. }) => assert_eq!(index, 1),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Some(&json!(10))), "10");
        assert_eq!(format_price(Some(&json!(10.0))), "10");
        assert_eq!(format_price(Some(&json!(9.99))), "9.99");
        assert_eq!(format_price(Some(&json!(0.5))), "0.5");
        assert_eq!(format_price(Some(&Value::Null)), "");
        assert_eq!(format_price(None), "");
    }

    #[test]
    fn test_missing_is_active_renders_blank() {
        let mut raw = record("SKU1", "USD", json!(1));
        raw.as_object_mut().unwrap().remove("IsActive");

        assert_eq!(normalize_record(0, &raw).unwrap().is_active, "");
    }

    #[test]
    fn test_is_active_string_is_copied_verbatim() {
        let mut raw = record("SKU1", "USD", json!(1));
        raw["IsActive"] = json!("true");

        let entry = normalize_record(0, &raw).unwrap();
        assert_eq!(entry.is_active, "true");
    }

    #[test]
    fn test_numeric_product_key_is_rendered_as_text() {
        let mut raw = record("unused", "USD", json!(1));
        raw["Product2"]["Article_SAP_Code__c"] = json!(12345);

        let entry = normalize_record(0, &raw).unwrap();
        assert_eq!(entry.product_key, "12345");
    }

    #[test]
    fn test_missing_book_id_keeps_record() {
        let mut raw = record("SKU1", "USD", json!(1));
        raw.as_object_mut().unwrap().remove("Pricebook2Id");

        let entry = normalize_record(0, &raw).unwrap();
        assert_eq!(entry.book_id, "");
        assert_eq!(entry.price_cell_key(), "Price () USD");
    }

    #[test]
    fn test_null_product_key_is_malformed() {
        let mut raw = record("SKU1", "USD", json!(1));
        raw["Product2"]["Article_SAP_Code__c"] = Value::Null;

        assert!(matches!(
            normalize_record(0, &raw),
            Err(PivotError::MalformedRecordError { .. })
        ));
    }

    #[test]
    fn test_extreme_prices_use_exponent_form() {
        assert_eq!(format_price(Some(&json!(1e-7))), "1e-7");
        assert_eq!(format_price(Some(&json!(1.5e-7))), "1.5e-7");
        assert_eq!(format_price(Some(&json!(0.000001))), "0.000001");
        assert_eq!(format_price(Some(&json!(1e21))), "1e+21");
        assert_eq!(format_price(Some(&json!(1e20))), "100000000000000000000");
        assert_eq!(format_price(Some(&json!("12.50"))), "12.50");
    }
}
