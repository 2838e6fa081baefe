//! Price extraction from loosely-typed market-feed payloads.
//!
//! The market feed does not commit to one response shape. The price may sit
//! at the top level under one of several synonymous keys, inside a nested
//! `data` object, or in the first element of an array. Lookup is an ordered
//! fallback chain: the first synonym that is present with a non-null value
//! wins, and later synonyms are never consulted.

use serde_json::{Map, Value};
use thiserror::Error;

/// Field names that carry the last traded price, in priority order.
pub const PRICE_FIELD_SYNONYMS: [&str; 4] = ["lastTradedPrice", "ltp", "price", "last_price"];

/// Key of the nested object searched when no top-level synonym is present.
const NESTED_DATA_KEY: &str = "data";

/// Why a price could not be read from a payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceExtractionError {
    /// No synonym was present on any searched path.
    #[error("no recognized price field in payload")]
    PriceFieldMissing,

    /// A price field was located but its value is not a finite number.
    #[error("price field is not numeric: {0}")]
    NotNumeric(String),
}

/// Return the value of the first key that is present and not null.
///
/// A present value of `0`, `false` or `""` still counts as present.
#[must_use]
pub fn first_present<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .find_map(|key| map.get(*key).filter(|value| !value.is_null()))
}

/// Locate the raw price value inside a payload without coercing it.
#[must_use]
pub fn locate_price(payload: &Value) -> Option<&Value> {
    match payload {
        Value::Object(map) => first_present(map, &PRICE_FIELD_SYNONYMS).or_else(|| {
            map.get(NESTED_DATA_KEY)
                .and_then(Value::as_object)
                .and_then(|nested| first_present(nested, &PRICE_FIELD_SYNONYMS))
        }),
        // Only the first element is inspected, and only at its top level.
        Value::Array(items) => items
            .first()
            .and_then(Value::as_object)
            .and_then(|first| first_present(first, &PRICE_FIELD_SYNONYMS)),
        _ => None,
    }
}

/// Coerce a located price value to `f64`.
///
/// JSON numbers and numeric strings are accepted. Booleans, containers,
/// unparseable strings and non-finite results are rejected.
pub fn coerce_price(value: &Value) -> Result<f64, PriceExtractionError> {
    let price = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    price
        .filter(|p| p.is_finite())
        .ok_or_else(|| PriceExtractionError::NotNumeric(value.to_string()))
}

/// Extract the last traded price from a market-feed payload.
pub fn extract_price(payload: &Value) -> Result<f64, PriceExtractionError> {
    locate_price(payload)
        .ok_or(PriceExtractionError::PriceFieldMissing)
        .and_then(coerce_price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(json!({"lastTradedPrice": 81000}), 81_000.0 ; "last traded price")]
    #[test_case(json!({"ltp": 80500.25}), 80_500.25 ; "ltp")]
    #[test_case(json!({"price": 79999.5}), 79_999.5 ; "price")]
    #[test_case(json!({"last_price": 81234}), 81_234.0 ; "last price")]
    #[test_case(json!({"data": {"lastTradedPrice": 1}}), 1.0 ; "nested last traded price")]
    #[test_case(json!({"data": {"ltp": 2}}), 2.0 ; "nested ltp")]
    #[test_case(json!({"data": {"price": 3}}), 3.0 ; "nested price")]
    #[test_case(json!({"data": {"last_price": 4}}), 4.0 ; "nested last price")]
    #[test_case(json!([{"ltp": 500}, {"ltp": 999}]), 500.0 ; "first array element only")]
    #[test_case(json!({"ltp": "81000.75"}), 81_000.75 ; "numeric string")]
    #[test_case(json!({"ltp": " 42 "}), 42.0 ; "numeric string with whitespace")]
    fn extracts_price(payload: Value, expected: f64) {
        assert_eq!(extract_price(&payload), Ok(expected));
    }

    #[test]
    fn first_synonym_wins() {
        let payload = json!({"lastTradedPrice": 81000, "ltp": 1});
        assert_eq!(extract_price(&payload), Ok(81_000.0));

        let payload = json!({"last_price": 9, "price": 7, "ltp": 5});
        assert_eq!(extract_price(&payload), Ok(5.0));
    }

    #[test]
    fn top_level_beats_nested_data() {
        let payload = json!({"price": 10, "data": {"lastTradedPrice": 20}});
        assert_eq!(extract_price(&payload), Ok(10.0));
    }

    #[test]
    fn null_is_treated_as_absent() {
        let payload = json!({"lastTradedPrice": null, "ltp": 77});
        assert_eq!(extract_price(&payload), Ok(77.0));

        let payload = json!({"ltp": null, "data": {"price": 12}});
        assert_eq!(extract_price(&payload), Ok(12.0));
    }

    #[test]
    fn zero_price_is_present() {
        let payload = json!({"lastTradedPrice": 0, "ltp": 99});
        assert_eq!(extract_price(&payload), Ok(0.0));

        let payload = json!({"ltp": "0"});
        assert_eq!(extract_price(&payload), Ok(0.0));
    }

    #[test_case(json!({"foo": "bar"}) ; "unrecognized mapping")]
    #[test_case(json!({"data": "not a mapping"}) ; "nested data not a mapping")]
    #[test_case(json!({"data": [{"ltp": 1}]}) ; "nested data is a list")]
    #[test_case(json!([]) ; "empty list")]
    #[test_case(json!(["ltp", 5]) ; "first element not a mapping")]
    #[test_case(json!([{"foo": 1}, {"ltp": 2}]) ; "only first element searched")]
    #[test_case(json!([{"data": {"ltp": 2}}]) ; "no nested lookup inside list element")]
    #[test_case(json!(81000) ; "bare number")]
    #[test_case(json!(null) ; "null payload")]
    #[test_case(json!({"ltp": null}) ; "only null synonyms")]
    fn missing_price_field(payload: Value) {
        assert_eq!(
            extract_price(&payload),
            Err(PriceExtractionError::PriceFieldMissing)
        );
    }

    #[test_case(json!({"ltp": "n/a"}) ; "non numeric string")]
    #[test_case(json!({"ltp": true}) ; "boolean")]
    #[test_case(json!({"ltp": {"value": 1}}) ; "object")]
    #[test_case(json!({"ltp": [1]}) ; "array")]
    #[test_case(json!({"ltp": "1e999"}) ; "overflow to infinity")]
    #[test_case(json!({"ltp": "NaN"}) ; "nan string")]
    fn non_numeric_price_is_rejected(payload: Value) {
        assert!(matches!(
            extract_price(&payload),
            Err(PriceExtractionError::NotNumeric(_))
        ));
    }

    #[test]
    fn non_numeric_first_match_does_not_fall_through() {
        // The first present synonym decides; a later valid one is not consulted.
        let payload = json!({"lastTradedPrice": "closed", "ltp": 100});
        assert!(matches!(
            extract_price(&payload),
            Err(PriceExtractionError::NotNumeric(_))
        ));
    }

    proptest! {
        #[test]
        fn any_synonym_yields_its_value(price in -1.0e9f64..1.0e9, idx in 0usize..4) {
            let mut map = Map::new();
            map.insert(PRICE_FIELD_SYNONYMS[idx].to_string(), json!(price));

            prop_assert_eq!(extract_price(&Value::Object(map.clone())), Ok(price));

            let mut wrapper = Map::new();
            wrapper.insert(NESTED_DATA_KEY.to_string(), Value::Object(map));
            prop_assert_eq!(extract_price(&Value::Object(wrapper)), Ok(price));
        }

        #[test]
        fn lowest_priority_index_wins(mask in 1u8..16, base in 0u32..1_000_000) {
            let mut map = Map::new();
            for (idx, key) in PRICE_FIELD_SYNONYMS.iter().enumerate() {
                if mask & (1 << idx) != 0 {
                    map.insert((*key).to_string(), json!(base + idx as u32));
                }
            }

            let winner = (0..PRICE_FIELD_SYNONYMS.len())
                .find(|idx| mask & (1 << idx) != 0)
                .unwrap_or_default();

            prop_assert_eq!(
                extract_price(&Value::Object(map)),
                Ok(f64::from(base + winner as u32))
            );
        }
    }
}
