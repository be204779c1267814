//! Forgiving decoders for records exported by Odoo.
//!
//! The exporter hands us whatever the ORM produced: many2one fields arrive as
//! `[id, "Name"]` pairs or `{ "name": .. }` objects, empty strings arrive as
//! `false`, and prices are sometimes strings. Every helper here maps the
//! unexpected shapes to a safe default instead of failing the whole index.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => map.get("name").map(text_of).unwrap_or_default(),
        // many2one pair: [id, "Display Name"]
        Value::Array(items) => items.get(1).map(text_of).unwrap_or_default(),
        Value::Number(n) => n.to_string(),
        Value::Bool(_) | Value::Null => String::new(),
    }
}

pub fn number_of(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if parsed.is_finite() { parsed } else { 0.0 }
}

pub fn id_of(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64)).unwrap_or(0),
        Value::String(s) => s.trim().parse::<u64>().unwrap_or(0),
        Value::Array(items) => items.first().map(id_of).unwrap_or(0),
        _ => 0,
    }
}

pub fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(text_of(&Value::deserialize(d)?))
}

pub fn optional_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let text = text_of(&Value::deserialize(d)?);
    Ok(if text.is_empty() { None } else { Some(text) })
}

pub fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(number_of(&Value::deserialize(d)?))
}

pub fn lenient_u64<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    Ok(id_of(&Value::deserialize(d)?))
}

pub fn lenient_u32<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    Ok(u32::try_from(id_of(&Value::deserialize(d)?)).unwrap_or(0))
}

pub fn lenient_bool<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    })
}

pub fn lenient_terms<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Option<String>>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null | Value::Bool(_) => None,
                other => Some(text_of(other)),
            })
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn many2one_pairs_and_objects_yield_their_name() {
        assert_eq!(text_of(&json!([12, "Brake System"])), "Brake System");
        assert_eq!(text_of(&json!({"id": 3, "name": "Denso"})), "Denso");
        assert_eq!(text_of(&json!(false)), "");
        assert_eq!(text_of(&json!(null)), "");
    }

    #[test]
    fn prices_accept_strings_and_reject_garbage() {
        assert_eq!(number_of(&json!("38.50")), 38.5);
        assert_eq!(number_of(&json!(9.5)), 9.5);
        assert_eq!(number_of(&json!("n/a")), 0.0);
        assert_eq!(number_of(&json!(null)), 0.0);
    }

    #[test]
    fn ids_accept_numeric_strings_and_pairs() {
        assert_eq!(id_of(&json!("262735")), 262735);
        assert_eq!(id_of(&json!([1787, "Toyota"])), 1787);
        assert_eq!(id_of(&json!(-4)), 0);
    }
}
