use serde_json::{Map, Value};

use crate::error::{ClientError, Result};

/// Build a JSON object from `key=value` pairs.
///
/// `raw` values are always strings. `typed` values become `true`, `false`,
/// `null` or a number when they parse as one, and a string otherwise. Later
/// pairs overwrite earlier ones with the same key; typed pairs are applied
/// after raw ones.
pub fn fields_to_object(raw: &[String], typed: &[String]) -> Result<Map<String, Value>> {
    let mut object = Map::new();
    for field in raw {
        let (key, value) = split_field(field)?;
        object.insert(key.to_string(), Value::String(value.to_string()));
    }
    for field in typed {
        let (key, value) = split_field(field)?;
        object.insert(key.to_string(), typed_value(value));
    }
    Ok(object)
}

/// Parse a request body given as JSON text.
pub fn parse_body(text: &str) -> Result<Value> {
    Ok(serde_json::from_str(text)?)
}

fn split_field(field: &str) -> Result<(&str, &str)> {
    match field.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
        _ => Err(ClientError::InvalidField(field.to_string())),
    }
}

fn typed_value(text: &str) -> Value {
    match serde_json::from_str::<Value>(text) {
        Ok(v @ (Value::Bool(_) | Value::Null | Value::Number(_))) => v,
        _ => Value::String(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn raw_fields_stay_strings() {
        let obj = fields_to_object(&strings(&["title=Fix it", "count=3", "eq=a=b"]), &[]).unwrap();
        assert_eq!(
            Value::Object(obj),
            json!({"title": "Fix it", "count": "3", "eq": "a=b"})
        );
    }

    #[test]
    fn typed_fields_become_scalars() {
        let obj = fields_to_object(
            &[],
            &strings(&["private=true", "size=30", "ratio=0.5", "owner=null", "name=widgets"]),
        )
        .unwrap();
        assert_eq!(
            Value::Object(obj),
            json!({"private": true, "size": 30, "ratio": 0.5, "owner": null, "name": "widgets"})
        );
    }

    #[test]
    fn typed_fields_do_not_parse_containers() {
        let obj = fields_to_object(&[], &strings(&["labels=[1,2]"])).unwrap();
        assert_eq!(obj["labels"], json!("[1,2]"));
    }

    #[test]
    fn typed_overrides_raw() {
        let obj = fields_to_object(&strings(&["draft=maybe"]), &strings(&["draft=false"])).unwrap();
        assert_eq!(obj["draft"], json!(false));
    }

    #[test]
    fn field_without_equals_is_rejected() {
        let err = fields_to_object(&strings(&["title"]), &[]).unwrap_err();
        assert!(matches!(err, ClientError::InvalidField(f) if f == "title"));
        assert!(fields_to_object(&strings(&["=x"]), &[]).is_err());
    }

    #[test]
    fn parse_body_reports_bad_json() {
        assert_eq!(parse_body(r#"{"a": 1}"#).unwrap(), json!({"a": 1}));
        assert!(matches!(parse_body("{"), Err(ClientError::Json(_))));
    }
}
