//! Handle the translation of filter values.

use super::error::Error;

/// The text bound for a filter value.
///
/// Integers are written in decimal and floats in positional notation, never with
/// an exponent. Null, arrays and objects have no text form.
pub fn stringify(field: &str, operator: &str, value: &serde_json::Value) -> Result<String, Error> {
    match value {
        serde_json::Value::String(string) => Ok(string.clone()),
        serde_json::Value::Bool(boolean) => Ok(boolean.to_string()),
        serde_json::Value::Number(number) => Ok(if let Some(integer) = number.as_i64() {
            integer.to_string()
        } else if let Some(integer) = number.as_u64() {
            integer.to_string()
        } else {
            number
                .as_f64()
                .map_or_else(|| number.to_string(), |float| float.to_string())
        }),
        serde_json::Value::Null => Err(Error::MissingFilterValue {
            field: field.to_string(),
            operator: operator.to_string(),
        }),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            Err(Error::UnsupportedFilterValue {
                field: field.to_string(),
                value: value.clone(),
            })
        }
    }
}
