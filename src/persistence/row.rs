use std::fmt::Display;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One record of a table: column name to cell text.
///
/// The map keeps the order in which fields were inserted, which for rows read
/// from a table is header order. Two rows with the same fields compare equal
/// regardless of that order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(pub IndexMap<String, String>);

impl Row {
    pub fn new() -> Row {
        Row(IndexMap::new())
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn from_json(value: Value) -> Result<Row, String> {
        //! Coerce a JSON object into a [`Row`].
        //!
        //! Strings are kept as they are, numbers and booleans are stringified,
        //! `null` fields are dropped and nested arrays/objects are stored as
        //! their JSON text. Anything other than an object is rejected.

        let map = match value {
            Value::Object(map) => map,
            other => return Err(format!("invalid value {}: expected a json object", other)),
        };

        let mut row = Row::new();
        for (field, value) in map {
            match value {
                Value::Null => continue,
                Value::String(text) => row.insert(field, text),
                Value::Bool(flag) => row.insert(field, flag.to_string()),
                Value::Number(number) => row.insert(field, number.to_string()),
                nested => row.insert(field, nested.to_string()),
            }
        }

        Ok(row)
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Row(iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect())
    }
}

impl Display for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let row: Vec<String> = self
            .0
            .iter()
            .map(|(field, value)| format!("{}: {}", field, value))
            .collect();
        write!(f, "{}", row.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::Row;

    #[test]
    fn from_json_coerces_scalars_to_text() {
        let row = Row::from_json(json!({
            "id": 7,
            "name": "Jansen",
            "active": true,
            "note": null,
            "tags": ["a", "b"],
        }))
        .unwrap();

        assert_eq!(row.get("id"), Some("7"));
        assert_eq!(row.get("name"), Some("Jansen"));
        assert_eq!(row.get("active"), Some("true"));
        assert_eq!(row.get("note"), None);
        assert_eq!(row.get("tags"), Some(r#"["a","b"]"#));
    }

    #[test]
    fn from_json_rejects_non_objects() {
        assert!(Row::from_json(json!([1, 2])).is_err());
        assert!(Row::from_json(json!("id")).is_err());
    }

    #[test]
    fn equality_ignores_field_order() {
        let a: Row = [("id", "1"), ("name", "Jansen")].into_iter().collect();
        let b: Row = [("name", "Jansen"), ("id", "1")].into_iter().collect();

        assert_eq!(a, b);
    }
}
