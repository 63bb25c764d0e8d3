//! Column/value lists for INSERT and UPDATE.

use crate::error::{SqlError, SqlResult};
use crate::value::Value;
use serde::Serialize;

/// An ordered list of `(column, value)` pairs.
///
/// Column order is preserved and determines both the column list and the
/// binding order of the rendered statement.
///
/// ```ignore
/// let record = Record::new().set("name", "John").set("age", 20);
/// let record = Record::from([("name", Value::from("John")), ("age", 20.into())]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. Setting a column twice replaces its value in place.
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    /// In-place form of [`Record::set`].
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        let column = column.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == column) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((column, value)),
        }
    }

    /// Build a record from any struct or map that serializes to a JSON object.
    ///
    /// Field order follows serialization order. Nested arrays and objects are
    /// rejected.
    pub fn from_serialize<T: Serialize + ?Sized>(data: &T) -> SqlResult<Self> {
        match serde_json::to_value(data)? {
            serde_json::Value::Object(map) => {
                let mut record = Record::new();
                for (column, json) in map {
                    let value = Value::from_json(json).map_err(|_| {
                        SqlError::serialization(format!("field `{column}` has no scalar SQL form"))
                    })?;
                    record.fields.push((column, value));
                }
                Ok(record)
            }
            other => Err(SqlError::serialization(format!(
                "expected an object to build a record, got {other}"
            ))),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(column, _)| column.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.iter().map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(c, v)| (c.as_str(), v))
    }
}

impl<C: Into<String>, const N: usize> From<[(C, Value); N]> for Record {
    fn from(fields: [(C, Value); N]) -> Self {
        fields
            .into_iter()
            .fold(Record::new(), |record, (c, v)| record.set(c, v))
    }
}

impl<C: Into<String>> From<Vec<(C, Value)>> for Record {
    fn from(fields: Vec<(C, Value)>) -> Self {
        fields
            .into_iter()
            .fold(Record::new(), |record, (c, v)| record.set(c, v))
    }
}

impl<C: Into<String>, V: Into<Value>> FromIterator<(C, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (C, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Record::new(), |record, (c, v)| record.set(c, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct NewUser<'a> {
        name: &'a str,
        age: u32,
        sex: &'a str,
        nickname: Option<&'a str>,
    }

    #[test]
    fn test_set_keeps_order_and_replaces() {
        let record = Record::new()
            .set("name", "John")
            .set("age", 20)
            .set("name", "Jane");
        assert_eq!(record.columns().collect::<Vec<_>>(), vec!["name", "age"]);
        assert_eq!(
            record.values().cloned().collect::<Vec<_>>(),
            vec![Value::from("Jane"), Value::from(20)]
        );
    }

    #[test]
    fn test_from_serialize_preserves_field_order() {
        let record = Record::from_serialize(&NewUser {
            name: "John",
            age: 20,
            sex: "M",
            nickname: None,
        })
        .unwrap();
        assert_eq!(
            record.columns().collect::<Vec<_>>(),
            vec!["name", "age", "sex", "nickname"]
        );
        assert_eq!(
            record.values().cloned().collect::<Vec<_>>(),
            vec![
                Value::from("John"),
                Value::from(20),
                Value::from("M"),
                Value::Null
            ]
        );
    }

    #[test]
    fn test_from_serialize_rejects_non_objects() {
        let err = Record::from_serialize(&vec![1, 2]).unwrap_err();
        assert!(matches!(err, SqlError::Serialization(_)));

        let nested = serde_json::json!({ "tags": ["a", "b"] });
        let err = Record::from_serialize(&nested).unwrap_err();
        assert!(err.to_string().contains("tags"));
    }

    #[test]
    fn test_from_pairs() {
        let record = Record::from([("a", Value::from(1)), ("b", Value::from(2))]);
        assert_eq!(record.len(), 2);
        let record: Record = vec![("x", 1), ("y", 2)].into_iter().collect();
        assert_eq!(record.columns().collect::<Vec<_>>(), vec!["x", "y"]);
    }
}
