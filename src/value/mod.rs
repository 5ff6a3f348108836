//! Inspectable value shapes.
//!
//! Every state or action shown by the panel is first turned into a [`Value`]:
//! a closed set of shapes (primitives, sequences, mappings, sets and records)
//! that the presenters know how to render. Composite payloads are shared
//! through `Rc`, so two values built from the same snapshot compare as
//! identical without walking their contents.

mod convert;
mod error;
mod macros;

pub use convert::to_value;
pub use error::ConvertError;

use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;
use std::rc::Rc;

/// A snapshot of an arbitrary in-memory value, reduced to the shapes the
/// presenters can render.
///
/// # Example
///
/// ```rust
/// use rewind::value::Value;
///
/// let todo = Value::record(
///     "Todo",
///     [("title", Value::from("write docs")), ("done", Value::from(false))],
/// );
///
/// assert_eq!(todo.type_name(), "Todo");
/// let record = todo.as_record().unwrap();
/// assert_eq!(record.fields()[0].0, "done");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i128),
    Float(f64),
    Text(Rc<str>),
    DateTime(DateTime<Utc>),
    /// A value with no internal structure worth descending into; shown as-is.
    Opaque(Rc<str>),
    Sequence(Rc<[Value]>),
    Mapping(Rc<[(Value, Value)]>),
    Set(Rc<[Value]>),
    Record(Rc<Record>),
}

/// A named value with named attributes.
///
/// Fields are kept sorted by name; the presenter lists them in that order.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    type_name: String,
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new<N, I, K>(type_name: N, fields: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut fields: Vec<(String, Value)> = fields
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));
        Self {
            type_name: type_name.into(),
            fields,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Attributes in sorted-by-name order.
    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .binary_search_by(|(field, _)| field.as_str().cmp(name))
            .ok()
            .map(|index| &self.fields[index].1)
    }
}

impl Value {
    pub fn text(text: impl AsRef<str>) -> Self {
        Value::Text(Rc::from(text.as_ref()))
    }

    pub fn opaque(text: impl AsRef<str>) -> Self {
        Value::Opaque(Rc::from(text.as_ref()))
    }

    pub fn sequence(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Sequence(items.into_iter().collect())
    }

    pub fn mapping(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Value::Mapping(entries.into_iter().collect())
    }

    /// Build a set from already-distinct elements. Duplicates are not removed.
    pub fn set(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Set(items.into_iter().collect())
    }

    pub fn record<N, I, K>(type_name: N, fields: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Value::Record(Rc::new(Record::new(type_name, fields)))
    }

    /// Name of the value's shape, or the record's own type name.
    pub fn type_name(&self) -> &str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Boolean",
            Value::Integer(_) => "Integer",
            Value::Float(_) => "Float",
            Value::Text(_) => "Text",
            Value::DateTime(_) => "DateTime",
            Value::Opaque(_) => "Opaque",
            Value::Sequence(_) => "Sequence",
            Value::Mapping(_) => "Mapping",
            Value::Set(_) => "Set",
            Value::Record(record) => record.type_name(),
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Textual form of a primitive, as shown in an inline literal token.
    ///
    /// Composite values fall back to their type name.
    pub fn literal(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(value) => value.to_string(),
            Value::Integer(value) => value.to_string(),
            Value::Float(value) => format!("{value:?}"),
            Value::Text(text) => format!("{:?}", &**text),
            Value::DateTime(at) => at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            Value::Opaque(text) => text.to_string(),
            composite => composite.type_name().to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Integer(value as i128)
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::text(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(Rc::from(value))
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::DateTime(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::sequence(items.into_iter().map(Into::into))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn record_fields_are_sorted_by_name() {
        let value = Value::record(
            "User",
            [
                ("name", Value::from("ada")),
                ("age", Value::from(36)),
                ("email", Value::Null),
            ],
        );

        let record = value.as_record().unwrap();
        let names: Vec<&str> = record.fields().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["age", "email", "name"]);
        assert_eq!(record.get("age"), Some(&Value::Integer(36)));
        assert_eq!(record.get("missing"), None);
    }

    #[test]
    fn type_names_describe_shapes() {
        assert_eq!(Value::Null.type_name(), "Null");
        assert_eq!(Value::from(1).type_name(), "Integer");
        assert_eq!(Value::from(vec![1, 2]).type_name(), "Sequence");
        assert_eq!(Value::set([Value::from(1)]).type_name(), "Set");
        assert_eq!(Value::record("Cart", Vec::<(&str, Value)>::new()).type_name(), "Cart");
    }

    #[test]
    fn literals_render_primitives() {
        assert_eq!(Value::Null.literal(), "null");
        assert_eq!(Value::from(true).literal(), "true");
        assert_eq!(Value::from(-7).literal(), "-7");
        assert_eq!(Value::from(1.5).literal(), "1.5");
        assert_eq!(Value::from(2.0).literal(), "2.0");
        assert_eq!(Value::from("hi \"you\"").literal(), "\"hi \\\"you\\\"\"");
        assert_eq!(Value::opaque("<native>").literal(), "<native>");

        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        assert_eq!(Value::from(at).literal(), "2024-03-01T12:30:00Z");
    }

    #[test]
    fn option_converts_to_null() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some(3)), Value::Integer(3));
    }
}
