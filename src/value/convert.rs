//! Conversion of any `serde::Serialize` type into a [`Value`].
//!
//! Structs and enum variants become records named after the struct or the
//! variant; tuple-like fields are named by position.

use super::error::ConvertError;
use super::{Record, Value};
use serde::ser::{self, Serialize};
use std::rc::Rc;

/// Convert a serializable value into an inspectable [`Value`].
///
/// # Example
///
/// ```rust
/// use rewind::value::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Counter {
///     count: u32,
///     label: Option<String>,
/// }
///
/// let value = to_value(&Counter { count: 3, label: None }).unwrap();
/// let record = value.as_record().unwrap();
/// assert_eq!(record.type_name(), "Counter");
/// assert_eq!(record.get("count"), Some(&Value::Integer(3)));
/// assert_eq!(record.get("label"), Some(&Value::Null));
/// ```
pub fn to_value<T>(value: &T) -> Result<Value, ConvertError>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

struct ValueSerializer;

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = ConvertError;
    type SerializeSeq = SequenceBuilder;
    type SerializeTuple = SequenceBuilder;
    type SerializeTupleStruct = RecordBuilder;
    type SerializeTupleVariant = RecordBuilder;
    type SerializeMap = MappingBuilder;
    type SerializeStruct = RecordBuilder;
    type SerializeStructVariant = RecordBuilder;

    fn serialize_bool(self, v: bool) -> Result<Value, ConvertError> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value, ConvertError> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value, ConvertError> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value, ConvertError> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value, ConvertError> {
        Ok(Value::from(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value, ConvertError> {
        Ok(Value::Integer(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value, ConvertError> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value, ConvertError> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value, ConvertError> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value, ConvertError> {
        Ok(Value::from(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Value, ConvertError> {
        // Beyond i128 there is nothing to compute with; keep the digits.
        Ok(i128::try_from(v)
            .map(Value::Integer)
            .unwrap_or_else(|_| Value::opaque(v.to_string())))
    }

    fn serialize_f32(self, v: f32) -> Result<Value, ConvertError> {
        Ok(Value::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value, ConvertError> {
        Ok(Value::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<Value, ConvertError> {
        Ok(Value::text(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value, ConvertError> {
        Ok(Value::text(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value, ConvertError> {
        Ok(Value::sequence(v.iter().map(|byte| Value::from(*byte))))
    }

    fn serialize_none(self) -> Result<Value, ConvertError> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value, ConvertError>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value, ConvertError> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Value, ConvertError> {
        Ok(Value::record(name, Vec::<(String, Value)>::new()))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value, ConvertError> {
        Ok(Value::record(variant, Vec::<(String, Value)>::new()))
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> Result<Value, ConvertError>
    where
        T: ?Sized + Serialize,
    {
        Ok(Value::record(name, [("0", to_value(value)?)]))
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value, ConvertError>
    where
        T: ?Sized + Serialize,
    {
        Ok(Value::record(variant, [("0", to_value(value)?)]))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SequenceBuilder, ConvertError> {
        Ok(SequenceBuilder {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SequenceBuilder, ConvertError> {
        ser::Serializer::serialize_seq(self, Some(len))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        len: usize,
    ) -> Result<RecordBuilder, ConvertError> {
        Ok(RecordBuilder::new(name, len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<RecordBuilder, ConvertError> {
        Ok(RecordBuilder::new(variant, len))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<MappingBuilder, ConvertError> {
        Ok(MappingBuilder {
            entries: Vec::with_capacity(len.unwrap_or(0)),
            pending_key: None,
        })
    }

    fn serialize_struct(
        self,
        name: &'static str,
        len: usize,
    ) -> Result<RecordBuilder, ConvertError> {
        Ok(RecordBuilder::new(name, len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<RecordBuilder, ConvertError> {
        Ok(RecordBuilder::new(variant, len))
    }
}

struct SequenceBuilder {
    items: Vec<Value>,
}

impl ser::SerializeSeq for SequenceBuilder {
    type Ok = Value;
    type Error = ConvertError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), ConvertError>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value, ConvertError> {
        Ok(Value::Sequence(Rc::from(self.items)))
    }
}

impl ser::SerializeTuple for SequenceBuilder {
    type Ok = Value;
    type Error = ConvertError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), ConvertError>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, ConvertError> {
        ser::SerializeSeq::end(self)
    }
}

struct MappingBuilder {
    entries: Vec<(Value, Value)>,
    pending_key: Option<Value>,
}

impl ser::SerializeMap for MappingBuilder {
    type Ok = Value;
    type Error = ConvertError;

    fn serialize_key<T>(&mut self, key: &T) -> Result<(), ConvertError>
    where
        T: ?Sized + Serialize,
    {
        self.pending_key = Some(to_value(key)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<(), ConvertError>
    where
        T: ?Sized + Serialize,
    {
        let key = self.pending_key.take().ok_or(ConvertError::MissingKey)?;
        self.entries.push((key, to_value(value)?));
        Ok(())
    }

    fn end(self) -> Result<Value, ConvertError> {
        Ok(Value::Mapping(Rc::from(self.entries)))
    }
}

struct RecordBuilder {
    type_name: &'static str,
    fields: Vec<(String, Value)>,
}

impl RecordBuilder {
    fn new(type_name: &'static str, len: usize) -> Self {
        Self {
            type_name,
            fields: Vec::with_capacity(len),
        }
    }

    fn push_positional<T>(&mut self, value: &T) -> Result<(), ConvertError>
    where
        T: ?Sized + Serialize,
    {
        let name = self.fields.len().to_string();
        self.fields.push((name, to_value(value)?));
        Ok(())
    }

    fn finish(self) -> Value {
        Value::Record(Rc::new(Record::new(self.type_name, self.fields)))
    }
}

impl ser::SerializeTupleStruct for RecordBuilder {
    type Ok = Value;
    type Error = ConvertError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), ConvertError>
    where
        T: ?Sized + Serialize,
    {
        self.push_positional(value)
    }

    fn end(self) -> Result<Value, ConvertError> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for RecordBuilder {
    type Ok = Value;
    type Error = ConvertError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), ConvertError>
    where
        T: ?Sized + Serialize,
    {
        self.push_positional(value)
    }

    fn end(self) -> Result<Value, ConvertError> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for RecordBuilder {
    type Ok = Value;
    type Error = ConvertError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), ConvertError>
    where
        T: ?Sized + Serialize,
    {
        self.fields.push((key.to_string(), to_value(value)?));
        Ok(())
    }

    fn end(self) -> Result<Value, ConvertError> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for RecordBuilder {
    type Ok = Value;
    type Error = ConvertError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), ConvertError>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeStruct::serialize_field(self, key, value)
    }

    fn end(self) -> Result<Value, ConvertError> {
        Ok(self.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    enum Action {
        Reset,
        Add(i64),
        Move(i32, i32),
        Rename { from: String, to: String },
    }

    #[derive(Serialize)]
    struct Meters(f64);

    #[derive(Serialize)]
    struct Marker;

    #[test]
    fn unit_variant_becomes_empty_record() {
        let value = to_value(&Action::Reset).unwrap();
        assert_eq!(value.type_name(), "Reset");
        assert!(value.as_record().unwrap().fields().is_empty());
    }

    #[test]
    fn tuple_like_fields_are_positional() {
        let value = to_value(&Action::Add(5)).unwrap();
        let record = value.as_record().unwrap();
        assert_eq!(record.type_name(), "Add");
        assert_eq!(record.get("0"), Some(&Value::Integer(5)));

        let value = to_value(&Action::Move(1, -1)).unwrap();
        let record = value.as_record().unwrap();
        assert_eq!(record.get("1"), Some(&Value::Integer(-1)));

        let value = to_value(&Meters(2.5)).unwrap();
        assert_eq!(value.type_name(), "Meters");
    }

    #[test]
    fn struct_variant_keeps_named_fields() {
        let value = to_value(&Action::Rename {
            from: "a".into(),
            to: "b".into(),
        })
        .unwrap();
        let record = value.as_record().unwrap();
        assert_eq!(record.type_name(), "Rename");
        assert_eq!(record.get("to"), Some(&Value::text("b")));
    }

    #[test]
    fn collections_map_to_their_shapes() {
        let mut scores = BTreeMap::new();
        scores.insert("ada", 3);
        scores.insert("bob", 5);

        match to_value(&scores).unwrap() {
            Value::Mapping(entries) => {
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[0], (Value::text("ada"), Value::Integer(3)));
            }
            other => panic!("Expected mapping, got {other:?}"),
        }

        match to_value(&(1, "two")).unwrap() {
            Value::Sequence(items) => assert_eq!(items.len(), 2),
            other => panic!("Expected sequence, got {other:?}"),
        }
    }

    #[test]
    fn unit_and_none_become_null() {
        assert_eq!(to_value(&()).unwrap(), Value::Null);
        assert_eq!(to_value(&None::<u8>).unwrap(), Value::Null);
        assert_eq!(to_value(&Marker).unwrap().type_name(), "Marker");
    }

    #[test]
    fn huge_unsigned_values_stay_readable() {
        let value = to_value(&u128::MAX).unwrap();
        assert_eq!(value, Value::opaque(u128::MAX.to_string()));
    }
}
