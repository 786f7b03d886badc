use sval::Value as _;
use sval_derive::Value;

use crate::{data::Attributes, UnsupportedValueKind};

/**
A single integer or floating-point measurement in a [`super::Gauge`] or [`super::Sum`].

The value is always exactly one of `asInt` or `asDouble`.

Attributes are given inline by default. Use [`NumberDataPoint::with_attributes`] to stream them from something else, like a [`crate::data::PropsAttributes`].
*/
#[derive(Value, Debug, PartialEq)]
pub struct NumberDataPoint<'a, A: ?Sized = Attributes<'a>> {
    #[sval(label = "attributes", index = 7)]
    pub attributes: &'a A,
    #[sval(
        label = "startTimeUnixNano",
        index = 2,
        data_tag = "sval_protobuf::tags::PROTOBUF_I64"
    )]
    pub start_time_unix_nano: u64,
    #[sval(
        label = "timeUnixNano",
        index = 3,
        data_tag = "sval_protobuf::tags::PROTOBUF_I64"
    )]
    pub time_unix_nano: u64,
    #[sval(flatten)]
    value: NumberDataPointValue,
    #[sval(label = "flags", index = 8)]
    pub flags: u32,
}

impl<'a, A: ?Sized> Clone for NumberDataPoint<'a, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, A: ?Sized> Copy for NumberDataPoint<'a, A> {}

impl<'a> NumberDataPoint<'a> {
    pub fn new(
        start_time_unix_nano: u64,
        time_unix_nano: u64,
        value: impl Into<NumberDataPointValue>,
    ) -> Self {
        NumberDataPoint {
            attributes: &[],
            start_time_unix_nano,
            time_unix_nano,
            value: value.into(),
            flags: 0,
        }
    }

    /**
    Create a point from a value whose type is only known at runtime.

    See [`NumberDataPointValue::try_from_value`].
    */
    pub fn try_new(
        start_time_unix_nano: u64,
        time_unix_nano: u64,
        value: emit::Value,
    ) -> Result<Self, UnsupportedValueKind> {
        Ok(NumberDataPoint::new(
            start_time_unix_nano,
            time_unix_nano,
            NumberDataPointValue::try_from_value(value)?,
        ))
    }
}

impl<'a, A: ?Sized> NumberDataPoint<'a, A> {
    pub fn with_attributes<B: ?Sized>(self, attributes: &'a B) -> NumberDataPoint<'a, B> {
        NumberDataPoint {
            attributes,
            start_time_unix_nano: self.start_time_unix_nano,
            time_unix_nano: self.time_unix_nano,
            value: self.value,
            flags: self.flags,
        }
    }

    pub fn with_flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    pub fn value(&self) -> NumberDataPointValue {
        self.value
    }

    /**
    Replace the value of this point.

    Whatever the previous value was, only the new one is kept. Setting an integer and then a float leaves just the float.
    */
    pub fn set_value(&mut self, value: impl Into<NumberDataPointValue>) {
        self.value = value.into();
    }

    /**
    Replace the value of this point with a value whose type is only known at runtime.

    If the value isn't an integer or float then the point is left unchanged.
    */
    pub fn try_set_value(&mut self, value: emit::Value) -> Result<(), UnsupportedValueKind> {
        self.value = NumberDataPointValue::try_from_value(value)?;

        Ok(())
    }
}

/**
The value of a [`NumberDataPoint`].
*/
#[derive(Value, Debug, Clone, Copy, PartialEq)]
pub enum NumberDataPointValue {
    #[sval(label = "asDouble", index = 4)]
    AsDouble(AsDouble),
    #[sval(label = "asInt", index = 6)]
    AsInt(AsInt),
}

#[derive(Value, Debug, Clone, Copy, PartialEq)]
pub struct AsDouble(pub f64);

#[derive(Value, Debug, Clone, Copy, PartialEq, Eq)]
#[sval(tag = "sval_protobuf::tags::PROTOBUF_I64")]
pub struct AsInt(pub i64);

impl NumberDataPointValue {
    pub fn from_i64(value: i64) -> Self {
        NumberDataPointValue::AsInt(AsInt(value))
    }

    pub fn from_f64(value: f64) -> Self {
        NumberDataPointValue::AsDouble(AsDouble(value))
    }

    /**
    Classify a value whose type is only known at runtime.

    Integers that fit in an `i64` become [`NumberDataPointValue::AsInt`] and floats become [`NumberDataPointValue::AsDouble`]. The choice is made on the type of the value alone, so `5.0` is a double even though it has no fractional part.

    Anything else, including text, booleans, null, and sequences, is an [`UnsupportedValueKind`].
    */
    pub fn try_from_value(value: emit::Value) -> Result<Self, UnsupportedValueKind> {
        let mut classify = Classify {
            value: None,
            unsupported: None,
        };

        // Errors are captured in `unsupported`
        let _ = value.stream(&mut classify);

        match (classify.value, classify.unsupported) {
            (Some(value), None) => Ok(value),
            (_, Some(kind)) => Err(UnsupportedValueKind::new(kind)),
            (None, None) => Err(UnsupportedValueKind::new("empty")),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            NumberDataPointValue::AsInt(AsInt(value)) => Some(*value),
            NumberDataPointValue::AsDouble(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            NumberDataPointValue::AsDouble(AsDouble(value)) => Some(*value),
            NumberDataPointValue::AsInt(_) => None,
        }
    }
}

impl From<i64> for NumberDataPointValue {
    fn from(value: i64) -> Self {
        NumberDataPointValue::from_i64(value)
    }
}

impl From<i32> for NumberDataPointValue {
    fn from(value: i32) -> Self {
        NumberDataPointValue::from_i64(value.into())
    }
}

impl From<f64> for NumberDataPointValue {
    fn from(value: f64) -> Self {
        NumberDataPointValue::from_f64(value)
    }
}

impl From<f32> for NumberDataPointValue {
    fn from(value: f32) -> Self {
        NumberDataPointValue::from_f64(value.into())
    }
}

struct Classify {
    value: Option<NumberDataPointValue>,
    unsupported: Option<&'static str>,
}

impl Classify {
    fn number(&mut self, value: NumberDataPointValue) -> sval::Result {
        if self.value.is_some() {
            return self.unsupported("sequence");
        }

        self.value = Some(value);

        Ok(())
    }

    fn unsupported(&mut self, kind: &'static str) -> sval::Result {
        self.unsupported.get_or_insert(kind);

        sval::error()
    }
}

impl<'sval> sval::Stream<'sval> for Classify {
    fn null(&mut self) -> sval::Result {
        self.unsupported("null")
    }

    fn bool(&mut self, _: bool) -> sval::Result {
        self.unsupported("bool")
    }

    fn text_begin(&mut self, _: Option<usize>) -> sval::Result {
        self.unsupported("text")
    }

    fn text_fragment_computed(&mut self, _: &str) -> sval::Result {
        self.unsupported("text")
    }

    fn text_end(&mut self) -> sval::Result {
        self.unsupported("text")
    }

    fn binary_begin(&mut self, _: Option<usize>) -> sval::Result {
        self.unsupported("binary")
    }

    fn i64(&mut self, value: i64) -> sval::Result {
        self.number(NumberDataPointValue::from_i64(value))
    }

    fn i128(&mut self, value: i128) -> sval::Result {
        match i64::try_from(value) {
            Ok(value) => self.i64(value),
            Err(_) => self.unsupported("out of range integer"),
        }
    }

    fn u128(&mut self, value: u128) -> sval::Result {
        match i64::try_from(value) {
            Ok(value) => self.i64(value),
            Err(_) => self.unsupported("out of range integer"),
        }
    }

    fn f64(&mut self, value: f64) -> sval::Result {
        self.number(NumberDataPointValue::from_f64(value))
    }

    fn seq_begin(&mut self, _: Option<usize>) -> sval::Result {
        self.unsupported("sequence")
    }

    fn seq_value_begin(&mut self) -> sval::Result {
        self.unsupported("sequence")
    }

    fn seq_value_end(&mut self) -> sval::Result {
        self.unsupported("sequence")
    }

    fn seq_end(&mut self) -> sval::Result {
        self.unsupported("sequence")
    }

    fn map_begin(&mut self, _: Option<usize>) -> sval::Result {
        self.unsupported("map")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_int_is_as_int() {
        let value = NumberDataPointValue::from(5);

        assert_eq!(Some(5), value.as_i64());
        assert_eq!(None, value.as_f64());
    }

    #[test]
    fn typed_float_without_fraction_is_as_double() {
        let value = NumberDataPointValue::from(5.0);

        assert_eq!(Some(5.0), value.as_f64());
        assert_eq!(None, value.as_i64());
    }

    #[test]
    fn runtime_int_is_as_int() {
        for value in [emit::Value::from(5i64), emit::Value::from(5u64)] {
            let value = NumberDataPointValue::try_from_value(value).unwrap();

            assert_eq!(NumberDataPointValue::AsInt(AsInt(5)), value);
        }
    }

    #[test]
    fn runtime_float_without_fraction_is_as_double() {
        let value = NumberDataPointValue::try_from_value(emit::Value::from(5.0f64)).unwrap();

        assert_eq!(NumberDataPointValue::AsDouble(AsDouble(5.0)), value);
    }

    #[test]
    fn runtime_unsupported_kinds() {
        for (value, kind) in [
            (emit::Value::from("x"), "text"),
            (emit::Value::from(true), "bool"),
            (emit::Value::from(u64::MAX), "out of range integer"),
        ] {
            let err = NumberDataPointValue::try_from_value(value).unwrap_err();

            assert_eq!(kind, err.kind());
        }
    }

    #[test]
    fn set_value_replaces_previous_value() {
        let mut point = NumberDataPoint::new(1, 2, 5);

        point.set_value(2.5);

        assert_eq!(NumberDataPointValue::from_f64(2.5), point.value());
        assert_eq!(None, point.value().as_i64());

        point.set_value(7);

        assert_eq!(NumberDataPointValue::from_i64(7), point.value());
        assert_eq!(None, point.value().as_f64());
    }

    #[test]
    fn try_set_value_failure_leaves_point_unchanged() {
        let mut point = NumberDataPoint::new(1, 2, 5);

        let err = point.try_set_value(emit::Value::from("x")).unwrap_err();

        assert_eq!("text", err.kind());
        assert_eq!(NumberDataPointValue::from_i64(5), point.value());
    }

    #[test]
    fn try_set_value_success_replaces_value() {
        let mut point = NumberDataPoint::new(1, 2, 5);

        point.try_set_value(emit::Value::from(1.5f64)).unwrap();

        assert_eq!(NumberDataPointValue::from_f64(1.5), point.value());
    }
}
