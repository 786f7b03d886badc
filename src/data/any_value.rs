use sval_derive::Value;

use super::stream_field;

const ANY_VALUE_STRING_LABEL: sval::Label =
    sval::Label::new("stringValue").with_tag(&sval::tags::VALUE_IDENT);
const ANY_VALUE_BOOL_LABEL: sval::Label =
    sval::Label::new("boolValue").with_tag(&sval::tags::VALUE_IDENT);
const ANY_VALUE_INT_LABEL: sval::Label =
    sval::Label::new("intValue").with_tag(&sval::tags::VALUE_IDENT);
const ANY_VALUE_DOUBLE_LABEL: sval::Label =
    sval::Label::new("doubleValue").with_tag(&sval::tags::VALUE_IDENT);
const ANY_VALUE_ARRAY_LABEL: sval::Label =
    sval::Label::new("arrayValue").with_tag(&sval::tags::VALUE_IDENT);
const ANY_VALUE_KVLIST_LABEL: sval::Label =
    sval::Label::new("kvlistValue").with_tag(&sval::tags::VALUE_IDENT);
const ANY_VALUE_BYTES_LABEL: sval::Label =
    sval::Label::new("bytesValue").with_tag(&sval::tags::VALUE_IDENT);

const ANY_VALUE_STRING_INDEX: sval::Index = sval::Index::new(1);
const ANY_VALUE_BOOL_INDEX: sval::Index = sval::Index::new(2);
const ANY_VALUE_INT_INDEX: sval::Index = sval::Index::new(3);
const ANY_VALUE_DOUBLE_INDEX: sval::Index = sval::Index::new(4);
const ANY_VALUE_ARRAY_INDEX: sval::Index = sval::Index::new(5);
const ANY_VALUE_KVLIST_INDEX: sval::Index = sval::Index::new(6);
const ANY_VALUE_BYTES_INDEX: sval::Index = sval::Index::new(7);

/**
An attribute value.

OTLP allows a small closed set of primitives, plus arrays of them.
*/
#[derive(Value, Debug, Clone, Copy, PartialEq)]
pub enum AnyValue<'a> {
    #[sval(label = ANY_VALUE_STRING_LABEL, index = ANY_VALUE_STRING_INDEX)]
    String(&'a str),
    #[sval(label = ANY_VALUE_BOOL_LABEL, index = ANY_VALUE_BOOL_INDEX)]
    Bool(bool),
    #[sval(label = ANY_VALUE_INT_LABEL, index = ANY_VALUE_INT_INDEX)]
    Int(i64),
    #[sval(label = ANY_VALUE_DOUBLE_LABEL, index = ANY_VALUE_DOUBLE_INDEX)]
    Double(f64),
    #[sval(label = ANY_VALUE_ARRAY_LABEL, index = ANY_VALUE_ARRAY_INDEX)]
    Array(ArrayValue<'a>),
}

impl<'a> AnyValue<'a> {
    /**
    An array attribute value.

    Elements should all be the same kind of primitive; this isn't checked.
    */
    pub fn array(values: &'a [AnyValue<'a>]) -> Self {
        AnyValue::Array(ArrayValue { values })
    }
}

impl<'a> From<&'a str> for AnyValue<'a> {
    fn from(value: &'a str) -> Self {
        AnyValue::String(value)
    }
}

impl<'a> From<bool> for AnyValue<'a> {
    fn from(value: bool) -> Self {
        AnyValue::Bool(value)
    }
}

impl<'a> From<i64> for AnyValue<'a> {
    fn from(value: i64) -> Self {
        AnyValue::Int(value)
    }
}

impl<'a> From<f64> for AnyValue<'a> {
    fn from(value: f64) -> Self {
        AnyValue::Double(value)
    }
}

const ARRAY_VALUES_LABEL: sval::Label =
    sval::Label::new("values").with_tag(&sval::tags::VALUE_IDENT);

const ARRAY_VALUES_INDEX: sval::Index = sval::Index::new(1);

#[derive(Value, Debug, Clone, Copy, PartialEq)]
pub struct ArrayValue<'a> {
    #[sval(label = ARRAY_VALUES_LABEL, index = ARRAY_VALUES_INDEX)]
    pub values: &'a [AnyValue<'a>],
}

const KVLIST_VALUES_LABEL: sval::Label =
    sval::Label::new("values").with_tag(&sval::tags::VALUE_IDENT);

const KVLIST_VALUES_INDEX: sval::Index = sval::Index::new(1);

const KEY_VALUE_KEY_LABEL: sval::Label = sval::Label::new("key").with_tag(&sval::tags::VALUE_IDENT);
const KEY_VALUE_VALUE_LABEL: sval::Label =
    sval::Label::new("value").with_tag(&sval::tags::VALUE_IDENT);

const KEY_VALUE_KEY_INDEX: sval::Index = sval::Index::new(1);
const KEY_VALUE_VALUE_INDEX: sval::Index = sval::Index::new(2);

/**
A single attribute.

Keys should be unique within one attribute set.
*/
#[derive(Value, Debug, Clone, Copy, PartialEq)]
pub struct KeyValue<K, V> {
    #[sval(label = KEY_VALUE_KEY_LABEL, index = KEY_VALUE_KEY_INDEX)]
    pub key: K,
    #[sval(label = KEY_VALUE_VALUE_LABEL, index = KEY_VALUE_VALUE_INDEX)]
    pub value: V,
}

impl<'a> KeyValue<&'a str, AnyValue<'a>> {
    pub fn new(key: &'a str, value: impl Into<AnyValue<'a>>) -> Self {
        KeyValue {
            key,
            value: value.into(),
        }
    }
}

impl<'a, K: sval_ref::ValueRef<'a>, V: sval_ref::ValueRef<'a>> sval_ref::ValueRef<'a>
    for KeyValue<K, V>
{
    fn stream_ref<S: sval::Stream<'a> + ?Sized>(&self, stream: &mut S) -> sval::Result {
        stream.record_tuple_begin(None, None, None, Some(2))?;

        stream_field(
            &mut *stream,
            &KEY_VALUE_KEY_LABEL,
            &KEY_VALUE_KEY_INDEX,
            |stream| sval_ref::stream_ref(&mut *stream, &self.key),
        )?;

        stream_field(
            &mut *stream,
            &KEY_VALUE_VALUE_LABEL,
            &KEY_VALUE_VALUE_INDEX,
            |stream| sval_ref::stream_ref(&mut *stream, &self.value),
        )?;

        stream.record_tuple_end(None, None, None)
    }
}

/**
An [`emit::Value`] streamed as an OTLP `AnyValue`.

Maps become `kvlistValue`s and binary becomes `bytesValue`. Map keys must be text.
*/
pub struct EmitValue<'a>(pub emit::Value<'a>);

impl<'a> sval::Value for EmitValue<'a> {
    fn stream<'sval, S: sval::Stream<'sval> + ?Sized>(&'sval self, stream: &mut S) -> sval::Result {
        use sval_ref::ValueRef as _;

        self.stream_ref(stream)
    }
}

impl<'a> sval_ref::ValueRef<'a> for EmitValue<'a> {
    fn stream_ref<S: sval::Stream<'a> + ?Sized>(&self, stream: &mut S) -> sval::Result {
        sval_ref::stream_ref(
            &mut AnyValueStream {
                inner: stream,
                position: Position::Value,
            },
            &self.0,
        )
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Position {
    Value,
    Key,
}

/**
Wraps each primitive in the `AnyValue` variant that holds it.

Inside a map key, only text is allowed, and it's streamed bare.
*/
struct AnyValueStream<S> {
    inner: S,
    position: Position,
}

impl<'sval, S: sval::Stream<'sval>> AnyValueStream<S> {
    fn variant_begin(&mut self, label: &sval::Label, index: &sval::Index) -> sval::Result {
        if self.position == Position::Key {
            return sval::error();
        }

        self.inner.enum_begin(None, None, None)?;
        self.inner.tagged_begin(None, Some(label), Some(index))
    }

    fn variant_end(&mut self, label: &sval::Label, index: &sval::Index) -> sval::Result {
        self.inner.tagged_end(None, Some(label), Some(index))?;
        self.inner.enum_end(None, None, None)
    }

    fn variant(
        &mut self,
        label: &sval::Label,
        index: &sval::Index,
        value: impl FnOnce(&mut S) -> sval::Result,
    ) -> sval::Result {
        self.variant_begin(label, index)?;
        value(&mut self.inner)?;
        self.variant_end(label, index)
    }

    // `ArrayValue` and `KeyValueList` are both a message with a single repeated `values` field
    fn values_begin(&mut self, values: Values, num_entries: Option<usize>) -> sval::Result {
        match values {
            Values::Array => {
                self.variant_begin(&ANY_VALUE_ARRAY_LABEL, &ANY_VALUE_ARRAY_INDEX)?;
                self.inner.record_tuple_begin(None, None, None, Some(1))?;
                self.inner
                    .record_tuple_value_begin(None, &ARRAY_VALUES_LABEL, &ARRAY_VALUES_INDEX)?;
            }
            Values::KvList => {
                self.variant_begin(&ANY_VALUE_KVLIST_LABEL, &ANY_VALUE_KVLIST_INDEX)?;
                self.inner.record_tuple_begin(None, None, None, Some(1))?;
                self.inner
                    .record_tuple_value_begin(None, &KVLIST_VALUES_LABEL, &KVLIST_VALUES_INDEX)?;
            }
        }

        self.inner.seq_begin(num_entries)
    }

    fn values_end(&mut self, values: Values) -> sval::Result {
        self.inner.seq_end()?;

        match values {
            Values::Array => {
                self.inner
                    .record_tuple_value_end(None, &ARRAY_VALUES_LABEL, &ARRAY_VALUES_INDEX)?;
                self.inner.record_tuple_end(None, None, None)?;
                self.variant_end(&ANY_VALUE_ARRAY_LABEL, &ANY_VALUE_ARRAY_INDEX)
            }
            Values::KvList => {
                self.inner
                    .record_tuple_value_end(None, &KVLIST_VALUES_LABEL, &KVLIST_VALUES_INDEX)?;
                self.inner.record_tuple_end(None, None, None)?;
                self.variant_end(&ANY_VALUE_KVLIST_LABEL, &ANY_VALUE_KVLIST_INDEX)
            }
        }
    }
}

#[derive(Clone, Copy)]
enum Values {
    Array,
    KvList,
}

impl<'sval, S: sval::Stream<'sval>> sval::Stream<'sval> for AnyValueStream<S> {
    fn null(&mut self) -> sval::Result {
        if self.position == Position::Key {
            return sval::error();
        }

        self.inner.null()
    }

    fn bool(&mut self, value: bool) -> sval::Result {
        self.variant(&ANY_VALUE_BOOL_LABEL, &ANY_VALUE_BOOL_INDEX, |stream| {
            stream.bool(value)
        })
    }

    fn i64(&mut self, value: i64) -> sval::Result {
        self.variant(&ANY_VALUE_INT_LABEL, &ANY_VALUE_INT_INDEX, |stream| {
            stream.i64(value)
        })
    }

    fn f64(&mut self, value: f64) -> sval::Result {
        self.variant(&ANY_VALUE_DOUBLE_LABEL, &ANY_VALUE_DOUBLE_INDEX, |stream| {
            stream.f64(value)
        })
    }

    fn text_begin(&mut self, num_bytes: Option<usize>) -> sval::Result {
        if self.position == Position::Value {
            self.variant_begin(&ANY_VALUE_STRING_LABEL, &ANY_VALUE_STRING_INDEX)?;
        }

        self.inner.text_begin(num_bytes)
    }

    fn text_fragment(&mut self, fragment: &'sval str) -> sval::Result {
        self.inner.text_fragment(fragment)
    }

    fn text_fragment_computed(&mut self, fragment: &str) -> sval::Result {
        self.inner.text_fragment_computed(fragment)
    }

    fn text_end(&mut self) -> sval::Result {
        self.inner.text_end()?;

        match self.position {
            Position::Value => self.variant_end(&ANY_VALUE_STRING_LABEL, &ANY_VALUE_STRING_INDEX),
            Position::Key => Ok(()),
        }
    }

    fn binary_begin(&mut self, num_bytes: Option<usize>) -> sval::Result {
        self.variant_begin(&ANY_VALUE_BYTES_LABEL, &ANY_VALUE_BYTES_INDEX)?;
        self.inner.binary_begin(num_bytes)
    }

    fn binary_fragment(&mut self, fragment: &'sval [u8]) -> sval::Result {
        self.inner.binary_fragment(fragment)
    }

    fn binary_fragment_computed(&mut self, fragment: &[u8]) -> sval::Result {
        self.inner.binary_fragment_computed(fragment)
    }

    fn binary_end(&mut self) -> sval::Result {
        self.inner.binary_end()?;
        self.variant_end(&ANY_VALUE_BYTES_LABEL, &ANY_VALUE_BYTES_INDEX)
    }

    fn seq_begin(&mut self, num_entries: Option<usize>) -> sval::Result {
        self.values_begin(Values::Array, num_entries)
    }

    fn seq_value_begin(&mut self) -> sval::Result {
        self.inner.seq_value_begin()
    }

    fn seq_value_end(&mut self) -> sval::Result {
        self.inner.seq_value_end()
    }

    fn seq_end(&mut self) -> sval::Result {
        self.values_end(Values::Array)
    }

    fn map_begin(&mut self, num_entries: Option<usize>) -> sval::Result {
        self.values_begin(Values::KvList, num_entries)
    }

    fn map_key_begin(&mut self) -> sval::Result {
        self.position = Position::Key;

        self.inner.seq_value_begin()?;
        self.inner.record_tuple_begin(None, None, None, Some(2))?;
        self.inner
            .record_tuple_value_begin(None, &KEY_VALUE_KEY_LABEL, &KEY_VALUE_KEY_INDEX)
    }

    fn map_key_end(&mut self) -> sval::Result {
        self.position = Position::Value;

        self.inner
            .record_tuple_value_end(None, &KEY_VALUE_KEY_LABEL, &KEY_VALUE_KEY_INDEX)
    }

    fn map_value_begin(&mut self) -> sval::Result {
        self.inner
            .record_tuple_value_begin(None, &KEY_VALUE_VALUE_LABEL, &KEY_VALUE_VALUE_INDEX)
    }

    fn map_value_end(&mut self) -> sval::Result {
        self.inner
            .record_tuple_value_end(None, &KEY_VALUE_VALUE_LABEL, &KEY_VALUE_VALUE_INDEX)?;
        self.inner.record_tuple_end(None, None, None)?;
        self.inner.seq_value_end()
    }

    fn map_end(&mut self) -> sval::Result {
        self.values_end(Values::KvList)
    }
}
