/*!
The OTLP metrics data model.

Each type here streams as its OTLP protobuf message through [`sval`], using the canonical field numbers as indexes and the canonical JSON field names as labels.
*/

use std::{collections::HashSet, ops::ControlFlow};

pub mod metrics;

mod any_value;
mod instrumentation_scope;
mod resource;

#[cfg(test)]
pub(crate) mod generated;

pub use self::{any_value::*, instrumentation_scope::*, metrics::*, resource::*};

/**
Attributes for a data point, resource, or scope given inline.
*/
pub type Attributes<'a> = [KeyValue<&'a str, AnyValue<'a>>];

/**
Attributes streamed directly from a set of [`emit::Props`].

If a key appears more than once, the first value is used.
*/
pub struct PropsAttributes<P>(pub P);

impl<P: emit::Props> sval::Value for PropsAttributes<P> {
    fn stream<'sval, S: sval::Stream<'sval> + ?Sized>(&'sval self, stream: &mut S) -> sval::Result {
        stream_attributes(stream, &self.0)
    }
}

pub(crate) fn stream_field<'sval, S: sval::Stream<'sval> + ?Sized>(
    stream: &mut S,
    label: &sval::Label,
    index: &sval::Index,
    field: impl FnOnce(&mut S) -> sval::Result,
) -> sval::Result {
    stream.record_tuple_value_begin(None, label, index)?;
    field(&mut *stream)?;
    stream.record_tuple_value_end(None, label, index)
}

pub(crate) fn stream_attributes<'sval>(
    stream: &mut (impl sval::Stream<'sval> + ?Sized),
    props: &'sval impl emit::Props,
) -> sval::Result {
    fn attribute<'sval>(
        stream: &mut (impl sval::Stream<'sval> + ?Sized),
        key: emit::str::Str<'sval>,
        value: emit::Value<'sval>,
    ) -> sval::Result {
        stream.seq_value_begin()?;
        sval_ref::stream_ref(
            &mut *stream,
            KeyValue {
                key,
                value: EmitValue(value),
            },
        )?;
        stream.seq_value_end()
    }

    stream.seq_begin(None)?;

    let mut seen = HashSet::new();
    let streamed = props.for_each(|k, v| {
        if !seen.insert(k.to_cow()) {
            return ControlFlow::Continue(());
        }

        match attribute(&mut *stream, k, v) {
            Ok(()) => ControlFlow::Continue(()),
            Err(_) => ControlFlow::Break(()),
        }
    });

    if streamed.is_break() {
        return sval::error();
    }

    stream.seq_end()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn props_attributes_dedup_keys() {
        let props = [
            ("a", emit::Value::from(1i64)),
            ("b", emit::Value::from(2i64)),
            ("a", emit::Value::from(3i64)),
        ];

        let json = sval_json::stream_to_string(PropsAttributes(props)).unwrap();

        assert_eq!(1, json.matches("\"a\"").count(), "{json}");
        assert_eq!(1, json.matches("\"b\"").count(), "{json}");
        assert!(!json.contains('3'), "{json}");
    }
}
