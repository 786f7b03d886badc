use sval_derive::Value;

use super::Attributes;

/**
The entity that produced a batch of metrics.

Attributes can be given inline as a slice of [`super::KeyValue`]s, or streamed from a set of [`emit::Props`] using [`super::PropsAttributes`].
*/
#[derive(Value)]
pub struct Resource<'a, A: ?Sized = Attributes<'a>> {
    #[sval(label = "attributes", index = 1)]
    pub attributes: &'a A,
    #[sval(label = "droppedAttributesCount", index = 2)]
    pub dropped_attributes_count: u32,
}

impl<'a, A: ?Sized> Resource<'a, A> {
    pub fn new(attributes: &'a A) -> Self {
        Resource {
            attributes,
            dropped_attributes_count: 0,
        }
    }
}
