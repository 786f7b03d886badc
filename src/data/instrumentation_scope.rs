use sval_derive::Value;

use super::Attributes;

#[derive(Value)]
pub struct InstrumentationScope<'a, A: ?Sized = Attributes<'a>> {
    #[sval(label = "name", index = 1)]
    pub name: &'a str,
    #[sval(label = "version", index = 2)]
    pub version: &'a str,
    #[sval(label = "attributes", index = 3)]
    pub attributes: &'a A,
    #[sval(label = "droppedAttributesCount", index = 4)]
    pub dropped_attributes_count: u32,
}

impl<'a> InstrumentationScope<'a> {
    /**
    A scope with just a name, like the module path of the instrumented code.
    */
    pub fn new(name: &'a str) -> Self {
        InstrumentationScope {
            name,
            version: "",
            attributes: &[],
            dropped_attributes_count: 0,
        }
    }
}

impl<'a, A: ?Sized> InstrumentationScope<'a, A> {
    pub fn with_version(mut self, version: &'a str) -> Self {
        self.version = version;
        self
    }
}
