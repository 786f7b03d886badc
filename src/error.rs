use std::{error, fmt};

/**
An error encoding a metrics export request.
*/
pub struct Error {
    msg: &'static str,
    source: Option<Box<dyn error::Error + Send + Sync>>,
}

impl Error {
    pub(crate) fn new(msg: &'static str, e: impl error::Error + Send + Sync + 'static) -> Self {
        Error {
            msg,
            source: Some(Box::new(e)),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|source| &**source as &(dyn error::Error + 'static))
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("msg", &self.msg)
            .field("source", &self.source)
            .finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source {
            Some(ref source) => write!(f, "{}: {}", self.msg, source),
            None => f.write_str(self.msg),
        }
    }
}

impl From<UnsupportedValueKind> for Error {
    fn from(err: UnsupportedValueKind) -> Self {
        Error::new("failed to classify a metric value", err)
    }
}

/**
A value given to a number data point wasn't an integer or floating-point number.

This is only possible for values whose type is known at runtime, like an [`emit::Value`]. Typed values are always classified.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsupportedValueKind {
    kind: &'static str,
}

impl UnsupportedValueKind {
    pub(crate) fn new(kind: &'static str) -> Self {
        UnsupportedValueKind { kind }
    }

    /**
    The kind of value that was found, like `"text"` or `"bool"`.
    */
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

impl error::Error for UnsupportedValueKind {}

impl fmt::Display for UnsupportedValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expected an integer or floating-point value, found {}",
            self.kind
        )
    }
}
