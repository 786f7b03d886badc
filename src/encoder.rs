use bytes::{Buf, Bytes};
use sval_json::JsonStr;
use sval_protobuf::buf::{ProtoBuf, ProtoBufCursor};

use crate::{
    data::ExportMetricsServiceRequest,
    internal_metrics::{EncoderMetrics, InternalMetrics},
    Error,
};

/**
The wire format of an encoded request.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /**
    OTLP protobuf.
    */
    Proto,
    /**
    OTLP JSON.
    */
    Json,
}

impl Encoding {
    /**
    The value of the `content-type` header to send with a request in this encoding.
    */
    pub fn content_type(&self) -> &'static str {
        match self {
            Encoding::Proto => "application/x-protobuf",
            Encoding::Json => "application/json",
        }
    }
}

/**
Encodes [`ExportMetricsServiceRequest`]s into bytes for a transport to send.

An encoder keeps its own counters of what it has encoded. It holds no other state, so one encoder can be shared across export cycles.
*/
pub struct MetricsEncoder {
    encoding: Encoding,
    metrics: InternalMetrics,
}

impl MetricsEncoder {
    pub fn new(encoding: Encoding) -> Self {
        MetricsEncoder {
            encoding,
            metrics: InternalMetrics::default(),
        }
    }

    /**
    Get an encoder for OTLP protobuf.
    */
    pub fn proto() -> Self {
        Self::new(Encoding::Proto)
    }

    /**
    Get an encoder for OTLP JSON.
    */
    pub fn json() -> Self {
        Self::new(Encoding::Json)
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /**
    Encode a request.
    */
    pub fn encode<RM: sval::Value + ?Sized>(
        &self,
        request: &ExportMetricsServiceRequest<RM>,
    ) -> Result<EncodedPayload, Error> {
        let encoded = match self.encoding {
            Encoding::Proto => Proto::encode(request),
            Encoding::Json => Json::encode(request),
        };

        match encoded {
            Ok(payload) => {
                self.metrics.request_encoded.increment();
                self.metrics.request_encoded_bytes.increment_by(payload.len());

                Ok(payload)
            }
            Err(err) => {
                self.metrics.request_encode_failed.increment();

                emit::warn!(
                    rt: emit::runtime::internal(),
                    "failed to encode metrics request: {err}",
                    err,
                );

                Err(err)
            }
        }
    }

    /**
    Get a sample of this encoder's self-diagnostics.
    */
    pub fn metrics(&self) -> EncoderMetrics {
        self.metrics.sample()
    }
}

trait RawEncoder {
    fn encode<V: sval::Value + ?Sized>(value: &V) -> Result<EncodedPayload, Error>;
}

struct Proto;

impl RawEncoder for Proto {
    fn encode<V: sval::Value + ?Sized>(value: &V) -> Result<EncodedPayload, Error> {
        Ok(EncodedPayload::Proto(sval_protobuf::stream_to_protobuf(value)))
    }
}

struct Json;

impl RawEncoder for Json {
    fn encode<V: sval::Value + ?Sized>(value: &V) -> Result<EncodedPayload, Error> {
        let json = sval_json::stream_to_string(value)
            .map_err(|e| Error::new("failed to stream a request as JSON", e))?;

        Ok(EncodedPayload::Json(JsonStr::boxed(json)))
    }
}

/**
An encoded request.
*/
pub enum EncodedPayload {
    Proto(ProtoBuf),
    Json(Box<JsonStr>),
}

impl EncodedPayload {
    pub fn encoding(&self) -> Encoding {
        match self {
            EncodedPayload::Proto(_) => Encoding::Proto,
            EncodedPayload::Json(_) => Encoding::Json,
        }
    }

    pub fn content_type(&self) -> &'static str {
        self.encoding().content_type()
    }

    pub fn len(&self) -> usize {
        match self {
            EncodedPayload::Proto(buf) => buf.len(),
            EncodedPayload::Json(buf) => buf.as_str().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /**
    Get a [`Buf`] over the encoded bytes.
    */
    pub fn into_cursor(self) -> EncodedPayloadCursor {
        match self {
            EncodedPayload::Proto(buf) => EncodedPayloadCursor::Proto(buf.into_cursor()),
            EncodedPayload::Json(buf) => {
                EncodedPayloadCursor::Json(Bytes::copy_from_slice(buf.as_str().as_bytes()))
            }
        }
    }

    pub fn into_vec(self) -> Vec<u8> {
        let mut cursor = self.into_cursor();
        let len = cursor.remaining();

        cursor.copy_to_bytes(len).to_vec()
    }
}

pub enum EncodedPayloadCursor {
    Proto(ProtoBufCursor),
    Json(Bytes),
}

impl Buf for EncodedPayloadCursor {
    fn remaining(&self) -> usize {
        match self {
            EncodedPayloadCursor::Proto(cursor) => cursor.remaining(),
            EncodedPayloadCursor::Json(bytes) => bytes.remaining(),
        }
    }

    fn chunk(&self) -> &[u8] {
        match self {
            EncodedPayloadCursor::Proto(cursor) => cursor.chunk(),
            EncodedPayloadCursor::Json(bytes) => bytes.chunk(),
        }
    }

    fn advance(&mut self, cnt: usize) {
        match self {
            EncodedPayloadCursor::Proto(cursor) => cursor.advance(cnt),
            EncodedPayloadCursor::Json(bytes) => bytes.advance(cnt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::data::ResourceMetrics;

    #[test]
    fn encode_empty_request_json() {
        let encoder = MetricsEncoder::json();

        let payload = encoder
            .encode(&ExportMetricsServiceRequest::<[ResourceMetrics]>::new(&[]))
            .unwrap();

        assert_eq!("application/json", payload.content_type());
        assert_eq!(
            "{\"resourceMetrics\":[]}",
            String::from_utf8(payload.into_vec()).unwrap()
        );
    }

    #[test]
    fn encode_counts_requests() {
        let encoder = MetricsEncoder::json();

        for _ in 0..3 {
            encoder
                .encode(&ExportMetricsServiceRequest::<[ResourceMetrics]>::new(&[]))
                .unwrap();
        }

        let metrics = encoder.metrics();

        assert_eq!(3, metrics.request_encoded);
        assert_eq!(0, metrics.request_encode_failed);
        assert_eq!(3 * "{\"resourceMetrics\":[]}".len(), metrics.request_encoded_bytes);
    }

    #[test]
    fn json_cursor_reads_in_chunks() {
        let payload = EncodedPayload::Json(JsonStr::boxed(String::from("{\"a\":1}")));

        let mut cursor = payload.into_cursor();
        cursor.advance(2);

        assert_eq!(5, cursor.remaining());
        assert_eq!(b"a\":1}", cursor.chunk());
    }
}
