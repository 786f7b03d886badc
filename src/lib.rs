/*!
Shape aggregated metrics as OTLP export requests.

This library builds the OTLP `ExportMetricsServiceRequest` envelope: resources, instrumentation scopes, and the metrics they produce. It encodes requests as protobuf or JSON, ready for any transport to send.

Requests borrow their data, so building and encoding one doesn't need to allocate intermediate messages:

```
use emit_otlp_metrics::{data::*, MetricsEncoder};

let points = [NumberDataPoint::new(0, 1_000, 42)];
let metrics = [Metric::sum("requests", &points, AggregationTemporality::Cumulative, true)];

let scope = InstrumentationScope::new("my_app");
let scopes = [ScopeMetrics::new(&scope, &metrics[..])];

let resource_attributes = [KeyValue::new("service.name", "my_app")];
let resource = Resource::new(&resource_attributes[..]);
let resources = [ResourceMetrics::new(Some(&resource), &scopes[..])];

let payload = MetricsEncoder::proto()
    .encode(&ExportMetricsServiceRequest::new(&resources[..]))
    .unwrap();

assert_eq!("application/x-protobuf", payload.content_type());
```

A metric's value can also come from a runtime [`emit::Value`]. Integers become `asInt` and floats become `asDouble`; anything else is rejected with an [`UnsupportedValueKind`]:

```
use emit_otlp_metrics::data::NumberDataPoint;

let mut point = NumberDataPoint::try_new(0, 1_000, emit::Value::from(5.0)).unwrap();

assert_eq!(Some(5.0), point.value().as_f64());

assert!(point.try_set_value(emit::Value::from("five")).is_err());
```
*/

pub mod data;

mod encoder;
mod error;
mod internal_metrics;

pub use self::{encoder::*, error::*, internal_metrics::EncoderMetrics};
