use sval_derive::Value;

use crate::data::{stream_field, InstrumentationScope, Resource};

use super::Metric;

/**
The root of a metrics export.

An empty set of resource metrics is a valid request.
*/
#[derive(Value)]
pub struct ExportMetricsServiceRequest<'a, RM: ?Sized = [ResourceMetrics<'a>]> {
    #[sval(label = "resourceMetrics", index = 1)]
    pub resource_metrics: &'a RM,
}

impl<'a, RM: ?Sized> ExportMetricsServiceRequest<'a, RM> {
    pub fn new(resource_metrics: &'a RM) -> Self {
        ExportMetricsServiceRequest { resource_metrics }
    }
}

const RESOURCE_METRICS_RESOURCE_LABEL: sval::Label =
    sval::Label::new("resource").with_tag(&sval::tags::VALUE_IDENT);
const RESOURCE_METRICS_SCOPE_METRICS_LABEL: sval::Label =
    sval::Label::new("scopeMetrics").with_tag(&sval::tags::VALUE_IDENT);
const RESOURCE_METRICS_SCHEMA_URL_LABEL: sval::Label =
    sval::Label::new("schemaUrl").with_tag(&sval::tags::VALUE_IDENT);

const RESOURCE_METRICS_RESOURCE_INDEX: sval::Index = sval::Index::new(1);
const RESOURCE_METRICS_SCOPE_METRICS_INDEX: sval::Index = sval::Index::new(2);
const RESOURCE_METRICS_SCHEMA_URL_INDEX: sval::Index = sval::Index::new(3);

/**
The metrics produced by a single [`Resource`], grouped by instrumentation scope.

Without a resource, the field is left out of the request entirely.
*/
pub struct ResourceMetrics<'a, R: ?Sized = Resource<'a>, SM: ?Sized = [ScopeMetrics<'a>]> {
    pub resource: Option<&'a R>,
    pub scope_metrics: &'a SM,
    pub schema_url: &'a str,
}

impl<'a, R: sval::Value + ?Sized, SM: sval::Value + ?Sized> sval::Value
    for ResourceMetrics<'a, R, SM>
{
    fn stream<'sval, S: sval::Stream<'sval> + ?Sized>(&'sval self, stream: &mut S) -> sval::Result {
        stream.record_tuple_begin(None, None, None, None)?;

        if let Some(resource) = self.resource {
            stream_field(
                &mut *stream,
                &RESOURCE_METRICS_RESOURCE_LABEL,
                &RESOURCE_METRICS_RESOURCE_INDEX,
                |stream| stream.value(resource),
            )?;
        }

        stream_field(
            &mut *stream,
            &RESOURCE_METRICS_SCOPE_METRICS_LABEL,
            &RESOURCE_METRICS_SCOPE_METRICS_INDEX,
            |stream| stream.value(self.scope_metrics),
        )?;

        stream_field(
            &mut *stream,
            &RESOURCE_METRICS_SCHEMA_URL_LABEL,
            &RESOURCE_METRICS_SCHEMA_URL_INDEX,
            |stream| stream.value(self.schema_url),
        )?;

        stream.record_tuple_end(None, None, None)
    }
}

impl<'a, R: ?Sized, SM: ?Sized> ResourceMetrics<'a, R, SM> {
    pub fn new(resource: Option<&'a R>, scope_metrics: &'a SM) -> Self {
        ResourceMetrics {
            resource,
            scope_metrics,
            schema_url: "",
        }
    }
}

/**
The metrics produced by a single [`InstrumentationScope`].
*/
#[derive(Value)]
pub struct ScopeMetrics<'a, IS: ?Sized = InstrumentationScope<'a>, M: ?Sized = [Metric<'a>]> {
    #[sval(label = "scope", index = 1)]
    pub scope: &'a IS,
    #[sval(label = "metrics", index = 2)]
    pub metrics: &'a M,
    #[sval(label = "schemaUrl", index = 3)]
    pub schema_url: &'a str,
}

impl<'a, IS: ?Sized, M: ?Sized> ScopeMetrics<'a, IS, M> {
    pub fn new(scope: &'a IS, metrics: &'a M) -> Self {
        ScopeMetrics {
            scope,
            metrics,
            schema_url: "",
        }
    }
}
