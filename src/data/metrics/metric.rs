use sval_derive::Value;

use crate::data::{stream_field, Attributes};

use super::{HistogramDataPoint, NumberDataPoint, SummaryDataPoint};

const METRIC_NAME_LABEL: sval::Label = sval::Label::new("name").with_tag(&sval::tags::VALUE_IDENT);
const METRIC_DESCRIPTION_LABEL: sval::Label =
    sval::Label::new("description").with_tag(&sval::tags::VALUE_IDENT);
const METRIC_UNIT_LABEL: sval::Label = sval::Label::new("unit").with_tag(&sval::tags::VALUE_IDENT);
const METRIC_GAUGE_LABEL: sval::Label =
    sval::Label::new("gauge").with_tag(&sval::tags::VALUE_IDENT);
const METRIC_SUM_LABEL: sval::Label = sval::Label::new("sum").with_tag(&sval::tags::VALUE_IDENT);
const METRIC_HISTOGRAM_LABEL: sval::Label =
    sval::Label::new("histogram").with_tag(&sval::tags::VALUE_IDENT);
const METRIC_SUMMARY_LABEL: sval::Label =
    sval::Label::new("summary").with_tag(&sval::tags::VALUE_IDENT);

const METRIC_NAME_INDEX: sval::Index = sval::Index::new(1);
const METRIC_DESCRIPTION_INDEX: sval::Index = sval::Index::new(2);
const METRIC_UNIT_INDEX: sval::Index = sval::Index::new(3);
const METRIC_GAUGE_INDEX: sval::Index = sval::Index::new(5);
const METRIC_SUM_INDEX: sval::Index = sval::Index::new(7);
const METRIC_HISTOGRAM_INDEX: sval::Index = sval::Index::new(9);
const METRIC_SUMMARY_INDEX: sval::Index = sval::Index::new(11);

/**
A single instrument's aggregated timeseries.

A metric carries at most one payload: a [`Gauge`], [`Sum`], [`Histogram`], or [`Summary`]. The payload is fixed when the metric is constructed; to change it, build a new metric.

All data points in a metric use the same representation for their attributes, `A`.
*/
#[derive(Debug, PartialEq)]
pub struct Metric<'a, A: ?Sized = Attributes<'a>> {
    pub name: &'a str,
    pub description: &'a str,
    pub unit: &'a str,
    data: Option<MetricData<'a, A>>,
}

impl<'a, A: ?Sized> Clone for Metric<'a, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, A: ?Sized> Copy for Metric<'a, A> {}

/**
The payload of a [`Metric`].
*/
#[derive(Debug, PartialEq)]
pub enum MetricData<'a, A: ?Sized = Attributes<'a>> {
    Gauge(Gauge<'a, A>),
    Sum(Sum<'a, A>),
    Histogram(Histogram<'a, A>),
    Summary(Summary<'a, A>),
}

impl<'a, A: ?Sized> Clone for MetricData<'a, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, A: ?Sized> Copy for MetricData<'a, A> {}

impl<'a, A: ?Sized> From<Gauge<'a, A>> for MetricData<'a, A> {
    fn from(data: Gauge<'a, A>) -> Self {
        MetricData::Gauge(data)
    }
}

impl<'a, A: ?Sized> From<Sum<'a, A>> for MetricData<'a, A> {
    fn from(data: Sum<'a, A>) -> Self {
        MetricData::Sum(data)
    }
}

impl<'a, A: ?Sized> From<Histogram<'a, A>> for MetricData<'a, A> {
    fn from(data: Histogram<'a, A>) -> Self {
        MetricData::Histogram(data)
    }
}

impl<'a, A: ?Sized> From<Summary<'a, A>> for MetricData<'a, A> {
    fn from(data: Summary<'a, A>) -> Self {
        MetricData::Summary(data)
    }
}

impl<'a, A: ?Sized> Metric<'a, A> {
    pub fn new(name: &'a str, data: impl Into<MetricData<'a, A>>) -> Self {
        Metric {
            name,
            description: "",
            unit: "",
            data: Some(data.into()),
        }
    }

    /**
    A metric with no payload.

    It's valid to send, but carries no data.
    */
    pub fn empty(name: &'a str) -> Self {
        Metric {
            name,
            description: "",
            unit: "",
            data: None,
        }
    }

    pub fn gauge(name: &'a str, data_points: &'a [NumberDataPoint<'a, A>]) -> Self {
        Metric::new(name, Gauge { data_points })
    }

    pub fn sum(
        name: &'a str,
        data_points: &'a [NumberDataPoint<'a, A>],
        aggregation_temporality: AggregationTemporality,
        is_monotonic: bool,
    ) -> Self {
        Metric::new(
            name,
            Sum {
                data_points,
                aggregation_temporality,
                is_monotonic,
            },
        )
    }

    pub fn histogram(
        name: &'a str,
        data_points: &'a [HistogramDataPoint<'a, A>],
        aggregation_temporality: AggregationTemporality,
    ) -> Self {
        Metric::new(
            name,
            Histogram {
                data_points,
                aggregation_temporality,
            },
        )
    }

    pub fn summary(name: &'a str, data_points: &'a [SummaryDataPoint<'a, A>]) -> Self {
        Metric::new(name, Summary { data_points })
    }

    pub fn with_description(mut self, description: &'a str) -> Self {
        self.description = description;
        self
    }

    pub fn with_unit(mut self, unit: &'a str) -> Self {
        self.unit = unit;
        self
    }

    pub fn data(&self) -> Option<&MetricData<'a, A>> {
        self.data.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_none()
    }
}

impl<'a, A: sval::Value + ?Sized> sval::Value for Metric<'a, A> {
    fn stream<'sval, S: sval::Stream<'sval> + ?Sized>(&'sval self, stream: &mut S) -> sval::Result {
        stream.record_tuple_begin(None, None, None, None)?;

        stream_field(
            &mut *stream,
            &METRIC_NAME_LABEL,
            &METRIC_NAME_INDEX,
            |stream| stream.value(self.name),
        )?;

        stream_field(
            &mut *stream,
            &METRIC_DESCRIPTION_LABEL,
            &METRIC_DESCRIPTION_INDEX,
            |stream| stream.value(self.description),
        )?;

        stream_field(
            &mut *stream,
            &METRIC_UNIT_LABEL,
            &METRIC_UNIT_INDEX,
            |stream| stream.value(self.unit),
        )?;

        match &self.data {
            Some(MetricData::Gauge(data)) => stream_field(
                &mut *stream,
                &METRIC_GAUGE_LABEL,
                &METRIC_GAUGE_INDEX,
                |stream| stream.value(data),
            )?,
            Some(MetricData::Sum(data)) => stream_field(
                &mut *stream,
                &METRIC_SUM_LABEL,
                &METRIC_SUM_INDEX,
                |stream| stream.value(data),
            )?,
            Some(MetricData::Histogram(data)) => stream_field(
                &mut *stream,
                &METRIC_HISTOGRAM_LABEL,
                &METRIC_HISTOGRAM_INDEX,
                |stream| stream.value(data),
            )?,
            Some(MetricData::Summary(data)) => stream_field(
                &mut *stream,
                &METRIC_SUMMARY_LABEL,
                &METRIC_SUMMARY_INDEX,
                |stream| stream.value(data),
            )?,
            None => (),
        }

        stream.record_tuple_end(None, None, None)
    }
}

#[derive(Value, Debug, PartialEq)]
pub struct Gauge<'a, A: ?Sized = Attributes<'a>> {
    #[sval(label = "dataPoints", index = 1)]
    pub data_points: &'a [NumberDataPoint<'a, A>],
}

#[derive(Value, Debug, PartialEq)]
pub struct Sum<'a, A: ?Sized = Attributes<'a>> {
    #[sval(label = "dataPoints", index = 1)]
    pub data_points: &'a [NumberDataPoint<'a, A>],
    #[sval(label = "aggregationTemporality", index = 2)]
    pub aggregation_temporality: AggregationTemporality,
    #[sval(label = "isMonotonic", index = 3)]
    pub is_monotonic: bool,
}

#[derive(Value, Debug, PartialEq)]
pub struct Histogram<'a, A: ?Sized = Attributes<'a>> {
    #[sval(label = "dataPoints", index = 1)]
    pub data_points: &'a [HistogramDataPoint<'a, A>],
    #[sval(label = "aggregationTemporality", index = 2)]
    pub aggregation_temporality: AggregationTemporality,
}

#[derive(Value, Debug, PartialEq)]
pub struct Summary<'a, A: ?Sized = Attributes<'a>> {
    #[sval(label = "dataPoints", index = 1)]
    pub data_points: &'a [SummaryDataPoint<'a, A>],
}

macro_rules! impl_copy {
    ($($ty:ident),*) => {
        $(
            impl<'a, A: ?Sized> Clone for $ty<'a, A> {
                fn clone(&self) -> Self {
                    *self
                }
            }

            impl<'a, A: ?Sized> Copy for $ty<'a, A> {}
        )*
    };
}

impl_copy!(Gauge, Sum, Histogram, Summary);

/**
Whether reported values accumulate from a fixed start, or reset on each report.
*/
#[derive(Value, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
#[sval(unlabeled_variants)]
pub enum AggregationTemporality {
    Unspecified = 0,
    Delta = 1,
    Cumulative = 2,
}

/**
The point has no recorded value, like when its source stopped reporting.
*/
pub const DATA_POINT_FLAGS_NO_RECORDED_VALUE: u32 = 1;

