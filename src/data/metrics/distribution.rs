use sval_derive::Value;

use crate::data::{stream_field, Attributes};

/**
A bucketed distribution of measurements.

`bucket_counts` should have one more entry than `explicit_bounds`. The shape isn't validated here.
*/
#[derive(Debug, PartialEq)]
pub struct HistogramDataPoint<'a, A: ?Sized = Attributes<'a>> {
    pub attributes: &'a A,
    pub start_time_unix_nano: u64,
    pub time_unix_nano: u64,
    pub count: u64,
    pub sum: f64,
    pub bucket_counts: &'a [u64],
    pub explicit_bounds: &'a [f64],
    pub flags: u32,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl<'a, A: ?Sized> Clone for HistogramDataPoint<'a, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, A: ?Sized> Copy for HistogramDataPoint<'a, A> {}

impl<'a> Default for HistogramDataPoint<'a> {
    fn default() -> Self {
        HistogramDataPoint {
            attributes: &[],
            start_time_unix_nano: 0,
            time_unix_nano: 0,
            count: 0,
            sum: 0.0,
            bucket_counts: &[],
            explicit_bounds: &[],
            flags: 0,
            min: None,
            max: None,
        }
    }
}

const HISTOGRAM_DATA_POINT_ATTRIBUTES_LABEL: sval::Label =
    sval::Label::new("attributes").with_tag(&sval::tags::VALUE_IDENT);
const HISTOGRAM_DATA_POINT_START_TIME_UNIX_NANO_LABEL: sval::Label =
    sval::Label::new("startTimeUnixNano").with_tag(&sval::tags::VALUE_IDENT);
const HISTOGRAM_DATA_POINT_TIME_UNIX_NANO_LABEL: sval::Label =
    sval::Label::new("timeUnixNano").with_tag(&sval::tags::VALUE_IDENT);
const HISTOGRAM_DATA_POINT_COUNT_LABEL: sval::Label =
    sval::Label::new("count").with_tag(&sval::tags::VALUE_IDENT);
const HISTOGRAM_DATA_POINT_SUM_LABEL: sval::Label =
    sval::Label::new("sum").with_tag(&sval::tags::VALUE_IDENT);
const HISTOGRAM_DATA_POINT_BUCKET_COUNTS_LABEL: sval::Label =
    sval::Label::new("bucketCounts").with_tag(&sval::tags::VALUE_IDENT);
const HISTOGRAM_DATA_POINT_EXPLICIT_BOUNDS_LABEL: sval::Label =
    sval::Label::new("explicitBounds").with_tag(&sval::tags::VALUE_IDENT);
const HISTOGRAM_DATA_POINT_FLAGS_LABEL: sval::Label =
    sval::Label::new("flags").with_tag(&sval::tags::VALUE_IDENT);
const HISTOGRAM_DATA_POINT_MIN_LABEL: sval::Label =
    sval::Label::new("min").with_tag(&sval::tags::VALUE_IDENT);
const HISTOGRAM_DATA_POINT_MAX_LABEL: sval::Label =
    sval::Label::new("max").with_tag(&sval::tags::VALUE_IDENT);

const HISTOGRAM_DATA_POINT_START_TIME_UNIX_NANO_INDEX: sval::Index = sval::Index::new(2);
const HISTOGRAM_DATA_POINT_TIME_UNIX_NANO_INDEX: sval::Index = sval::Index::new(3);
const HISTOGRAM_DATA_POINT_COUNT_INDEX: sval::Index = sval::Index::new(4);
const HISTOGRAM_DATA_POINT_SUM_INDEX: sval::Index = sval::Index::new(5);
const HISTOGRAM_DATA_POINT_BUCKET_COUNTS_INDEX: sval::Index = sval::Index::new(6);
const HISTOGRAM_DATA_POINT_EXPLICIT_BOUNDS_INDEX: sval::Index = sval::Index::new(7);
const HISTOGRAM_DATA_POINT_ATTRIBUTES_INDEX: sval::Index = sval::Index::new(9);
const HISTOGRAM_DATA_POINT_FLAGS_INDEX: sval::Index = sval::Index::new(10);
const HISTOGRAM_DATA_POINT_MIN_INDEX: sval::Index = sval::Index::new(11);
const HISTOGRAM_DATA_POINT_MAX_INDEX: sval::Index = sval::Index::new(12);

#[derive(Value)]
#[sval(tag = "sval_protobuf::tags::PROTOBUF_I64")]
struct Fixed64(u64);

struct Fixed64Seq<'a>(&'a [u64]);

impl<'a> sval::Value for Fixed64Seq<'a> {
    fn stream<'sval, S: sval::Stream<'sval> + ?Sized>(&'sval self, stream: &mut S) -> sval::Result {
        stream.seq_begin(Some(self.0.len()))?;

        for count in self.0 {
            stream.seq_value_begin()?;
            stream.value_computed(&Fixed64(*count))?;
            stream.seq_value_end()?;
        }

        stream.seq_end()
    }
}

impl<'a, A: sval::Value + ?Sized> sval::Value for HistogramDataPoint<'a, A> {
    fn stream<'sval, S: sval::Stream<'sval> + ?Sized>(&'sval self, stream: &mut S) -> sval::Result {
        stream.record_tuple_begin(None, None, None, None)?;

        stream_field(
            &mut *stream,
            &HISTOGRAM_DATA_POINT_ATTRIBUTES_LABEL,
            &HISTOGRAM_DATA_POINT_ATTRIBUTES_INDEX,
            |stream| stream.value(self.attributes),
        )?;

        stream_field(
            &mut *stream,
            &HISTOGRAM_DATA_POINT_START_TIME_UNIX_NANO_LABEL,
            &HISTOGRAM_DATA_POINT_START_TIME_UNIX_NANO_INDEX,
            |stream| stream.value_computed(&Fixed64(self.start_time_unix_nano)),
        )?;

        stream_field(
            &mut *stream,
            &HISTOGRAM_DATA_POINT_TIME_UNIX_NANO_LABEL,
            &HISTOGRAM_DATA_POINT_TIME_UNIX_NANO_INDEX,
            |stream| stream.value_computed(&Fixed64(self.time_unix_nano)),
        )?;

        stream_field(
            &mut *stream,
            &HISTOGRAM_DATA_POINT_COUNT_LABEL,
            &HISTOGRAM_DATA_POINT_COUNT_INDEX,
            |stream| stream.value_computed(&Fixed64(self.count)),
        )?;

        stream_field(
            &mut *stream,
            &HISTOGRAM_DATA_POINT_SUM_LABEL,
            &HISTOGRAM_DATA_POINT_SUM_INDEX,
            |stream| stream.f64(self.sum),
        )?;

        stream_field(
            &mut *stream,
            &HISTOGRAM_DATA_POINT_BUCKET_COUNTS_LABEL,
            &HISTOGRAM_DATA_POINT_BUCKET_COUNTS_INDEX,
            |stream| stream.value_computed(&Fixed64Seq(self.bucket_counts)),
        )?;

        stream_field(
            &mut *stream,
            &HISTOGRAM_DATA_POINT_EXPLICIT_BOUNDS_LABEL,
            &HISTOGRAM_DATA_POINT_EXPLICIT_BOUNDS_INDEX,
            |stream| stream.value(self.explicit_bounds),
        )?;

        stream_field(
            &mut *stream,
            &HISTOGRAM_DATA_POINT_FLAGS_LABEL,
            &HISTOGRAM_DATA_POINT_FLAGS_INDEX,
            |stream| stream.u32(self.flags),
        )?;

        if let Some(min) = self.min {
            stream_field(
                &mut *stream,
                &HISTOGRAM_DATA_POINT_MIN_LABEL,
                &HISTOGRAM_DATA_POINT_MIN_INDEX,
                |stream| stream.f64(min),
            )?;
        }

        if let Some(max) = self.max {
            stream_field(
                &mut *stream,
                &HISTOGRAM_DATA_POINT_MAX_LABEL,
                &HISTOGRAM_DATA_POINT_MAX_INDEX,
                |stream| stream.f64(max),
            )?;
        }

        stream.record_tuple_end(None, None, None)
    }
}

/**
A precomputed set of quantiles over a distribution of measurements.
*/
#[derive(Value, Debug, PartialEq)]
pub struct SummaryDataPoint<'a, A: ?Sized = Attributes<'a>> {
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
    #[sval(label = "count", index = 4, data_tag = "sval_protobuf::tags::PROTOBUF_I64")]
    pub count: u64,
    #[sval(label = "sum", index = 5)]
    pub sum: f64,
    #[sval(label = "quantileValues", index = 6)]
    pub quantile_values: &'a [ValueAtQuantile],
    #[sval(label = "flags", index = 8)]
    pub flags: u32,
}

impl<'a, A: ?Sized> Clone for SummaryDataPoint<'a, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, A: ?Sized> Copy for SummaryDataPoint<'a, A> {}

impl<'a> Default for SummaryDataPoint<'a> {
    fn default() -> Self {
        SummaryDataPoint {
            attributes: &[],
            start_time_unix_nano: 0,
            time_unix_nano: 0,
            count: 0,
            sum: 0.0,
            quantile_values: &[],
            flags: 0,
        }
    }
}

#[derive(Value, Debug, Clone, Copy, PartialEq, Default)]
pub struct ValueAtQuantile {
    /**
    The quantile, between `0.0` and `1.0` inclusive.
    */
    #[sval(label = "quantile", index = 1)]
    pub quantile: f64,
    #[sval(label = "value", index = 2)]
    pub value: f64,
}
