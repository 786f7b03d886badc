mod distribution;
mod export_metrics_service;
mod metric;
mod number;

pub use self::{distribution::*, export_metrics_service::*, metric::*, number::*};
