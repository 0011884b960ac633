//! Metrics sink backed by the `metrics` facade.

use async_trait::async_trait;
use metrics::Label;

use crate::clients::{ClientResult, MetricDatum, MetricsSink};
use crate::observability::metrics::{metric_key, record_gauge};

/// Records each datum as a gauge; exposed by the Prometheus exporter.
#[derive(Debug, Default, Clone)]
pub struct PrometheusMetricsSink;

impl PrometheusMetricsSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MetricsSink for PrometheusMetricsSink {
    async fn put_metric(&self, datum: &MetricDatum) -> ClientResult<()> {
        let labels = datum
            .dimensions
            .iter()
            .map(|(name, value)| Label::new(name.clone(), value.clone()))
            .collect();
        record_gauge(metric_key(&datum.namespace, &datum.metric_name), labels, datum.value);
        Ok(())
    }
}
