use std::collections::BTreeMap;

use happi_model::{MergedRecord, Metric};

/// Running mean that ignores absent values.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    pub(crate) fn add(&mut self, value: Option<f64>) {
        if let Some(value) = value {
            self.sum += value;
            self.count += 1;
        }
    }

    pub(crate) fn value(self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Sum that stays absent until a value is seen.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Sum(Option<f64>);

impl Sum {
    pub(crate) fn add(&mut self, value: Option<f64>) {
        if let Some(value) = value {
            self.0 = Some(self.0.unwrap_or(0.0) + value);
        }
    }

    pub(crate) fn value(self) -> Option<f64> {
        self.0
    }
}

/// Per-metric means over one group of rows.
#[derive(Debug, Clone, Default)]
pub(crate) struct MetricMeans {
    means: BTreeMap<Metric, Mean>,
}

impl MetricMeans {
    pub(crate) fn add(&mut self, metrics: &[Metric], record: &MergedRecord) {
        for &metric in metrics {
            self.means
                .entry(metric)
                .or_default()
                .add(metric.get(&record.record));
        }
    }

    pub(crate) fn finish(&self, metrics: &[Metric]) -> BTreeMap<Metric, Option<f64>> {
        metrics
            .iter()
            .map(|&metric| {
                let mean = self.means.get(&metric).copied().unwrap_or_default();
                (metric, mean.value())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_skips_absent() {
        let mut mean = Mean::default();
        mean.add(Some(2.0));
        mean.add(None);
        mean.add(Some(4.0));
        assert_eq!(mean.value(), Some(3.0));
        assert_eq!(Mean::default().value(), None);
    }

    #[test]
    fn empty_sum_is_absent() {
        let mut sum = Sum::default();
        sum.add(None);
        assert_eq!(sum.value(), None);
        sum.add(Some(0.0));
        assert_eq!(sum.value(), Some(0.0));
    }
}
