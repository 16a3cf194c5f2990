use happi_model::{MergedRecord, Metric};
use serde::Serialize;

/// Square correlation grid in split orientation (`columns`, `index`, `data`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<Metric>,
    pub index: Vec<Metric>,
    pub data: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, row: Metric, column: Metric) -> Option<f64> {
        let i = self.index.iter().position(|&metric| metric == row)?;
        let j = self.columns.iter().position(|&metric| metric == column)?;
        self.data[i][j]
    }
}

/// Pearson correlation over the pairs where both sides are present.
///
/// Absent with fewer than two pairs or when either side is constant.
pub fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;
    let (mut covariance, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((covariance / (var_x * var_y).sqrt()).clamp(-1.0, 1.0))
}

pub fn correlation_matrix(records: &[MergedRecord], metrics: &[Metric]) -> CorrelationMatrix {
    let data = metrics
        .iter()
        .map(|&row| {
            metrics
                .iter()
                .map(|&column| {
                    let pairs: Vec<(f64, f64)> = records
                        .iter()
                        .filter_map(|merged| {
                            Some((row.get(&merged.record)?, column.get(&merged.record)?))
                        })
                        .collect();
                    pearson(&pairs)
                })
                .collect()
        })
        .collect();
    CorrelationMatrix {
        columns: metrics.to_vec(),
        index: metrics.to_vec(),
        data,
    }
}
