use crate::grid::TrainingSet;
use crate::network::Network;
use crate::trial::Evaluation;
use serde::{Deserialize, Serialize};

/// Result of a training run. `trial[i]` belongs to `points.points()[i]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    pub points: TrainingSet,
    /// Trial value and input derivatives at the final parameters.
    pub trial: Vec<Evaluation>,
    pub network: Network,
    /// Error at the start of each epoch.
    pub error_history: Vec<f64>,
    /// Error at the final parameters.
    pub final_error: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub point: Vec<f64>,
    pub trial: Evaluation,
    pub exact: Evaluation,
}

/// Trained solution against an analytical one, point by point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub rows: Vec<ComparisonRow>,
    pub value_rmse: f64,
    /// One entry per input axis.
    pub gradient_rmse: Vec<f64>,
    /// One entry per input axis; empty when the trial carries no curvature.
    pub curvature_rmse: Vec<f64>,
}

impl Solution {
    /// Compares against `exact` at every training point. `None` when `exact`
    /// has no value somewhere.
    pub fn compare(&self, exact: impl Fn(&[f64]) -> Option<Evaluation>) -> Option<Comparison> {
        let rows = self
            .points
            .iter()
            .zip(&self.trial)
            .map(|(point, trial)| {
                exact(point).map(|exact| ComparisonRow {
                    point: point.to_vec(),
                    trial: trial.clone(),
                    exact,
                })
            })
            .collect::<Option<Vec<_>>>()?;

        let value_rmse = rmse(rows.iter().map(|r| r.trial.value - r.exact.value));
        let axes = self.points.dimension();
        let gradient_rmse = (0..axes)
            .map(|j| rmse(rows.iter().map(|r| r.trial.gradient[j] - r.exact.gradient[j])))
            .collect();
        let has_curvature = rows
            .iter()
            .all(|r| r.trial.curvature.len() == axes && r.exact.curvature.len() == axes);
        let curvature_rmse = if has_curvature {
            (0..axes)
                .map(|j| rmse(rows.iter().map(|r| r.trial.curvature[j] - r.exact.curvature[j])))
                .collect()
        } else {
            Vec::new()
        };

        Some(Comparison {
            rows,
            value_rmse,
            gradient_rmse,
            curvature_rmse,
        })
    }
}

fn rmse(errors: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = errors.fold((0.0, 0usize), |(s, n), e| (s + e * e, n + 1));
    if count == 0 {
        0.0
    } else {
        (sum / count as f64).sqrt()
    }
}
