use nnde_core::{Comparison, Solution, TrainingSettings};
use serde::Serialize;
use std::fmt;

/// Result of one run. `Display` renders it as a plain-text table, against the
/// analytical solution when one is available.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub problem: &'a str,
    pub ntrain: usize,
    pub settings: TrainingSettings,
    pub solution: &'a Solution,
    pub comparison: Option<Comparison>,
}

fn join(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{:>12.6}", v))
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for RunReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let solution = self.solution;
        writeln!(
            f,
            "problem {} | {} points | {} hidden | {} epochs | eta {} | {}",
            self.problem,
            solution.points.len(),
            self.settings.hidden_units,
            self.settings.max_epochs,
            self.settings.eta,
            self.settings.update_rule
        )?;
        if let Some(first) = solution.error_history.first() {
            writeln!(f, "initial error {:.6e}", first)?;
        }
        writeln!(f, "final error   {:.6e}", solution.final_error)?;

        match &self.comparison {
            Some(comparison) => {
                writeln!(f, "{:>12} {:>12} {:>12} {:>12}", "point", "trial", "exact", "error")?;
                for row in &comparison.rows {
                    writeln!(
                        f,
                        "{} {:>12.6} {:>12.6} {:>12.3e}",
                        join(&row.point),
                        row.trial.value,
                        row.exact.value,
                        row.trial.value - row.exact.value
                    )?;
                }
                writeln!(f, "rmse value     {:.6e}", comparison.value_rmse)?;
                writeln!(f, "rmse gradient  {}", join(&comparison.gradient_rmse))?;
                if !comparison.curvature_rmse.is_empty() {
                    writeln!(f, "rmse curvature {}", join(&comparison.curvature_rmse))?;
                }
            }
            None => {
                writeln!(f, "{:>12} {:>12}", "point", "trial")?;
                for (point, trial) in solution.points.iter().zip(&solution.trial) {
                    writeln!(f, "{} {:>12.6}", join(point), trial.value)?;
                }
            }
        }
        Ok(())
    }
}
