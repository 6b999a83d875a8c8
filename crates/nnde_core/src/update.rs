use crate::error::{NndeError, Result};
use crate::network::{Network, Parameter};
use crate::objective::EpochObjective;
use crate::settings::UpdateRule;
use tracing::trace;

/// Writes the updated parameters into `next`. Every parameter is computed
/// from the `current` snapshot; `current` is never touched.
pub fn apply_update(
    current: &Network,
    objective: &EpochObjective,
    parameters: &[Parameter],
    rule: UpdateRule,
    eta: f64,
    epoch: usize,
    next: &mut Network,
) -> Result<()> {
    for (i, &parameter) in parameters.iter().enumerate() {
        let gradient = objective.gradient[i];
        let curvature = objective.curvature[i];
        let old = current.get(parameter);
        let step = match rule {
            UpdateRule::DiagonalNewton if curvature == 0.0 => f64::NAN,
            UpdateRule::DiagonalNewton => eta * gradient / curvature,
            UpdateRule::GradientDescent => eta * gradient,
        };
        let new = old - step;
        if !new.is_finite() {
            return Err(NndeError::NonFiniteUpdate {
                epoch,
                parameter: parameter.to_string(),
                gradient,
                curvature,
            });
        }
        trace!(%parameter, old, new, gradient, curvature, "parameter update");
        next.set(parameter, new);
    }
    Ok(())
}
