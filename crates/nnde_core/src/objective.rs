//! Error `E = Σ G²` over the training set with its diagonal derivatives.
use crate::formulation::Formulation;
use crate::grid::TrainingSet;
use crate::network::{Network, Parameter};
use crate::trial::{Evaluation, PointExpansion};
use nalgebra::DVector;

/// Everything one epoch needs from the current parameters.
#[derive(Debug, Clone)]
pub struct EpochObjective {
    pub error: f64,
    /// `dE/dp`, indexed like `Network::parameters`.
    pub gradient: DVector<f64>,
    /// `d²E/dp²`, indexed like `Network::parameters`.
    pub curvature: DVector<f64>,
    /// Trial function at each training point.
    pub trial: Vec<Evaluation>,
}

/// Evaluates the trial function, residual and error derivatives at every
/// training point for the given parameter snapshot.
pub fn evaluate<F: Formulation>(
    formulation: &F,
    network: &Network,
    parameters: &[Parameter],
    points: &TrainingSet,
) -> EpochObjective {
    let construction = formulation.construction();
    let mut error = 0.0;
    let mut gradient = DVector::zeros(parameters.len());
    let mut curvature = DVector::zeros(parameters.len());
    let mut trial = Vec::with_capacity(points.len());

    for point in points.iter() {
        let expansion = PointExpansion::<F::Order>::new(construction, network, point);
        let base = expansion.trial();
        let partials = formulation.partials(point, &base);
        let g = partials.residual;
        error += g * g;

        for (i, &parameter) in parameters.iter().enumerate() {
            let sensitivity = expansion.sensitivity(network, point, parameter);
            let (dg, d2g) = partials.chain(&sensitivity);
            gradient[i] += 2.0 * g * dg;
            curvature[i] += 2.0 * (g * d2g + dg * dg);
        }
        trial.push(base);
    }

    EpochObjective {
        error,
        gradient,
        curvature,
        trial,
    }
}
