//! Composition of the trial function `Yt = A + P·N` on jets.
use crate::boundary::{ClosedForm, TrialConstruction};
use crate::jet::{InputJet, InputOrder, ParamJet};
use crate::network::{Network, Parameter};
use crate::traits::Scalar;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

/// A function's value, gradient and Hessian diagonal at one point.
///
/// `curvature` is empty when only first derivatives are tracked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation<T = f64> {
    pub value: T,
    pub gradient: Vec<T>,
    pub curvature: Vec<T>,
}

/// `A + P·N` along one input axis.
pub fn compose<T: Scalar, X: InputJet<T>>(
    anchor: &ClosedForm,
    envelope: &ClosedForm,
    axis: usize,
    network: X,
) -> X {
    anchor.along::<T, X>(axis) + envelope.along::<T, X>(axis) * network
}

/// Collects the per-axis trial jets into one evaluation.
fn assemble<T: Scalar, O: InputOrder>(per_axis: impl Iterator<Item = O::Jet<T>>) -> Evaluation<T> {
    let mut out = Evaluation {
        value: T::zero(),
        gradient: Vec::new(),
        curvature: Vec::new(),
    };
    for (axis, jet) in per_axis.enumerate() {
        if axis == 0 {
            out.value = jet.value();
        }
        out.gradient.push(jet.first());
        if O::ORDER >= 2 {
            out.curvature.push(jet.second());
        }
    }
    out
}

/// The network decomposed at one point, ready for repeated parameter seeding.
#[derive(Debug, Clone)]
pub struct PointExpansion<O: InputOrder> {
    anchor: ClosedForm,
    envelope: ClosedForm,
    /// Per axis: the full network jet and its per-unit terms.
    axes: Vec<(O::Jet<f64>, Vec<O::Jet<f64>>)>,
}

impl<O: InputOrder> PointExpansion<O> {
    pub fn new(construction: &dyn TrialConstruction, network: &Network, point: &[f64]) -> Self {
        let axes = (0..construction.dimension())
            .map(|axis| {
                let terms = network.unit_terms::<O>(point, axis);
                let total = terms
                    .iter()
                    .fold(<O::Jet<f64> as Zero>::zero(), |acc, &t| acc + t);
                (total, terms)
            })
            .collect();
        Self {
            anchor: construction.anchor(point),
            envelope: construction.envelope(point),
            axes,
        }
    }

    /// `Yt` and its input derivatives at the current parameters.
    pub fn trial(&self) -> Evaluation {
        assemble::<f64, O>(
            self.axes
                .iter()
                .enumerate()
                .map(|(axis, (total, _))| {
                    compose::<f64, O::Jet<f64>>(&self.anchor, &self.envelope, axis, *total)
                }),
        )
    }

    /// `Yt` and its input derivatives, each carrying its first and second
    /// derivative with respect to `parameter`.
    pub fn sensitivity(
        &self,
        network: &Network,
        point: &[f64],
        parameter: Parameter,
    ) -> Evaluation<ParamJet> {
        assemble::<ParamJet, O>(self.axes.iter().enumerate().map(|(axis, (total, terms))| {
            let seeded = network.seeded_output::<O>(point, axis, total, terms, parameter);
            compose::<ParamJet, O::Jet<ParamJet>>(&self.anchor, &self.envelope, axis, seeded)
        }))
    }
}
