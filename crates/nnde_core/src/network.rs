//! One-hidden-layer sigmoid network: `N(x) = Σ_k v[k]·σ(Σ_j w[j][k]·x[j] + u[k])`.
use crate::activation;
use crate::jet::{InputJet, InputOrder, ParamJet};
use crate::traits::Scalar;
use nalgebra::{DMatrix, DVector};
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single trainable scalar of the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    InputWeight { input: usize, unit: usize },
    Bias { unit: usize },
    OutputWeight { unit: usize },
}

impl Parameter {
    /// The hidden unit this parameter feeds.
    pub fn unit(&self) -> usize {
        match *self {
            Parameter::InputWeight { unit, .. } => unit,
            Parameter::Bias { unit } => unit,
            Parameter::OutputWeight { unit } => unit,
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::InputWeight { input, unit } => write!(f, "w[{}][{}]", input, unit),
            Parameter::Bias { unit } => write!(f, "u[{}]", unit),
            Parameter::OutputWeight { unit } => write!(f, "v[{}]", unit),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    /// Input weights: one row per input coordinate, one column per hidden unit.
    pub w: DMatrix<f64>,
    /// Hidden biases.
    pub u: DVector<f64>,
    /// Output weights.
    pub v: DVector<f64>,
}

impl Network {
    /// Draws every parameter independently from U[-1, 1].
    pub fn random<R: Rng + ?Sized>(inputs: usize, hidden: usize, rng: &mut R) -> Self {
        let dist = Uniform::new_inclusive(-1.0, 1.0);
        let w = DMatrix::from_fn(inputs, hidden, |_, _| dist.sample(&mut *rng));
        let u = DVector::from_fn(hidden, |_, _| dist.sample(&mut *rng));
        let v = DVector::from_fn(hidden, |_, _| dist.sample(&mut *rng));
        Self { w, u, v }
    }

    pub fn seeded(inputs: usize, hidden: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::random(inputs, hidden, &mut rng)
    }

    pub fn inputs(&self) -> usize {
        self.w.nrows()
    }

    pub fn hidden_units(&self) -> usize {
        self.w.ncols()
    }

    /// Every parameter: all input weights (input-major), then biases, then
    /// output weights. `parameters()[i]` owns slot `i` of the objective
    /// gradient and curvature.
    pub fn parameters(&self) -> Vec<Parameter> {
        let hidden = self.hidden_units();
        let mut out = Vec::with_capacity((self.inputs() + 2) * hidden);
        for input in 0..self.inputs() {
            out.extend((0..hidden).map(|unit| Parameter::InputWeight { input, unit }));
        }
        out.extend((0..hidden).map(|unit| Parameter::Bias { unit }));
        out.extend((0..hidden).map(|unit| Parameter::OutputWeight { unit }));
        out
    }

    pub fn get(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::InputWeight { input, unit } => self.w[(input, unit)],
            Parameter::Bias { unit } => self.u[unit],
            Parameter::OutputWeight { unit } => self.v[unit],
        }
    }

    pub fn set(&mut self, parameter: Parameter, value: f64) {
        match parameter {
            Parameter::InputWeight { input, unit } => self.w[(input, unit)] = value,
            Parameter::Bias { unit } => self.u[unit] = value,
            Parameter::OutputWeight { unit } => self.v[unit] = value,
        }
    }

    /// Plain forward pass.
    pub fn output(&self, point: &[f64]) -> f64 {
        (0..self.hidden_units())
            .map(|unit| {
                let z = point
                    .iter()
                    .enumerate()
                    .map(|(input, &x)| self.w[(input, unit)] * x)
                    .sum::<f64>()
                    + self.u[unit];
                self.v[unit] * activation::sigmoid(z)
            })
            .sum()
    }

    /// Per-unit contributions `v[k]·σ(z_k)` as jets along input `axis`, with
    /// every parameter held fixed.
    pub fn unit_terms<O: InputOrder>(&self, point: &[f64], axis: usize) -> Vec<O::Jet<f64>> {
        (0..self.hidden_units())
            .map(|unit| self.input_jet::<f64, O>(point, axis, unit, |_, value| value))
            .collect()
    }

    /// The network output along `axis`, seeded in `parameter`.
    ///
    /// Only the unit that `parameter` feeds depends on it, so the remaining
    /// units are taken from `total - terms[unit]` and lifted as constants.
    pub fn seeded_output<O: InputOrder>(
        &self,
        point: &[f64],
        axis: usize,
        total: &O::Jet<f64>,
        terms: &[O::Jet<f64>],
        parameter: Parameter,
    ) -> O::Jet<ParamJet> {
        let unit = parameter.unit();
        let rest = *total - terms[unit];
        let seeded = self.input_jet::<ParamJet, O>(point, axis, unit, |p, value| {
            if p == parameter {
                ParamJet::seeded(value)
            } else {
                ParamJet::fixed(value)
            }
        });
        O::lift::<ParamJet>(&rest) + seeded
    }

    /// `lift` embeds each parameter value into the coefficient type; that is
    /// where a parameter gets seeded.
    fn input_jet<T: Scalar, O: InputOrder>(
        &self,
        point: &[f64],
        axis: usize,
        unit: usize,
        lift: impl Fn(Parameter, f64) -> T,
    ) -> O::Jet<T> {
        let constant = |value: T| <O::Jet<T> as InputJet<T>>::constant(value);
        let mut z = constant(lift(Parameter::Bias { unit }, self.u[unit]));
        for (input, &x) in point.iter().enumerate() {
            let weight = constant(lift(
                Parameter::InputWeight { input, unit },
                self.w[(input, unit)],
            ));
            let coordinate = if input == axis {
                <O::Jet<T> as InputJet<T>>::variable(T::from_f64(x))
            } else {
                constant(T::from_f64(x))
            };
            z += weight * coordinate;
        }
        constant(lift(Parameter::OutputWeight { unit }, self.v[unit])) * z.sigmoid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jet::{FirstOrder, SecondOrder};
    use approx::assert_abs_diff_eq;

    fn sample() -> Network {
        Network::seeded(2, 4, 7)
    }

    fn summed<O: InputOrder>(net: &Network, point: &[f64], axis: usize) -> O::Jet<f64> {
        net.unit_terms::<O>(point, axis)
            .into_iter()
            .fold(<O::Jet<f64> as num_traits::Zero>::zero(), |acc, t| acc + t)
    }

    #[test]
    fn seeded_initialisation_is_reproducible_and_bounded() {
        let a = Network::seeded(2, 5, 42);
        let b = Network::seeded(2, 5, 42);
        assert_eq!(a, b);
        assert_ne!(a, Network::seeded(2, 5, 43));
        for value in a.w.iter().chain(a.u.iter()).chain(a.v.iter()) {
            assert!((-1.0..=1.0).contains(value));
        }
    }

    #[test]
    fn parameter_layout() {
        let net = sample();
        let params = net.parameters();
        assert_eq!(params.len(), 16);
        assert_eq!(params[0], Parameter::InputWeight { input: 0, unit: 0 });
        assert_eq!(params[5], Parameter::InputWeight { input: 1, unit: 1 });
        assert_eq!(params[8], Parameter::Bias { unit: 0 });
        assert_eq!(params[15], Parameter::OutputWeight { unit: 3 });
        assert_eq!(params[5].to_string(), "w[1][1]");
        assert_eq!(params[15].unit(), 3);
    }

    #[test]
    fn get_and_set_round_through_storage() {
        let mut net = sample();
        for (i, p) in net.parameters().into_iter().enumerate() {
            net.set(p, i as f64);
        }
        assert_eq!(net.w[(1, 2)], 6.0);
        assert_eq!(net.u[3], 11.0);
        assert_eq!(net.get(Parameter::OutputWeight { unit: 0 }), 12.0);
    }

    #[test]
    fn input_jets_match_finite_differences() {
        let net = sample();
        let point = [0.3, 0.8];
        let h = 1e-4;
        for axis in 0..2 {
            let jet = summed::<SecondOrder>(&net, &point, axis);
            let mut plus = point;
            let mut minus = point;
            plus[axis] += h;
            minus[axis] -= h;
            let (fp, f0, fm) = (net.output(&plus), net.output(&point), net.output(&minus));
            assert_abs_diff_eq!(jet.val, f0, epsilon = 1e-14);
            assert_abs_diff_eq!(jet.d1, (fp - fm) / (2.0 * h), epsilon = 1e-7);
            assert_abs_diff_eq!(jet.d2, (fp - 2.0 * f0 + fm) / (h * h), epsilon = 1e-4);

            let first = summed::<FirstOrder>(&net, &point, axis);
            assert_abs_diff_eq!(first.eps, jet.d1, epsilon = 1e-14);
        }
    }

    #[test]
    fn seeded_output_matches_parameter_differences() {
        let net = sample();
        let point = [0.45, 0.2];
        let h = 1e-4;
        let axis = 1;
        let terms = net.unit_terms::<SecondOrder>(&point, axis);
        let total = summed::<SecondOrder>(&net, &point, axis);
        for parameter in net.parameters() {
            let jet = net.seeded_output::<SecondOrder>(&point, axis, &total, &terms, parameter);
            let shifted = |delta: f64| {
                let mut n = net.clone();
                n.set(parameter, net.get(parameter) + delta);
                summed::<SecondOrder>(&n, &point, axis)
            };
            let (plus, minus) = (shifted(h), shifted(-h));
            // value, ∂/∂x and ∂²/∂x², each differentiated once in the parameter
            assert_abs_diff_eq!(jet.val.d1, (plus.val - minus.val) / (2.0 * h), epsilon = 1e-7);
            assert_abs_diff_eq!(jet.d1.d1, (plus.d1 - minus.d1) / (2.0 * h), epsilon = 1e-7);
            assert_abs_diff_eq!(jet.d2.d1, (plus.d2 - minus.d2) / (2.0 * h), epsilon = 1e-7);
            assert_abs_diff_eq!(
                jet.d2.d2,
                (plus.d2 - 2.0 * total.d2 + minus.d2) / (h * h),
                epsilon = 1e-4
            );
            assert_abs_diff_eq!(jet.val.val, total.val, epsilon = 1e-14);
        }
    }
}
