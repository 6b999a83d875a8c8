//! Adapters from each equation class to the common training contract.
use crate::boundary::{
    DirichletInterval, DirichletSquare, InitialValue, InitialValueAndSlope, TrialConstruction,
};
use crate::equation::{
    Endpoint, FirstOrderOde, PdeState, SecondOrderConditions, SecondOrderOde, SecondOrderPde,
};
use crate::error::{NndeError, Result};
use crate::jet::{FirstOrder, InputOrder, ParamJet, SecondOrder};
use crate::trial::Evaluation;

/// Residual `G` at one point with its partials in every trial slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidualPartials {
    pub residual: f64,
    /// `∂G/∂Y`
    pub d_value: f64,
    /// `∂G/∂(∂Y/∂x_j)`
    pub d_gradient: Vec<f64>,
    /// `∂G/∂(∂²Y/∂x_j²)`, empty for first-order equations.
    pub d_curvature: Vec<f64>,
    /// `∂²G/∂Y²`
    pub d2_value: f64,
    /// `∂²G/∂(∂Y/∂x_j)²`
    pub d2_gradient: Vec<f64>,
}

impl ResidualPartials {
    /// `(dG/dp, d²G/dp²)` from the trial sensitivities to one parameter.
    ///
    /// Mixed slot curvature (`∂²G/∂Y∂Y'` and friends) is not carried.
    pub fn chain(&self, trial: &Evaluation<ParamJet>) -> (f64, f64) {
        let y = trial.value;
        let mut first = self.d_value * y.d1;
        let mut second = self.d_value * y.d2 + self.d2_value * y.d1 * y.d1;
        for ((d, &g), &gg) in trial
            .gradient
            .iter()
            .zip(&self.d_gradient)
            .zip(&self.d2_gradient)
        {
            first += g * d.d1;
            second += g * d.d2 + gg * d.d1 * d.d1;
        }
        for (h, &g) in trial.curvature.iter().zip(&self.d_curvature) {
            first += g * h.d1;
            second += g * h.d2;
        }
        (first, second)
    }
}

/// One equation class bound to its trial construction.
pub trait Formulation {
    type Order: InputOrder;

    fn construction(&self) -> &dyn TrialConstruction;

    fn partials(&self, point: &[f64], trial: &Evaluation) -> ResidualPartials;

    fn analytical(&self, point: &[f64]) -> Option<Evaluation>;
}

pub struct FirstOrderFormulation<'a> {
    ode: &'a dyn FirstOrderOde,
    construction: InitialValue,
}

impl<'a> FirstOrderFormulation<'a> {
    pub fn new(ode: &'a dyn FirstOrderOde) -> Result<Self> {
        let (min, max) = ode.domain();
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(NndeError::InvalidBoundary(format!(
                "domain [{}, {}] is empty or not finite",
                min, max
            )));
        }
        let condition = ode.condition();
        let at = match condition.end {
            Endpoint::Min => min,
            Endpoint::Max => max,
        };
        Ok(Self {
            ode,
            construction: InitialValue::new(at, condition.value)?,
        })
    }
}

impl Formulation for FirstOrderFormulation<'_> {
    type Order = FirstOrder;

    fn construction(&self) -> &dyn TrialConstruction {
        &self.construction
    }

    fn partials(&self, point: &[f64], trial: &Evaluation) -> ResidualPartials {
        let (x, y, dy) = (point[0], trial.value, trial.gradient[0]);
        ResidualPartials {
            residual: self.ode.residual(x, y, dy),
            d_value: self.ode.d_residual_dy(x, y, dy),
            d_gradient: vec![self.ode.d_residual_ddy(x, y, dy)],
            d_curvature: Vec::new(),
            d2_value: self.ode.d2_residual_dy2(x, y, dy),
            d2_gradient: vec![self.ode.d2_residual_ddy2(x, y, dy)],
        }
    }

    fn analytical(&self, point: &[f64]) -> Option<Evaluation> {
        self.ode.analytical(point[0])
    }
}

pub struct SecondOrderFormulation<'a> {
    ode: &'a dyn SecondOrderOde,
    construction: Box<dyn TrialConstruction>,
}

impl<'a> SecondOrderFormulation<'a> {
    pub fn new(ode: &'a dyn SecondOrderOde) -> Result<Self> {
        let construction: Box<dyn TrialConstruction> = match ode.conditions() {
            SecondOrderConditions::Initial { value, slope } => {
                Box::new(InitialValueAndSlope::new(value, slope)?)
            }
            SecondOrderConditions::Dirichlet { left, right } => {
                Box::new(DirichletInterval::new(left, right)?)
            }
        };
        Ok(Self { ode, construction })
    }
}

impl Formulation for SecondOrderFormulation<'_> {
    type Order = SecondOrder;

    fn construction(&self) -> &dyn TrialConstruction {
        self.construction.as_ref()
    }

    fn partials(&self, point: &[f64], trial: &Evaluation) -> ResidualPartials {
        let (x, y, dy, d2y) = (point[0], trial.value, trial.gradient[0], trial.curvature[0]);
        ResidualPartials {
            residual: self.ode.residual(x, y, dy, d2y),
            d_value: self.ode.d_residual_dy(x, y, dy, d2y),
            d_gradient: vec![self.ode.d_residual_ddy(x, y, dy, d2y)],
            d_curvature: vec![self.ode.d_residual_dd2y(x, y, dy, d2y)],
            d2_value: self.ode.d2_residual_dy2(x, y, dy, d2y),
            d2_gradient: vec![self.ode.d2_residual_ddy2(x, y, dy, d2y)],
        }
    }

    fn analytical(&self, point: &[f64]) -> Option<Evaluation> {
        self.ode.analytical(point[0])
    }
}

pub struct PdeFormulation<'a> {
    pde: &'a dyn SecondOrderPde,
    construction: DirichletSquare,
}

impl<'a> PdeFormulation<'a> {
    pub fn new(pde: &'a dyn SecondOrderPde) -> Result<Self> {
        let [west, east, south, north] = pde.boundary();
        Ok(Self {
            pde,
            construction: DirichletSquare::new(west, east, south, north)?,
        })
    }
}

impl Formulation for PdeFormulation<'_> {
    type Order = SecondOrder;

    fn construction(&self) -> &dyn TrialConstruction {
        &self.construction
    }

    fn partials(&self, point: &[f64], trial: &Evaluation) -> ResidualPartials {
        let state = PdeState {
            point: [point[0], point[1]],
            value: trial.value,
            gradient: [trial.gradient[0], trial.gradient[1]],
            curvature: [trial.curvature[0], trial.curvature[1]],
        };
        ResidualPartials {
            residual: self.pde.residual(&state),
            d_value: self.pde.d_residual_dvalue(&state),
            d_gradient: self.pde.d_residual_dgradient(&state).to_vec(),
            d_curvature: self.pde.d_residual_dcurvature(&state).to_vec(),
            d2_value: self.pde.d2_residual_dvalue2(&state),
            d2_gradient: self.pde.d2_residual_dgradient2(&state).to_vec(),
        }
    }

    fn analytical(&self, point: &[f64]) -> Option<Evaluation> {
        self.pde.analytical([point[0], point[1]])
    }
}
