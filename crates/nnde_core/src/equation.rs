//! Capability traits for the three supported equation classes.
//!
//! Each trait exposes the residual `G` and its analytic partials with respect
//! to every slot the trial function feeds. Curvature partials default to zero,
//! which is exact for equations linear in that slot.
use crate::boundary::BoundaryFn;
use crate::trial::Evaluation;
use serde::{Deserialize, Serialize};

/// Which end of the domain carries a first-order initial condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Min,
    Max,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EndpointValue {
    pub end: Endpoint,
    pub value: f64,
}

/// `G(x, y, y') = 0` on `[x_min, x_max]`, with `y` prescribed at one end.
pub trait FirstOrderOde: Send + Sync {
    fn domain(&self) -> (f64, f64);

    fn condition(&self) -> EndpointValue;

    fn residual(&self, x: f64, y: f64, dy: f64) -> f64;

    /// `∂G/∂y`
    fn d_residual_dy(&self, x: f64, y: f64, dy: f64) -> f64;

    /// `∂G/∂y'`
    fn d_residual_ddy(&self, x: f64, y: f64, dy: f64) -> f64;

    /// `∂²G/∂y²`
    fn d2_residual_dy2(&self, _x: f64, _y: f64, _dy: f64) -> f64 {
        0.0
    }

    /// `∂²G/∂y'²`
    fn d2_residual_ddy2(&self, _x: f64, _y: f64, _dy: f64) -> f64 {
        0.0
    }

    /// Exact `y` and `y'` at `x`, for validation.
    fn analytical(&self, _x: f64) -> Option<Evaluation> {
        None
    }
}

/// Conditions for a second-order ODE on `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecondOrderConditions {
    /// `y(0)` and `y'(0)`.
    Initial { value: f64, slope: f64 },
    /// `y(0)` and `y(1)`.
    Dirichlet { left: f64, right: f64 },
}

/// `G(x, y, y', y'') = 0` on `[0, 1]`.
pub trait SecondOrderOde: Send + Sync {
    fn conditions(&self) -> SecondOrderConditions;

    fn residual(&self, x: f64, y: f64, dy: f64, d2y: f64) -> f64;

    fn d_residual_dy(&self, x: f64, y: f64, dy: f64, d2y: f64) -> f64;

    fn d_residual_ddy(&self, x: f64, y: f64, dy: f64, d2y: f64) -> f64;

    fn d_residual_dd2y(&self, x: f64, y: f64, dy: f64, d2y: f64) -> f64;

    fn d2_residual_dy2(&self, _x: f64, _y: f64, _dy: f64, _d2y: f64) -> f64 {
        0.0
    }

    fn d2_residual_ddy2(&self, _x: f64, _y: f64, _dy: f64, _d2y: f64) -> f64 {
        0.0
    }

    /// Exact `y`, `y'` and `y''` at `x`.
    fn analytical(&self, _x: f64) -> Option<Evaluation> {
        None
    }
}

/// Local state of a candidate solution of a 2-D PDE at one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdeState {
    pub point: [f64; 2],
    pub value: f64,
    pub gradient: [f64; 2],
    /// `∂²Y/∂x²` and `∂²Y/∂y²`.
    pub curvature: [f64; 2],
}

/// `G(x, Y, ∇Y, ∇²Y) = 0` on the unit square with Dirichlet data.
pub trait SecondOrderPde: Send + Sync {
    /// Edge functions `Y(0, y)`, `Y(1, y)`, `Y(x, 0)`, `Y(x, 1)`.
    fn boundary(&self) -> [BoundaryFn; 4];

    fn residual(&self, state: &PdeState) -> f64;

    /// `∂G/∂Y`
    fn d_residual_dvalue(&self, state: &PdeState) -> f64;

    /// `∂G/∂(∂Y/∂x_j)`
    fn d_residual_dgradient(&self, state: &PdeState) -> [f64; 2];

    /// `∂G/∂(∂²Y/∂x_j²)`
    fn d_residual_dcurvature(&self, state: &PdeState) -> [f64; 2];

    fn d2_residual_dvalue2(&self, _state: &PdeState) -> f64 {
        0.0
    }

    fn d2_residual_dgradient2(&self, _state: &PdeState) -> [f64; 2] {
        [0.0; 2]
    }

    /// Exact `Y`, gradient and Hessian diagonal at `point`.
    fn analytical(&self, _point: [f64; 2]) -> Option<Evaluation> {
        None
    }
}
