//! Built-in problems with known analytical solutions.
use crate::boundary::BoundaryFn;
use crate::equation::{
    Endpoint, EndpointValue, FirstOrderOde, PdeState, SecondOrderConditions, SecondOrderOde,
    SecondOrderPde,
};
use crate::problem::Problem;
use crate::trial::Evaluation;

fn ode_point(value: f64, slope: f64, curvature: Option<f64>) -> Evaluation {
    Evaluation {
        value,
        gradient: vec![slope],
        curvature: curvature.into_iter().collect(),
    }
}

/// `y' = 1 - y`, `y(0) = 0` on `[0, 1]`. Solution `1 - e^{-x}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Relaxation;

impl FirstOrderOde for Relaxation {
    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    fn condition(&self) -> EndpointValue {
        EndpointValue {
            end: Endpoint::Min,
            value: 0.0,
        }
    }

    fn residual(&self, _x: f64, y: f64, dy: f64) -> f64 {
        dy - 1.0 + y
    }

    fn d_residual_dy(&self, _x: f64, _y: f64, _dy: f64) -> f64 {
        1.0
    }

    fn d_residual_ddy(&self, _x: f64, _y: f64, _dy: f64) -> f64 {
        1.0
    }

    fn analytical(&self, x: f64) -> Option<Evaluation> {
        let e = (-x).exp();
        Some(ode_point(1.0 - e, e, Some(-e)))
    }
}

/// `y' = sqrt(1 - y²)`, `y(0) = 0` on `[0, 1]`. Solution `sin x`.
///
/// The residual is undefined for `|y| > 1`; a trial function straying there
/// surfaces as a non-finite update.
#[derive(Debug, Clone, Copy, Default)]
pub struct CircularArc;

impl FirstOrderOde for CircularArc {
    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    fn condition(&self) -> EndpointValue {
        EndpointValue {
            end: Endpoint::Min,
            value: 0.0,
        }
    }

    fn residual(&self, _x: f64, y: f64, dy: f64) -> f64 {
        dy - (1.0 - y * y).sqrt()
    }

    fn d_residual_dy(&self, _x: f64, y: f64, _dy: f64) -> f64 {
        y / (1.0 - y * y).sqrt()
    }

    fn d_residual_ddy(&self, _x: f64, _y: f64, _dy: f64) -> f64 {
        1.0
    }

    fn d2_residual_dy2(&self, _x: f64, y: f64, _dy: f64) -> f64 {
        (1.0 - y * y).powf(-1.5)
    }

    fn analytical(&self, x: f64) -> Option<Evaluation> {
        Some(ode_point(x.sin(), x.cos(), Some(-x.sin())))
    }
}

/// Lagaris et al. problem 1:
/// `y' + (x + (1 + 3x²)/(1 + x + x³))·y = x³ + 2x + x²(1 + 3x²)/(1 + x + x³)`,
/// `y(0) = 1` on `[0, 1]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lagaris01;

impl Lagaris01 {
    fn ratio(x: f64) -> f64 {
        (1.0 + 3.0 * x * x) / (1.0 + x + x.powi(3))
    }

    fn coefficient(x: f64) -> f64 {
        x + Self::ratio(x)
    }

    fn forcing(x: f64) -> f64 {
        x.powi(3) + 2.0 * x + x * x * Self::ratio(x)
    }
}

impl FirstOrderOde for Lagaris01 {
    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    fn condition(&self) -> EndpointValue {
        EndpointValue {
            end: Endpoint::Min,
            value: 1.0,
        }
    }

    fn residual(&self, x: f64, y: f64, dy: f64) -> f64 {
        dy + Self::coefficient(x) * y - Self::forcing(x)
    }

    fn d_residual_dy(&self, x: f64, _y: f64, _dy: f64) -> f64 {
        Self::coefficient(x)
    }

    fn d_residual_ddy(&self, _x: f64, _y: f64, _dy: f64) -> f64 {
        1.0
    }

    fn analytical(&self, x: f64) -> Option<Evaluation> {
        let y = (-x * x / 2.0).exp() / (1.0 + x + x.powi(3)) + x * x;
        let slope = Self::forcing(x) - Self::coefficient(x) * y;
        Some(ode_point(y, slope, None))
    }
}

/// Lagaris et al. problem 3 as an initial value problem:
/// `y'' + y'/5 + y = -e^{-x/5}·cos(x)/5`, `y(0) = 0`, `y'(0) = 1`.
/// Solution `e^{-x/5}·sin x`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DampedOscillator;

impl SecondOrderOde for DampedOscillator {
    fn conditions(&self) -> SecondOrderConditions {
        SecondOrderConditions::Initial {
            value: 0.0,
            slope: 1.0,
        }
    }

    fn residual(&self, x: f64, y: f64, dy: f64, d2y: f64) -> f64 {
        d2y + dy / 5.0 + y + (-x / 5.0).exp() * x.cos() / 5.0
    }

    fn d_residual_dy(&self, _x: f64, _y: f64, _dy: f64, _d2y: f64) -> f64 {
        1.0
    }

    fn d_residual_ddy(&self, _x: f64, _y: f64, _dy: f64, _d2y: f64) -> f64 {
        0.2
    }

    fn d_residual_dd2y(&self, _x: f64, _y: f64, _dy: f64, _d2y: f64) -> f64 {
        1.0
    }

    fn analytical(&self, x: f64) -> Option<Evaluation> {
        let e = (-x / 5.0).exp();
        let (s, c) = x.sin_cos();
        Some(ode_point(
            e * s,
            e * (c - s / 5.0),
            Some(-2.0 * (12.0 * s + 5.0 * c) * e / 25.0),
        ))
    }
}

/// `y'' - y' + 2x - 1 = 0`, `y(0) = 1`, `y(1) = 3`. Solution `x² + x + 1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuadraticBvp;

impl SecondOrderOde for QuadraticBvp {
    fn conditions(&self) -> SecondOrderConditions {
        SecondOrderConditions::Dirichlet {
            left: 1.0,
            right: 3.0,
        }
    }

    fn residual(&self, x: f64, _y: f64, dy: f64, d2y: f64) -> f64 {
        d2y - dy + 2.0 * x - 1.0
    }

    fn d_residual_dy(&self, _x: f64, _y: f64, _dy: f64, _d2y: f64) -> f64 {
        0.0
    }

    fn d_residual_ddy(&self, _x: f64, _y: f64, _dy: f64, _d2y: f64) -> f64 {
        -1.0
    }

    fn d_residual_dd2y(&self, _x: f64, _y: f64, _dy: f64, _d2y: f64) -> f64 {
        1.0
    }

    fn analytical(&self, x: f64) -> Option<Evaluation> {
        Some(ode_point(x * x + x + 1.0, 2.0 * x + 1.0, Some(2.0)))
    }
}

/// Laplace's equation with the Dirichlet data of `Y = 1 + x + 2y + 3xy`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BilinearLaplace;

impl SecondOrderPde for BilinearLaplace {
    fn boundary(&self) -> [BoundaryFn; 4] {
        [
            BoundaryFn::linear(1.0, 2.0),
            BoundaryFn::linear(2.0, 5.0),
            BoundaryFn::linear(1.0, 1.0),
            BoundaryFn::linear(3.0, 4.0),
        ]
    }

    fn residual(&self, state: &PdeState) -> f64 {
        state.curvature[0] + state.curvature[1]
    }

    fn d_residual_dvalue(&self, _state: &PdeState) -> f64 {
        0.0
    }

    fn d_residual_dgradient(&self, _state: &PdeState) -> [f64; 2] {
        [0.0, 0.0]
    }

    fn d_residual_dcurvature(&self, _state: &PdeState) -> [f64; 2] {
        [1.0, 1.0]
    }

    fn analytical(&self, [x, y]: [f64; 2]) -> Option<Evaluation> {
        Some(Evaluation {
            value: 1.0 + x + 2.0 * y + 3.0 * x * y,
            gradient: vec![1.0 + 3.0 * y, 2.0 + 3.0 * x],
            curvature: vec![0.0, 0.0],
        })
    }
}

/// Lagaris et al. problem 5: `∇²Y = e^{-x}(x - 2 + y³ + 6y)` on the unit
/// square. Solution `e^{-x}(x + y³)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lagaris05;

impl SecondOrderPde for Lagaris05 {
    fn boundary(&self) -> [BoundaryFn; 4] {
        let e1 = (-1.0f64).exp();
        [
            BoundaryFn::new(|y| y.powi(3), |y| 3.0 * y * y, |y| 6.0 * y),
            BoundaryFn::new(
                move |y| e1 * (1.0 + y.powi(3)),
                move |y| 3.0 * e1 * y * y,
                move |y| 6.0 * e1 * y,
            ),
            BoundaryFn::new(
                |x| x * (-x).exp(),
                |x| (1.0 - x) * (-x).exp(),
                |x| (x - 2.0) * (-x).exp(),
            ),
            BoundaryFn::new(
                |x| (x + 1.0) * (-x).exp(),
                |x| -x * (-x).exp(),
                |x| (x - 1.0) * (-x).exp(),
            ),
        ]
    }

    fn residual(&self, state: &PdeState) -> f64 {
        let [x, y] = state.point;
        state.curvature[0] + state.curvature[1] - (-x).exp() * (x - 2.0 + y.powi(3) + 6.0 * y)
    }

    fn d_residual_dvalue(&self, _state: &PdeState) -> f64 {
        0.0
    }

    fn d_residual_dgradient(&self, _state: &PdeState) -> [f64; 2] {
        [0.0, 0.0]
    }

    fn d_residual_dcurvature(&self, _state: &PdeState) -> [f64; 2] {
        [1.0, 1.0]
    }

    fn analytical(&self, [x, y]: [f64; 2]) -> Option<Evaluation> {
        let e = (-x).exp();
        Some(Evaluation {
            value: e * (x + y.powi(3)),
            gradient: vec![e * (1.0 - x - y.powi(3)), 3.0 * y * y * e],
            curvature: vec![e * (x + y.powi(3) - 2.0), 6.0 * y * e],
        })
    }
}

pub fn relaxation() -> Problem {
    Problem::FirstOrder(Box::new(Relaxation))
}

pub fn circular_arc() -> Problem {
    Problem::FirstOrder(Box::new(CircularArc))
}

pub fn lagaris01() -> Problem {
    Problem::FirstOrder(Box::new(Lagaris01))
}

pub fn damped_oscillator() -> Problem {
    Problem::SecondOrder(Box::new(DampedOscillator))
}

pub fn quadratic_bvp() -> Problem {
    Problem::SecondOrder(Box::new(QuadraticBvp))
}

pub fn bilinear_laplace() -> Problem {
    Problem::Pde(Box::new(BilinearLaplace))
}

pub fn lagaris05() -> Problem {
    Problem::Pde(Box::new(Lagaris05))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::TrainingSet;
    use approx::assert_abs_diff_eq;

    fn all() -> Vec<Problem> {
        vec![
            relaxation(),
            circular_arc(),
            lagaris01(),
            damped_oscillator(),
            quadratic_bvp(),
            bilinear_laplace(),
            lagaris05(),
        ]
    }

    #[test]
    fn every_problem_has_consistent_boundary_data() {
        for problem in all() {
            problem.validate().unwrap();
        }
    }

    #[test]
    fn analytical_solutions_satisfy_their_equations() {
        for problem in all() {
            let points = problem.training_points(6).unwrap();
            for point in points.iter() {
                let residual = problem.analytical_residual(point).unwrap().unwrap();
                assert_abs_diff_eq!(residual, 0.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn lagaris01_solution_meets_initial_value() {
        let exact = Lagaris01.analytical(0.0).unwrap();
        assert_abs_diff_eq!(exact.value, 1.0, epsilon = 1e-15);
    }

    #[test]
    fn pde_solutions_match_their_edge_data() {
        for pde in [&BilinearLaplace as &dyn SecondOrderPde, &Lagaris05] {
            let [west, east, south, north] = pde.boundary();
            for i in 0..=4 {
                let t = i as f64 / 4.0;
                let value = |x: f64, y: f64| pde.analytical([x, y]).unwrap().value;
                assert_abs_diff_eq!(west.value(t), value(0.0, t), epsilon = 1e-14);
                assert_abs_diff_eq!(east.value(t), value(1.0, t), epsilon = 1e-14);
                assert_abs_diff_eq!(south.value(t), value(t, 0.0), epsilon = 1e-14);
                assert_abs_diff_eq!(north.value(t), value(t, 1.0), epsilon = 1e-14);
            }
        }
    }

    #[test]
    fn grids_follow_the_equation_class() {
        assert_eq!(relaxation().training_points(10).unwrap().len(), 10);
        assert_eq!(lagaris05().training_points(5).unwrap().len(), 25);
        assert_eq!(
            quadratic_bvp().training_points(3).unwrap(),
            TrainingSet::unit_interval(3).unwrap()
        );
    }

    #[test]
    fn order_and_dimension_follow_the_equation_class() {
        let shape = |p: Problem| (p.order(), p.dimension());
        assert_eq!(shape(relaxation()), (1, 1));
        assert_eq!(shape(lagaris01()), (1, 1));
        assert_eq!(shape(damped_oscillator()), (2, 1));
        assert_eq!(shape(quadratic_bvp()), (2, 1));
        assert_eq!(shape(bilinear_laplace()), (2, 2));
        assert_eq!(shape(lagaris05()), (2, 2));
    }
}
