//! Anchor/envelope decomposition of the trial function.
//!
//! Every construction here yields `Yt = A + P·N`, where the anchor `A`
//! carries the boundary or initial data and the envelope `P` vanishes
//! wherever that data is imposed. The network output `N` is therefore free:
//! `Yt` honours the conditions for every parameter value.
//!
//! Derivatives of `A` and `P` are closed-form. Where a construction depends
//! on boundary functions, the caller supplies their derivatives.
use crate::error::{NndeError, Result};
use crate::jet::InputJet;
use crate::traits::Scalar;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A closed-form function of the input evaluated at one point, with its
/// first and second partial derivative along each input axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedForm {
    pub value: f64,
    pub gradient: Vec<f64>,
    pub curvature: Vec<f64>,
}

impl ClosedForm {
    pub fn new(value: f64, gradient: Vec<f64>, curvature: Vec<f64>) -> Self {
        Self {
            value,
            gradient,
            curvature,
        }
    }

    /// The restriction to input axis `axis`, as a jet with constant
    /// coefficients.
    pub fn along<T: Scalar, X: InputJet<T>>(&self, axis: usize) -> X {
        X::from_parts(
            T::from_f64(self.value),
            T::from_f64(self.gradient[axis]),
            T::from_f64(self.curvature[axis]),
        )
    }
}

/// Builds the anchor and envelope of a trial function.
pub trait TrialConstruction: fmt::Debug + Send + Sync {
    /// Number of input coordinates.
    fn dimension(&self) -> usize;

    /// `A(x)`: satisfies all boundary/initial data, independent of the network.
    fn anchor(&self, point: &[f64]) -> ClosedForm;

    /// `P(x)`: vanishes wherever the data is imposed.
    fn envelope(&self, point: &[f64]) -> ClosedForm;
}

/// `y(at) = value` for a first-order problem: `Yt = value + (x - at)·N`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitialValue {
    pub at: f64,
    pub value: f64,
}

impl InitialValue {
    pub fn new(at: f64, value: f64) -> Result<Self> {
        if !at.is_finite() || !value.is_finite() {
            return Err(NndeError::InvalidBoundary(format!(
                "initial condition y({}) = {} must be finite",
                at, value
            )));
        }
        Ok(Self { at, value })
    }
}

impl TrialConstruction for InitialValue {
    fn dimension(&self) -> usize {
        1
    }

    fn anchor(&self, _point: &[f64]) -> ClosedForm {
        ClosedForm::new(self.value, vec![0.0], vec![0.0])
    }

    fn envelope(&self, point: &[f64]) -> ClosedForm {
        ClosedForm::new(point[0] - self.at, vec![1.0], vec![0.0])
    }
}

/// `y(0) = value`, `y'(0) = slope`: `Yt = value + x·slope + x²·N`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitialValueAndSlope {
    pub value: f64,
    pub slope: f64,
}

impl InitialValueAndSlope {
    pub fn new(value: f64, slope: f64) -> Result<Self> {
        if !value.is_finite() || !slope.is_finite() {
            return Err(NndeError::InvalidBoundary(format!(
                "initial data y(0) = {}, y'(0) = {} must be finite",
                value, slope
            )));
        }
        Ok(Self { value, slope })
    }
}

impl TrialConstruction for InitialValueAndSlope {
    fn dimension(&self) -> usize {
        1
    }

    fn anchor(&self, point: &[f64]) -> ClosedForm {
        let x = point[0];
        ClosedForm::new(self.value + x * self.slope, vec![self.slope], vec![0.0])
    }

    fn envelope(&self, point: &[f64]) -> ClosedForm {
        let x = point[0];
        ClosedForm::new(x * x, vec![2.0 * x], vec![2.0])
    }
}

/// `y(0) = left`, `y(1) = right` on the unit interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirichletInterval {
    pub left: f64,
    pub right: f64,
}

impl DirichletInterval {
    pub fn new(left: f64, right: f64) -> Result<Self> {
        if !left.is_finite() || !right.is_finite() {
            return Err(NndeError::InvalidBoundary(format!(
                "boundary values y(0) = {}, y(1) = {} must be finite",
                left, right
            )));
        }
        Ok(Self { left, right })
    }
}

impl TrialConstruction for DirichletInterval {
    fn dimension(&self) -> usize {
        1
    }

    fn anchor(&self, point: &[f64]) -> ClosedForm {
        let x = point[0];
        ClosedForm::new(
            (1.0 - x) * self.left + x * self.right,
            vec![self.right - self.left],
            vec![0.0],
        )
    }

    fn envelope(&self, point: &[f64]) -> ClosedForm {
        let x = point[0];
        ClosedForm::new(x * (1.0 - x), vec![1.0 - 2.0 * x], vec![-2.0])
    }
}

type ScalarFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// A boundary function of one variable together with its first and second
/// derivatives.
#[derive(Clone)]
pub struct BoundaryFn {
    value: ScalarFn,
    first: ScalarFn,
    second: ScalarFn,
}

impl BoundaryFn {
    pub fn new(
        value: impl Fn(f64) -> f64 + Send + Sync + 'static,
        first: impl Fn(f64) -> f64 + Send + Sync + 'static,
        second: impl Fn(f64) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self {
            value: Arc::new(value),
            first: Arc::new(first),
            second: Arc::new(second),
        }
    }

    /// `a + b·t`.
    pub fn linear(a: f64, b: f64) -> Self {
        Self::new(move |t| a + b * t, move |_| b, |_| 0.0)
    }

    pub fn value(&self, t: f64) -> f64 {
        (self.value)(t)
    }

    pub fn first(&self, t: f64) -> f64 {
        (self.first)(t)
    }

    pub fn second(&self, t: f64) -> f64 {
        (self.second)(t)
    }
}

impl fmt::Debug for BoundaryFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundaryFn")
            .field("at_0", &self.value(0.0))
            .field("at_1", &self.value(1.0))
            .finish()
    }
}

/// Dirichlet data on the four edges of the unit square.
///
/// `west(y) = Y(0, y)`, `east(y) = Y(1, y)`, `south(x) = Y(x, 0)`,
/// `north(x) = Y(x, 1)`. Adjoining edges must agree at the shared corner.
#[derive(Debug, Clone)]
pub struct DirichletSquare {
    west: BoundaryFn,
    east: BoundaryFn,
    south: BoundaryFn,
    north: BoundaryFn,
}

/// Relative tolerance for corner agreement between adjoining edges.
const CORNER_TOLERANCE: f64 = 1e-9;

impl DirichletSquare {
    pub fn new(
        west: BoundaryFn,
        east: BoundaryFn,
        south: BoundaryFn,
        north: BoundaryFn,
    ) -> Result<Self> {
        let corners = [
            ("(0, 0)", west.value(0.0), south.value(0.0)),
            ("(1, 0)", east.value(0.0), south.value(1.0)),
            ("(0, 1)", west.value(1.0), north.value(0.0)),
            ("(1, 1)", east.value(1.0), north.value(1.0)),
        ];
        for (corner, a, b) in corners {
            if !a.is_finite() || !b.is_finite() {
                return Err(NndeError::InvalidBoundary(format!(
                    "boundary data at corner {} is not finite",
                    corner
                )));
            }
            if (a - b).abs() > CORNER_TOLERANCE * a.abs().max(b.abs()).max(1.0) {
                return Err(NndeError::InvalidBoundary(format!(
                    "edges disagree at corner {}: {} vs {}",
                    corner, a, b
                )));
            }
        }
        Ok(Self {
            west,
            east,
            south,
            north,
        })
    }

    /// The bracketed edge term of the blend, `g(x) - (1-x)g(0) - x g(1)`,
    /// which vanishes at both corners of the edge.
    fn edge_excess(edge: &BoundaryFn, x: f64) -> f64 {
        edge.value(x) - (1.0 - x) * edge.value(0.0) - x * edge.value(1.0)
    }
}

impl TrialConstruction for DirichletSquare {
    fn dimension(&self) -> usize {
        2
    }

    fn anchor(&self, point: &[f64]) -> ClosedForm {
        let (x, y) = (point[0], point[1]);
        let (w, e, s, n) = (&self.west, &self.east, &self.south, &self.north);
        let south_excess = Self::edge_excess(s, x);
        let north_excess = Self::edge_excess(n, x);

        let value = (1.0 - x) * w.value(y)
            + x * e.value(y)
            + (1.0 - y) * south_excess
            + y * north_excess;
        let d_dx = -w.value(y)
            + e.value(y)
            + (1.0 - y) * (s.first(x) + s.value(0.0) - s.value(1.0))
            + y * (n.first(x) + n.value(0.0) - n.value(1.0));
        let d_dy = (1.0 - x) * w.first(y) + x * e.first(y) - south_excess + north_excess;
        let d2_dx2 = (1.0 - y) * s.second(x) + y * n.second(x);
        let d2_dy2 = (1.0 - x) * w.second(y) + x * e.second(y);

        ClosedForm::new(value, vec![d_dx, d_dy], vec![d2_dx2, d2_dy2])
    }

    fn envelope(&self, point: &[f64]) -> ClosedForm {
        let (x, y) = (point[0], point[1]);
        let px = x * (1.0 - x);
        let py = y * (1.0 - y);
        ClosedForm::new(
            px * py,
            vec![(1.0 - 2.0 * x) * py, px * (1.0 - 2.0 * y)],
            vec![-2.0 * py, -2.0 * px],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    fn harmonic_square() -> DirichletSquare {
        // Y = e^{-x}(x + y^3)
        let e = |x: f64| (-x).exp();
        DirichletSquare::new(
            BoundaryFn::new(|y| y.powi(3), |y| 3.0 * y * y, |y| 6.0 * y),
            BoundaryFn::new(
                move |y| e(1.0) * (1.0 + y.powi(3)),
                move |y| e(1.0) * 3.0 * y * y,
                move |y| e(1.0) * 6.0 * y,
            ),
            BoundaryFn::new(move |x| x * e(x), move |x| e(x) * (1.0 - x), move |x| e(x) * (x - 2.0)),
            BoundaryFn::new(
                move |x| e(x) * (x + 1.0),
                move |x| -x * e(x),
                move |x| e(x) * (x - 1.0),
            ),
        )
        .expect("corners agree")
    }

    fn exact(x: f64, y: f64) -> f64 {
        (-x).exp() * (x + y.powi(3))
    }

    #[test]
    fn square_anchor_reproduces_edges() {
        let square = harmonic_square();
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            for (x, y) in [(0.0, t), (1.0, t), (t, 0.0), (t, 1.0)] {
                assert_abs_diff_eq!(square.anchor(&[x, y]).value, exact(x, y), epsilon = 1e-14);
                assert_eq!(square.envelope(&[x, y]).value, 0.0);
            }
        }
    }

    fn check_against_differences(field: impl Fn(&[f64]) -> ClosedForm, point: [f64; 2]) {
        let h = 1e-4;
        let closed = field(&point);
        for axis in 0..2 {
            let mut plus = point;
            let mut minus = point;
            plus[axis] += h;
            minus[axis] -= h;
            let (fp, f0, fm) = (field(&plus).value, closed.value, field(&minus).value);
            assert_abs_diff_eq!(closed.gradient[axis], (fp - fm) / (2.0 * h), epsilon = 1e-6);
            assert_abs_diff_eq!(
                closed.curvature[axis],
                (fp - 2.0 * f0 + fm) / (h * h),
                epsilon = 1e-4
            );
        }
    }

    #[test]
    fn square_derivatives_match_finite_differences() {
        let square = harmonic_square();
        for point in [[0.3, 0.7], [0.62, 0.18], [0.5, 0.5]] {
            check_against_differences(|q| square.anchor(q), point);
            check_against_differences(|q| square.envelope(q), point);
        }
    }

    #[test]
    fn mismatched_corners_are_rejected() {
        let err = DirichletSquare::new(
            BoundaryFn::linear(0.0, 0.0),
            BoundaryFn::linear(0.0, 0.0),
            BoundaryFn::linear(0.0, 0.0),
            BoundaryFn::linear(1.0, 0.0),
        )
        .unwrap_err();
        assert!(matches!(err, NndeError::InvalidBoundary(_)));
    }

    #[test]
    fn non_finite_scalar_data_is_rejected() {
        assert!(InitialValue::new(0.0, f64::NAN).is_err());
        assert!(InitialValueAndSlope::new(f64::INFINITY, 0.0).is_err());
        assert!(DirichletInterval::new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn one_dimensional_constructions_pin_their_data() {
        let ivp = InitialValue::new(1.0, 2.5).unwrap();
        assert_eq!(ivp.envelope(&[1.0]).value, 0.0);
        assert_eq!(ivp.anchor(&[1.0]).value, 2.5);

        let slope = InitialValueAndSlope::new(0.5, -1.5).unwrap();
        let (a, p) = (slope.anchor(&[0.0]), slope.envelope(&[0.0]));
        assert_eq!((a.value, a.gradient[0]), (0.5, -1.5));
        assert_eq!((p.value, p.gradient[0]), (0.0, 0.0));

        let bvp = DirichletInterval::new(1.0, 3.0).unwrap();
        assert_eq!(bvp.anchor(&[0.0]).value, 1.0);
        assert_eq!(bvp.anchor(&[1.0]).value, 3.0);
        assert_eq!(bvp.envelope(&[0.0]).value, 0.0);
        assert_eq!(bvp.envelope(&[1.0]).value, 0.0);
    }

    proptest! {
        #[test]
        fn bilinear_data_anchor_is_the_bilinear_function(
            a in -5.0..5.0f64, b in -5.0..5.0f64, c in -5.0..5.0f64, d in -5.0..5.0f64,
            x in 0.0..1.0f64, y in 0.0..1.0f64,
        ) {
            // Y = a + b x + c y + d x y is reproduced exactly by the blend.
            let square = DirichletSquare::new(
                BoundaryFn::linear(a, c),
                BoundaryFn::linear(a + b, c + d),
                BoundaryFn::linear(a, b),
                BoundaryFn::linear(a + c, b + d),
            ).unwrap();
            let anchor = square.anchor(&[x, y]);
            let expected = a + b * x + c * y + d * x * y;
            prop_assert!((anchor.value - expected).abs() < 1e-12);
            prop_assert!((anchor.gradient[0] - (b + d * y)).abs() < 1e-12);
            prop_assert!((anchor.gradient[1] - (c + d * x)).abs() < 1e-12);
            prop_assert!(anchor.curvature[0].abs() < 1e-12);
            prop_assert!(anchor.curvature[1].abs() < 1e-12);
        }
    }
}
