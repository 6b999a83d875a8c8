//! Forward-mode jets specialised to one hidden layer with a smooth activation.
//!
//! A jet carries a value together with its derivatives along one direction.
//! Jets nest: an input jet whose coefficients are parameter jets carries the
//! mixed input/parameter derivatives the trainer needs, e.g.
//! `Jet2<Jet2<f64>>` holds `∂ᵃ/∂xᵃ ∂ᵇ/∂pᵇ` for `a, b ∈ {0, 1, 2}`.
use crate::traits::Scalar;
use num_traits::{One, Zero};
use std::fmt::Debug;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// Simple Dual Number for Forward Mode AD
/// val: real part
/// eps: first derivative along the seeded direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dual<T> {
    pub val: T,
    pub eps: T,
}

impl<T: Scalar> Dual<T> {
    pub fn new(val: T, eps: T) -> Self {
        Self { val, eps }
    }
}

impl<T: Scalar> Zero for Dual<T> {
    fn zero() -> Self {
        Self::new(T::zero(), T::zero())
    }
    fn is_zero(&self) -> bool {
        self.val.is_zero() && self.eps.is_zero()
    }
}

impl<T: Scalar> One for Dual<T> {
    fn one() -> Self {
        Self::new(T::one(), T::zero())
    }
}

impl<T: Scalar> Add for Dual<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.val + rhs.val, self.eps + rhs.eps)
    }
}

impl<T: Scalar> Sub for Dual<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.val - rhs.val, self.eps - rhs.eps)
    }
}

impl<T: Scalar> Mul for Dual<T> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::new(self.val * rhs.val, self.val * rhs.eps + self.eps * rhs.val)
    }
}

impl<T: Scalar> Neg for Dual<T> {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.val, -self.eps)
    }
}

impl<T: Scalar> AddAssign for Dual<T> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Scalar> Scalar for Dual<T> {
    fn from_f64(value: f64) -> Self {
        Self::new(T::from_f64(value), T::zero())
    }

    fn scale(self, factor: f64) -> Self {
        Self::new(self.val.scale(factor), self.eps.scale(factor))
    }

    fn sigmoid_derivative(self, order: usize) -> Self {
        Self::new(
            self.val.sigmoid_derivative(order),
            self.val.sigmoid_derivative(order + 1) * self.eps,
        )
    }

    fn real(self) -> f64 {
        self.val.real()
    }
}

/// Second-order jet: value, first and second derivative along one direction.
///
/// `d2` is the derivative itself, not the Taylor coefficient `d2 / 2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jet2<T> {
    pub val: T,
    pub d1: T,
    pub d2: T,
}

impl<T: Scalar> Jet2<T> {
    pub fn new(val: T, d1: T, d2: T) -> Self {
        Self { val, d1, d2 }
    }
}

impl<T: Scalar> Zero for Jet2<T> {
    fn zero() -> Self {
        Self::new(T::zero(), T::zero(), T::zero())
    }
    fn is_zero(&self) -> bool {
        self.val.is_zero() && self.d1.is_zero() && self.d2.is_zero()
    }
}

impl<T: Scalar> One for Jet2<T> {
    fn one() -> Self {
        Self::new(T::one(), T::zero(), T::zero())
    }
}

impl<T: Scalar> Add for Jet2<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.val + rhs.val, self.d1 + rhs.d1, self.d2 + rhs.d2)
    }
}

impl<T: Scalar> Sub for Jet2<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.val - rhs.val, self.d1 - rhs.d1, self.d2 - rhs.d2)
    }
}

impl<T: Scalar> Mul for Jet2<T> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        // Leibniz: (ab)'' = a''b + 2a'b' + ab''
        Self::new(
            self.val * rhs.val,
            self.val * rhs.d1 + self.d1 * rhs.val,
            self.val * rhs.d2 + (self.d1 * rhs.d1).scale(2.0) + self.d2 * rhs.val,
        )
    }
}

impl<T: Scalar> Neg for Jet2<T> {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.val, -self.d1, -self.d2)
    }
}

impl<T: Scalar> AddAssign for Jet2<T> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Scalar> Scalar for Jet2<T> {
    fn from_f64(value: f64) -> Self {
        Self::new(T::from_f64(value), T::zero(), T::zero())
    }

    fn scale(self, factor: f64) -> Self {
        Self::new(
            self.val.scale(factor),
            self.d1.scale(factor),
            self.d2.scale(factor),
        )
    }

    fn sigmoid_derivative(self, order: usize) -> Self {
        // Faà di Bruno truncated at second order:
        // (f∘g)'  = f'(g) g'
        // (f∘g)'' = f''(g) g'^2 + f'(g) g''
        let s1 = self.val.sigmoid_derivative(order + 1);
        Self::new(
            self.val.sigmoid_derivative(order),
            s1 * self.d1,
            self.val.sigmoid_derivative(order + 2) * self.d1 * self.d1 + s1 * self.d2,
        )
    }

    fn real(self) -> f64 {
        self.val.real()
    }
}

/// Jet along one input direction, with coefficients of type `T`.
pub trait InputJet<T: Scalar>: Scalar {
    /// Highest input derivative carried.
    const ORDER: usize;

    /// Builds a jet from its value and derivatives; parts above `ORDER` are dropped.
    fn from_parts(value: T, first: T, second: T) -> Self;

    fn value(&self) -> T;
    fn first(&self) -> T;
    /// Zero for first-order jets.
    fn second(&self) -> T;

    fn constant(value: T) -> Self {
        Self::from_parts(value, T::zero(), T::zero())
    }

    /// The coordinate itself: unit first derivative.
    fn variable(value: T) -> Self {
        Self::from_parts(value, T::one(), T::zero())
    }
}

impl<T: Scalar> InputJet<T> for Dual<T> {
    const ORDER: usize = 1;

    fn from_parts(value: T, first: T, _second: T) -> Self {
        Self::new(value, first)
    }
    fn value(&self) -> T {
        self.val
    }
    fn first(&self) -> T {
        self.eps
    }
    fn second(&self) -> T {
        T::zero()
    }
}

impl<T: Scalar> InputJet<T> for Jet2<T> {
    const ORDER: usize = 2;

    fn from_parts(value: T, first: T, second: T) -> Self {
        Self::new(value, first, second)
    }
    fn value(&self) -> T {
        self.val
    }
    fn first(&self) -> T {
        self.d1
    }
    fn second(&self) -> T {
        self.d2
    }
}

/// Jet along one trainable parameter. Value, `∂/∂p`, `∂²/∂p²`.
pub type ParamJet = Jet2<f64>;

impl ParamJet {
    /// A parameter seeded as the differentiation variable.
    pub fn seeded(value: f64) -> Self {
        Self::new(value, 1.0, 0.0)
    }

    /// A parameter held fixed.
    pub fn fixed(value: f64) -> Self {
        Self::new(value, 0.0, 0.0)
    }
}

/// Selects how many input derivatives an equation class needs.
///
/// The jet type is fixed at compile time, so first-order problems never
/// carry second input derivatives or touch `σ''''`.
pub trait InputOrder: Copy + Debug + Default + 'static {
    type Jet<T: Scalar>: InputJet<T>;

    const ORDER: usize;

    /// Re-embeds a jet over plain values into a jet over `T`, treating every
    /// coefficient as a constant of `T`.
    fn lift<T: Scalar>(jet: &Self::Jet<f64>) -> Self::Jet<T> {
        <Self::Jet<T> as InputJet<T>>::from_parts(
            T::from_f64(jet.value()),
            T::from_f64(jet.first()),
            T::from_f64(jet.second()),
        )
    }
}

/// `∂/∂x_j` only.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstOrder;

/// `∂/∂x_j` and `∂²/∂x_j²`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecondOrder;

impl InputOrder for FirstOrder {
    type Jet<T: Scalar> = Dual<T>;
    const ORDER: usize = 1;
}

impl InputOrder for SecondOrder {
    type Jet<T: Scalar> = Jet2<T>;
    const ORDER: usize = 2;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation;
    use approx::assert_abs_diff_eq;

    #[test]
    fn dual_product_rule() {
        let a = Dual::new(3.0, 1.0);
        let b = Dual::new(2.0, 0.0);
        let c = a * a * b;
        assert_eq!(c.val, 18.0);
        assert_eq!(c.eps, 12.0);
    }

    #[test]
    fn jet2_product_carries_second_derivative() {
        // x^3 at x = 2: 8, 12, 12
        let x = Jet2::<f64>::variable(2.0);
        let c = x * x * x;
        assert_eq!(c.val, 8.0);
        assert_eq!(c.d1, 12.0);
        assert_eq!(c.d2, 12.0);
    }

    #[test]
    fn jet2_sigmoid_of_affine_map() {
        // σ(a x + b): first derivative a σ', second a² σ''
        let (a, b, x0) = (0.7, -0.2, 0.4);
        let x = Jet2::<f64>::variable(x0);
        let z = x * Jet2::constant(a) + Jet2::constant(b);
        let s = z.sigmoid();
        let z0 = a * x0 + b;
        assert_abs_diff_eq!(s.val, activation::derivative(0, z0), epsilon = 1e-15);
        assert_abs_diff_eq!(s.d1, a * activation::derivative(1, z0), epsilon = 1e-15);
        assert_abs_diff_eq!(s.d2, a * a * activation::derivative(2, z0), epsilon = 1e-15);
    }

    #[test]
    fn nested_jets_give_mixed_partials() {
        // f(x, w) = σ(w x); ∂²f/∂x∂w = σ' + w x σ''
        let (x0, w0) = (0.3, -1.1);
        let x = Jet2::<ParamJet>::variable(ParamJet::fixed(x0));
        let w = Jet2::<ParamJet>::constant(ParamJet::seeded(w0));
        let f = (w * x).sigmoid();
        let z = w0 * x0;
        let s: Vec<f64> = (0..=activation::MAX_ORDER)
            .map(|order| activation::derivative(order, z))
            .collect();

        assert_abs_diff_eq!(f.val.val, s[0], epsilon = 1e-15);
        assert_abs_diff_eq!(f.val.d1, x0 * s[1], epsilon = 1e-15);
        assert_abs_diff_eq!(f.val.d2, x0 * x0 * s[2], epsilon = 1e-15);
        assert_abs_diff_eq!(f.d1.val, w0 * s[1], epsilon = 1e-15);
        assert_abs_diff_eq!(f.d1.d1, s[1] + w0 * x0 * s[2], epsilon = 1e-15);
        assert_abs_diff_eq!(f.d2.val, w0 * w0 * s[2], epsilon = 1e-15);
        // ∂⁴f/∂x²∂w² = 2σ'' + 4 w x σ''' + w² x² σ''''
        assert_abs_diff_eq!(
            f.d2.d2,
            2.0 * s[2] + 4.0 * w0 * x0 * s[3] + w0 * w0 * x0 * x0 * s[4],
            epsilon = 1e-14
        );
    }

    #[test]
    fn first_order_jets_drop_second_parts() {
        let j = <Dual<f64> as InputJet<f64>>::from_parts(1.0, 2.0, 3.0);
        assert_eq!(j.second(), 0.0);
        let lifted = FirstOrder::lift::<ParamJet>(&j);
        assert_eq!(lifted.val, ParamJet::fixed(1.0));
        assert_eq!(lifted.eps, ParamJet::fixed(2.0));
    }

    #[test]
    fn scale_and_negation() {
        let j = Jet2::new(1.0, -2.0, 4.0).scale(0.5);
        assert_eq!(j, Jet2::new(0.5, -1.0, 2.0));
        assert_eq!(-j, Jet2::new(-0.5, 1.0, -2.0));
        assert!(Jet2::<f64>::zero().is_zero());
    }
}
