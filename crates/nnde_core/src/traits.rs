use num_traits::{One, Zero};
use std::fmt::Debug;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use crate::activation;

/// A trait for the number types flowing through the network evaluation:
/// plain `f64` and the jets built on top of it.
/// Must support ring arithmetic, lifting a constant, and the sigmoid tower.
pub trait Scalar:
    Copy
    + Debug
    + PartialEq
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + 'static
{
    /// Lifts a constant into this type (all derivative parts zero).
    fn from_f64(value: f64) -> Self;

    /// Multiplies every component by a plain factor.
    fn scale(self, factor: f64) -> Self;

    /// Applies the `order`-th derivative of the logistic sigmoid.
    fn sigmoid_derivative(self, order: usize) -> Self;

    /// The underlying real value, with every derivative part dropped.
    fn real(self) -> f64;

    fn sigmoid(self) -> Self {
        self.sigmoid_derivative(0)
    }
}

impl Scalar for f64 {
    fn from_f64(value: f64) -> Self {
        value
    }

    fn scale(self, factor: f64) -> Self {
        self * factor
    }

    fn sigmoid_derivative(self, order: usize) -> Self {
        activation::derivative(order, self)
    }

    fn real(self) -> f64 {
        self
    }
}
