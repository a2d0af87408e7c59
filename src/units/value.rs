use std::fmt::{
    Debug,
    Display
};
use std::ops::{
    Add,
    Mul,
    Neg,
    Sub
};

/// Scalar carried by a function value or a domain axis.
///
/// Every value maps onto a plain `f64` so that the closed-form pieces can do
/// their arithmetic on raw numbers, while the typed surface keeps units apart.
pub trait Value:
    Copy
    + PartialOrd
    + Debug
    + Display
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + Mul<f64, Output = Self> {
    fn from_f64(raw: f64) -> Self;

    fn to_f64(&self) -> f64;

    fn zero() -> Self {
        Self::from_f64(0.0)
    }

    /// Smallest representable coordinate or value.
    fn lower_bound() -> Self {
        Self::from_f64(f64::NEG_INFINITY)
    }

    /// Largest representable coordinate or value.
    fn upper_bound() -> Self {
        Self::from_f64(f64::INFINITY)
    }

    fn is_nan(&self) -> bool {
        self.to_f64().is_nan()
    }

    fn is_finite(&self) -> bool {
        self.to_f64().is_finite()
    }
}

impl Value for f64 {
    fn from_f64(raw: f64) -> Self {
        raw
    }

    fn to_f64(&self) -> f64 {
        *self
    }
}

/// Minimum that propagates NaN instead of skipping it.
pub fn min_nan<R: Value>(a: R, b: R) -> R {
    if a.is_nan() {
        a
    } else if b.is_nan() {
        b
    } else if b < a {
        b
    } else {
        a
    }
}

/// Maximum that propagates NaN instead of skipping it.
pub fn max_nan<R: Value>(a: R, b: R) -> R {
    if a.is_nan() {
        a
    } else if b.is_nan() {
        b
    } else if b > a {
        b
    } else {
        a
    }
}

/// Ratio of two values of the same unit.
pub fn ratio<R: Value>(numerator: R, denominator: R) -> f64 {
    numerator.to_f64() / denominator.to_f64()
}
