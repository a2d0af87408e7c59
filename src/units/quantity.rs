use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::ops::{
    Add,
    Div,
    Mul,
    Neg,
    Sub
};

use chrono::TimeDelta;

use crate::units::value::Value;

/// Marker for a physical unit.
pub trait Unit: Copy + Send + Sync + 'static {
    const SYMBOL: &'static str;

    /// Magnitude substituted for infinity on this axis.
    fn boundary() -> f64 {
        f64::INFINITY
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Second;

#[derive(Clone, Copy, Debug)]
pub struct Hertz;

#[derive(Clone, Copy, Debug)]
pub struct Watt;

#[derive(Clone, Copy, Debug)]
pub struct Meter;

#[derive(Clone, Copy, Debug)]
pub struct Radian;

impl Unit for Second {
    const SYMBOL: &'static str = "s";

    // Keeps shifted and summed time coordinates away from overflow.
    fn boundary() -> f64 {
        TimeDelta::MAX.num_seconds() as f64 / 2.0
    }
}

impl Unit for Hertz {
    const SYMBOL: &'static str = "Hz";
}

impl Unit for Watt {
    const SYMBOL: &'static str = "W";
}

impl Unit for Meter {
    const SYMBOL: &'static str = "m";
}

impl Unit for Radian {
    const SYMBOL: &'static str = "rad";
}

/// A real number tagged with a unit at the type level.
pub struct Quantity<U: Unit> {
    raw: f64,
    unit: PhantomData<U>
}

pub type Time = Quantity<Second>;
pub type Frequency = Quantity<Hertz>;
pub type Power = Quantity<Watt>;
pub type Distance = Quantity<Meter>;
pub type Angle = Quantity<Radian>;

impl<U: Unit> Quantity<U> {
    pub const fn new(raw: f64) -> Quantity<U> {
        Quantity { raw, unit: PhantomData }
    }

    pub fn raw(&self) -> f64 {
        self.raw
    }
}

impl<U: Unit> Clone for Quantity<U> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<U: Unit> Copy for Quantity<U> {}

impl<U: Unit> fmt::Debug for Quantity<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {}", self.raw, U::SYMBOL)
    }
}

impl<U: Unit> fmt::Display for Quantity<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.raw, U::SYMBOL)
    }
}

impl<U: Unit> PartialEq for Quantity<U> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<U: Unit> PartialOrd for Quantity<U> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.raw.partial_cmp(&other.raw)
    }
}

impl<U: Unit> Add for Quantity<U> {
    type Output = Quantity<U>;

    fn add(self, rhs: Self) -> Self::Output {
        Quantity::new(self.raw + rhs.raw)
    }
}

impl<U: Unit> Sub for Quantity<U> {
    type Output = Quantity<U>;

    fn sub(self, rhs: Self) -> Self::Output {
        Quantity::new(self.raw - rhs.raw)
    }
}

impl<U: Unit> Neg for Quantity<U> {
    type Output = Quantity<U>;

    fn neg(self) -> Self::Output {
        Quantity::new(-self.raw)
    }
}

impl<U: Unit> Mul<f64> for Quantity<U> {
    type Output = Quantity<U>;

    fn mul(self, rhs: f64) -> Self::Output {
        Quantity::new(self.raw * rhs)
    }
}

impl<U: Unit> Div<f64> for Quantity<U> {
    type Output = Quantity<U>;

    fn div(self, rhs: f64) -> Self::Output {
        Quantity::new(self.raw / rhs)
    }
}

impl<U: Unit> Div for Quantity<U> {
    type Output = f64;

    fn div(self, rhs: Self) -> f64 {
        self.raw / rhs.raw
    }
}

impl<U: Unit> Value for Quantity<U> {
    fn from_f64(raw: f64) -> Self {
        Quantity::new(raw)
    }

    fn to_f64(&self) -> f64 {
        self.raw
    }

    fn lower_bound() -> Self {
        Quantity::new(-U::boundary())
    }

    fn upper_bound() -> Self {
        Quantity::new(U::boundary())
    }
}

impl From<TimeDelta> for Time {
    fn from(delta: TimeDelta) -> Time {
        let nanos = delta.subsec_nanos() as f64 / 1e9;
        Quantity::new(delta.num_seconds() as f64 + nanos)
    }
}
