use std::fmt;
use std::marker::PhantomData;

use crate::math::domain::Domain;
use crate::math::function::function::{
    Function,
    PartitionCallback,
    ValueRange,
    integral_of
};
use crate::math::function::matherror::MathError;
use crate::math::function::primitive::Primitive;
use crate::math::interval::Interval;
use crate::math::point::Point;
use crate::units::value::Value;

/// The same value everywhere.
#[derive(Clone, Copy)]
pub struct ConstantFunction<R: Value, D: Domain> {
    value: R,
    domain: PhantomData<D>
}

impl<R: Value, D: Domain> ConstantFunction<R, D> {
    pub fn new(value: R) -> ConstantFunction<R, D> {
        ConstantFunction { value, domain: PhantomData }
    }

    pub fn zero() -> ConstantFunction<R, D> {
        ConstantFunction::new(R::zero())
    }

    pub fn constant_value(&self) -> R {
        self.value
    }

    pub fn is_zero(&self) -> bool {
        self.value == R::zero()
    }
}

impl<R: Value, D: Domain> Function<R, D> for ConstantFunction<R, D> {
    fn range(&self) -> ValueRange<R> {
        ValueRange::new(self.value, self.value)
    }

    fn value(&self, _p: &Point<D>) -> R {
        self.value
    }

    fn partition(&self, i: &Interval<D>, callback: &mut PartitionCallback<'_, R, D>) -> Result<(), MathError> {
        callback(i, &Primitive::Constant(*self))
    }

    fn is_finite(&self, _i: &Interval<D>) -> Result<bool, MathError> {
        Ok(self.value.is_finite())
    }

    fn is_non_zero(&self, _i: &Interval<D>) -> Result<bool, MathError> {
        Ok(self.value != R::zero())
    }

    fn min(&self, _i: &Interval<D>) -> Result<R, MathError> {
        Ok(self.value)
    }

    fn max(&self, _i: &Interval<D>) -> Result<R, MathError> {
        Ok(self.value)
    }

    fn mean(&self, _i: &Interval<D>) -> Result<R, MathError> {
        Ok(self.value)
    }

    fn integral(&self, i: &Interval<D>) -> Result<R, MathError> {
        Ok(integral_of(self.value, i.volume()))
    }

    fn print_structure(&self, out: &mut dyn fmt::Write, _level: usize) -> fmt::Result {
        write!(out, "{}", self.value)
    }
}
