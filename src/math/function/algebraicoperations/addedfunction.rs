use std::fmt;

use crate::math::domain::Domain;
use crate::math::function::combination;
use crate::math::function::function::{
    Function,
    PartitionCallback,
    SharedFunction,
    ValueRange
};
use crate::math::function::matherror::MathError;
use crate::math::interval::Interval;
use crate::math::point::Point;
use crate::units::value::Value;

/// `f1 + f2`.
pub struct AddedFunction<R: Value, D: Domain> {
    function1: SharedFunction<R, D>,
    function2: SharedFunction<R, D>
}

impl<R: Value, D: Domain> AddedFunction<R, D> {
    pub fn new(function1: SharedFunction<R, D>, function2: SharedFunction<R, D>) -> AddedFunction<R, D> {
        AddedFunction { function1, function2 }
    }
}

impl<R: Value, D: Domain> Function<R, D> for AddedFunction<R, D> {
    fn domain(&self) -> Interval<D> {
        self.function1.domain().intersect(&self.function2.domain())
    }

    fn range(&self) -> ValueRange<R> {
        let (r1, r2) = (self.function1.range(), self.function2.range());
        ValueRange::new(r1.lower() + r2.lower(), r1.upper() + r2.upper())
    }

    fn value(&self, p: &Point<D>) -> R {
        self.function1.value(p) + self.function2.value(p)
    }

    fn partition(&self, i: &Interval<D>, callback: &mut PartitionCallback<'_, R, D>) -> Result<(), MathError> {
        self.function1.partition(i, &mut |i1, f1| {
            if f1.is_zero() {
                return self.function2.partition(i1, &mut *callback);
            }
            self.function2.partition(i1, &mut |i2, f2| {
                let g = combination::add(f1, f2, i2)?;
                callback(i2, &g)
            })
        })
    }

    fn is_finite(&self, i: &Interval<D>) -> Result<bool, MathError> {
        Ok(self.function1.is_finite(i)? && self.function2.is_finite(i)?)
    }

    fn print_structure(&self, out: &mut dyn fmt::Write, level: usize) -> fmt::Result {
        write!(out, "(+ ")?;
        self.function1.print_structure(out, level + 3)?;
        write!(out, "\n{}", " ".repeat(level + 3))?;
        self.function2.print_structure(out, level + 3)?;
        write!(out, ")")
    }
}
