use std::fmt;

use crate::math::domain::Domain;
use crate::math::function::combination;
use crate::math::function::function::{
    Function,
    PartitionCallback,
    SharedFunction
};
use crate::math::function::matherror::MathError;
use crate::math::function::primitive::Primitive;
use crate::math::interval::Interval;
use crate::math::point::Point;
use crate::units::value::{
    Value,
    ratio
};

/// `f1 / f2`, a dimensionless ratio of two functions of the same unit.
pub struct DividedFunction<R: Value, D: Domain> {
    function1: SharedFunction<R, D>,
    function2: SharedFunction<R, D>
}

impl<R: Value, D: Domain> DividedFunction<R, D> {
    pub fn new(function1: SharedFunction<R, D>, function2: SharedFunction<R, D>) -> DividedFunction<R, D> {
        DividedFunction { function1, function2 }
    }
}

impl<R: Value, D: Domain> Function<f64, D> for DividedFunction<R, D> {
    fn domain(&self) -> Interval<D> {
        self.function1.domain().intersect(&self.function2.domain())
    }

    fn value(&self, p: &Point<D>) -> f64 {
        ratio(self.function1.value(p), self.function2.value(p))
    }

    fn partition(&self, i: &Interval<D>, callback: &mut PartitionCallback<'_, f64, D>) -> Result<(), MathError> {
        self.function1.partition(i, &mut |i1, f1| {
            if f1.is_zero() && self.function2.is_non_zero(i1)? {
                return callback(i1, &Primitive::constant(0.0));
            }
            self.function2.partition(i1, &mut |i2, f2| {
                let g = combination::divide(f1, f2, i2)?;
                callback(i2, &g)
            })
        })
    }

    fn print_structure(&self, out: &mut dyn fmt::Write, level: usize) -> fmt::Result {
        write!(out, "(/ ")?;
        self.function1.print_structure(out, level + 3)?;
        write!(out, "\n{}", " ".repeat(level + 3))?;
        self.function2.print_structure(out, level + 3)?;
        write!(out, ")")
    }
}
