use std::fmt;
use std::marker::PhantomData;

use crate::math::function::function::{
    Function,
    PartitionCallback,
    SharedFunction,
    ValueRange,
    integral_of
};
use crate::math::function::matherror::MathError;
use crate::math::function::primitive::Primitive;
use crate::math::interval::Interval;
use crate::math::point::Point;
use crate::units::value::Value;

/// Lifts a function of `Y` into `(X, Y)`, constant along `X`.
pub struct Extruded2DFunction<R: Value, X: Value, Y: Value> {
    function: SharedFunction<R, (Y,)>,
    axis: PhantomData<X>
}

impl<R: Value, X: Value, Y: Value> Extruded2DFunction<R, X, Y> {
    pub fn new(function: SharedFunction<R, (Y,)>) -> Extruded2DFunction<R, X, Y> {
        Extruded2DFunction { function, axis: PhantomData }
    }

    fn along_y(i: &Interval<(X, Y)>) -> Interval<(Y,)> {
        i.project(&[1])
    }
}

impl<R: Value, X: Value, Y: Value> Function<R, (X, Y)> for Extruded2DFunction<R, X, Y> {
    fn domain(&self) -> Interval<(X, Y)> {
        self.function.domain().embedded(&Interval::unbounded(), &[1])
    }

    fn range(&self) -> ValueRange<R> {
        self.function.range()
    }

    fn value(&self, p: &Point<(X, Y)>) -> R {
        self.function.value(&p.project(&[1]))
    }

    fn partition(&self, i: &Interval<(X, Y)>, callback: &mut PartitionCallback<'_, R, (X, Y)>) -> Result<(), MathError> {
        self.function.partition(&Self::along_y(i), &mut |i1, f1| {
            let i2 = i1.embedded(i, &[1]);
            match f1.reembedded::<(X, Y)>(&[Some(1)]) {
                Some(f2) => callback(&i2, &f2),
                None => callback(&i2, &Primitive::Sampled(self))
            }
        })
    }

    fn is_finite(&self, i: &Interval<(X, Y)>) -> Result<bool, MathError> {
        self.function.is_finite(&Self::along_y(i))
    }

    fn is_non_zero(&self, i: &Interval<(X, Y)>) -> Result<bool, MathError> {
        self.function.is_non_zero(&Self::along_y(i))
    }

    fn min(&self, i: &Interval<(X, Y)>) -> Result<R, MathError> {
        self.function.min(&Self::along_y(i))
    }

    fn max(&self, i: &Interval<(X, Y)>) -> Result<R, MathError> {
        self.function.max(&Self::along_y(i))
    }

    fn mean(&self, i: &Interval<(X, Y)>) -> Result<R, MathError> {
        self.function.mean(&Self::along_y(i))
    }

    fn integral(&self, i: &Interval<(X, Y)>) -> Result<R, MathError> {
        let width = i.project::<(X,)>(&[0]).volume();
        Ok(integral_of(self.function.integral(&Self::along_y(i))?, width))
    }

    fn print_structure(&self, out: &mut dyn fmt::Write, level: usize) -> fmt::Result {
        write!(out, "(Extruded\n{}", " ".repeat(level + 2))?;
        self.function.print_structure(out, level + 2)?;
        write!(out, ")")
    }
}
