use std::fmt;
use std::sync::Arc;

use crate::math::domain::Domain;
use crate::math::function::algebraicoperations::addedfunction::AddedFunction;
use crate::math::function::algebraicoperations::dividedfunction::DividedFunction;
use crate::math::function::algebraicoperations::multipliedfunction::MultipliedFunction;
use crate::math::function::algebraicoperations::subtractedfunction::SubtractedFunction;
use crate::math::function::compoundfunctions::approximatedfunction::ApproximatedFunction;
use crate::math::function::compoundfunctions::domainlimitedfunction::DomainLimitedFunction;
use crate::math::function::compoundfunctions::domainshiftedfunction::DomainShiftedFunction;
use crate::math::function::compoundfunctions::memoizedfunction::MemoizedFunction;
use crate::math::function::matherror::MathError;
use crate::math::function::primitive::Primitive;
use crate::math::interpolator::Interpolator;
use crate::math::interval::Interval;
use crate::math::point::Point;
use crate::units::value::{
    Value,
    max_nan,
    min_nan
};

/// Receives the pieces of a partition in order.
pub type PartitionCallback<'c, R, D> =
    dyn FnMut(&Interval<D>, &Primitive<'_, R, D>) -> Result<(), MathError> + 'c;

pub type SharedFunction<R, D> = Arc<dyn Function<R, D>>;

/// Integral of a piece with the given mean, where a zero mean never meets
/// an infinite volume.
pub fn integral_of<R: Value>(mean: R, volume: f64) -> R {
    if mean == R::zero() { mean } else { mean * volume }
}

/// Conservative bounds of the values a function takes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueRange<R: Value> {
    lower: R,
    upper: R
}

impl<R: Value> ValueRange<R> {
    pub fn new(lower: R, upper: R) -> ValueRange<R> {
        ValueRange { lower, upper }
    }

    pub fn unbounded() -> ValueRange<R> {
        ValueRange::new(R::lower_bound(), R::upper_bound())
    }

    pub fn lower(&self) -> R {
        self.lower
    }

    pub fn upper(&self) -> R {
        self.upper
    }
}

impl<R: Value> fmt::Display for ValueRange<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} … {}]", self.lower, self.upper)
    }
}

/// A function from points of `D` to values of `R`.
///
/// `partition` is the one operation every implementation must get right: it
/// splits a query interval into disjoint pieces, each paired with a primitive
/// that reproduces the function there. All derived queries below default to
/// a walk over that partition; primitives override them with closed forms.
pub trait Function<R: Value, D: Domain>: Send + Sync {
    fn domain(&self) -> Interval<D> {
        Interval::unbounded()
    }

    fn range(&self) -> ValueRange<R> {
        ValueRange::unbounded()
    }

    /// `p` must lie in `domain()`.
    fn value(&self, p: &Point<D>) -> R;

    fn partition(&self, i: &Interval<D>, callback: &mut PartitionCallback<'_, R, D>) -> Result<(), MathError>;

    fn is_finite(&self, i: &Interval<D>) -> Result<bool, MathError> {
        let mut result = true;
        self.partition(i, &mut |i1, f1| {
            result &= f1.is_finite(i1)?;
            Ok(())
        })?;
        Ok(result)
    }

    fn is_non_zero(&self, i: &Interval<D>) -> Result<bool, MathError> {
        let mut result = true;
        self.partition(i, &mut |i1, f1| {
            result &= f1.is_non_zero(i1)?;
            Ok(())
        })?;
        Ok(result)
    }

    fn min(&self, i: &Interval<D>) -> Result<R, MathError> {
        let mut result = R::upper_bound();
        self.partition(i, &mut |i1, f1| {
            result = min_nan(result, f1.min(i1)?);
            Ok(())
        })?;
        Ok(result)
    }

    fn max(&self, i: &Interval<D>) -> Result<R, MathError> {
        let mut result = R::lower_bound();
        self.partition(i, &mut |i1, f1| {
            result = max_nan(result, f1.max(i1)?);
            Ok(())
        })?;
        Ok(result)
    }

    fn mean(&self, i: &Interval<D>) -> Result<R, MathError> {
        Ok(self.integral(i)? * (1.0 / i.volume()))
    }

    fn integral(&self, i: &Interval<D>) -> Result<R, MathError> {
        let mut result = R::zero();
        self.partition(i, &mut |i1, f1| {
            result = result + f1.integral(i1)?;
            Ok(())
        })?;
        Ok(result)
    }

    /// Writes the operator tree on one line.
    fn print_structure(&self, out: &mut dyn fmt::Write, level: usize) -> fmt::Result;

    /// Writes one indented line per partition piece.
    fn print_partition(&self, out: &mut dyn fmt::Write, i: &Interval<D>, level: usize) -> Result<(), MathError> {
        self.partition(i, &mut |i1, f1| {
            writeln!(out, "{}{}", " ".repeat(level), f1.describe(i1))?;
            Ok(())
        })
    }
}

impl<R: Value, D: Domain> fmt::Debug for dyn Function<R, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.print_structure(f, 0)
    }
}

/// Renders domain, range, operator tree and partition over `i` as text.
pub fn describe<R: Value, D: Domain>(function: &dyn Function<R, D>, i: &Interval<D>) -> Result<String, MathError> {
    let mut out = String::new();
    fmt::Write::write_fmt(&mut out, format_args!("domain: {}\n", function.domain()))?;
    fmt::Write::write_fmt(&mut out, format_args!("range: {}\n", function.range()))?;
    fmt::Write::write_str(&mut out, "structure: ")?;
    function.print_structure(&mut out, 0)?;
    fmt::Write::write_fmt(&mut out, format_args!("\npartition over {}:\n", i))?;
    function.print_partition(&mut out, i, 2)?;
    Ok(out)
}

/// Combinators on shared functions. Each returns a new function and leaves
/// the operands untouched.
pub trait FunctionAlgebra<R: Value, D: Domain> {
    fn add(&self, other: &SharedFunction<R, D>) -> SharedFunction<R, D>;

    fn subtract(&self, other: &SharedFunction<R, D>) -> SharedFunction<R, D>;

    fn multiply(&self, other: &SharedFunction<f64, D>) -> SharedFunction<R, D>;

    fn divide(&self, other: &SharedFunction<R, D>) -> SharedFunction<f64, D>;

    fn limit_domain(&self, domain: &Interval<D>) -> Result<SharedFunction<R, D>, MathError>;

    fn shift_domain(&self, shift: &Point<D>) -> SharedFunction<R, D>;

    fn memoize(&self, limit: usize) -> SharedFunction<R, D>;

    fn approximate(&self, dimension: usize, lower: f64, upper: f64, step: f64, interpolator: Interpolator) -> Result<SharedFunction<R, D>, MathError>;
}

impl<R: Value, D: Domain> FunctionAlgebra<R, D> for SharedFunction<R, D> {
    fn add(&self, other: &SharedFunction<R, D>) -> SharedFunction<R, D> {
        Arc::new(AddedFunction::new(self.clone(), other.clone()))
    }

    fn subtract(&self, other: &SharedFunction<R, D>) -> SharedFunction<R, D> {
        Arc::new(SubtractedFunction::new(self.clone(), other.clone()))
    }

    fn multiply(&self, other: &SharedFunction<f64, D>) -> SharedFunction<R, D> {
        Arc::new(MultipliedFunction::new(self.clone(), other.clone()))
    }

    fn divide(&self, other: &SharedFunction<R, D>) -> SharedFunction<f64, D> {
        Arc::new(DividedFunction::new(self.clone(), other.clone()))
    }

    fn limit_domain(&self, domain: &Interval<D>) -> Result<SharedFunction<R, D>, MathError> {
        Ok(Arc::new(DomainLimitedFunction::new(self.clone(), domain)?))
    }

    fn shift_domain(&self, shift: &Point<D>) -> SharedFunction<R, D> {
        Arc::new(DomainShiftedFunction::new(self.clone(), *shift))
    }

    fn memoize(&self, limit: usize) -> SharedFunction<R, D> {
        Arc::new(MemoizedFunction::new(self.clone(), limit))
    }

    fn approximate(&self, dimension: usize, lower: f64, upper: f64, step: f64, interpolator: Interpolator) -> Result<SharedFunction<R, D>, MathError> {
        Ok(Arc::new(ApproximatedFunction::new(self.clone(), dimension, lower, upper, step, interpolator)?))
    }
}
