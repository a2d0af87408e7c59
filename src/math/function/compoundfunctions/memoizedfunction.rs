use std::fmt;

use crate::math::domain::Domain;
use crate::math::function::compoundfunctions::cachebackend::{
    RwLockBackend,
    point_key
};
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

/// Caches point evaluations of the wrapped function; partitioning and all
/// other queries pass straight through.
pub struct MemoizedFunction<R: Value, D: Domain> {
    function: SharedFunction<R, D>,
    cache: RwLockBackend<R>
}

impl<R: Value, D: Domain> MemoizedFunction<R, D> {
    pub fn new(function: SharedFunction<R, D>, limit: usize) -> MemoizedFunction<R, D> {
        MemoizedFunction { function, cache: RwLockBackend::new(limit) }
    }

    pub fn cached_values(&self) -> usize {
        self.cache.len()
    }
}

impl<R: Value, D: Domain> Function<R, D> for MemoizedFunction<R, D> {
    fn domain(&self) -> Interval<D> {
        self.function.domain()
    }

    fn range(&self) -> ValueRange<R> {
        self.function.range()
    }

    fn value(&self, p: &Point<D>) -> R {
        self.cache.get_or_compute(point_key(p), || self.function.value(p))
    }

    fn partition(&self, i: &Interval<D>, callback: &mut PartitionCallback<'_, R, D>) -> Result<(), MathError> {
        self.function.partition(i, callback)
    }

    fn is_finite(&self, i: &Interval<D>) -> Result<bool, MathError> {
        self.function.is_finite(i)
    }

    fn is_non_zero(&self, i: &Interval<D>) -> Result<bool, MathError> {
        self.function.is_non_zero(i)
    }

    fn min(&self, i: &Interval<D>) -> Result<R, MathError> {
        self.function.min(i)
    }

    fn max(&self, i: &Interval<D>) -> Result<R, MathError> {
        self.function.max(i)
    }

    fn mean(&self, i: &Interval<D>) -> Result<R, MathError> {
        self.function.mean(i)
    }

    fn integral(&self, i: &Interval<D>) -> Result<R, MathError> {
        self.function.integral(i)
    }

    fn print_structure(&self, out: &mut dyn fmt::Write, level: usize) -> fmt::Result {
        write!(out, "(Memoized, limit = {}\n{}", self.cache.limit(), " ".repeat(level + 2))?;
        self.function.print_structure(out, level + 2)?;
        write!(out, ")")
    }
}
