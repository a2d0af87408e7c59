use std::fmt;
use std::sync::Arc;

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
use crate::units::value::Value;

/// Sum of any number of functions.
///
/// Partitioning folds the elements from left to right: the accumulated piece
/// starts as zero and is merged with each element's pieces over the refined
/// interval, so every element is walked once per piece of its predecessors.
pub struct SummedFunction<R: Value, D: Domain> {
    elements: Vec<SharedFunction<R, D>>
}

impl<R: Value, D: Domain> SummedFunction<R, D> {
    pub fn new(elements: Vec<SharedFunction<R, D>>) -> SummedFunction<R, D> {
        SummedFunction { elements }
    }

    pub fn elements(&self) -> &[SharedFunction<R, D>] {
        &self.elements
    }

    pub fn with_element(mut self, element: SharedFunction<R, D>) -> SummedFunction<R, D> {
        self.elements.push(element);
        self
    }

    /// Drops every occurrence of `element`, compared by identity.
    pub fn without_element(mut self, element: &SharedFunction<R, D>) -> SummedFunction<R, D> {
        self.elements.retain(|e| !Arc::ptr_eq(e, element));
        self
    }

    fn partition_from(&self,
                      index: usize,
                      i: &Interval<D>,
                      accumulated: &Primitive<'_, R, D>,
                      callback: &mut PartitionCallback<'_, R, D>) -> Result<(), MathError> {
        match self.elements.get(index) {
            None => callback(i, &accumulated.simplified(i)),
            Some(element) => element.partition(i, &mut |i1, f1| {
                let g = combination::add(accumulated, f1, i1)?;
                self.partition_from(index + 1, i1, &g, &mut *callback)
            })
        }
    }
}

impl<R: Value, D: Domain> Default for SummedFunction<R, D> {
    fn default() -> Self {
        SummedFunction::new(Vec::new())
    }
}

impl<R: Value, D: Domain> Function<R, D> for SummedFunction<R, D> {
    fn domain(&self) -> Interval<D> {
        self.elements
            .iter()
            .fold(Interval::unbounded(), |domain, element| domain.intersect(&element.domain()))
    }

    fn value(&self, p: &Point<D>) -> R {
        self.elements.iter().fold(R::zero(), |sum, element| sum + element.value(p))
    }

    fn partition(&self, i: &Interval<D>, callback: &mut PartitionCallback<'_, R, D>) -> Result<(), MathError> {
        self.partition_from(0, i, &Primitive::constant(R::zero()), callback)
    }

    fn is_finite(&self, i: &Interval<D>) -> Result<bool, MathError> {
        for element in &self.elements {
            if !element.is_finite(i)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn print_structure(&self, out: &mut dyn fmt::Write, level: usize) -> fmt::Result {
        write!(out, "(Σ ")?;
        for (k, element) in self.elements.iter().enumerate() {
            if k > 0 {
                write!(out, "\n{}", " ".repeat(level + 3))?;
            }
            element.print_structure(out, level + 3)?;
        }
        write!(out, ")")
    }
}
