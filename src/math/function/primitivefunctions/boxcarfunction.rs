use std::fmt;
use std::marker::PhantomData;

use crate::math::function::function::{
    Function,
    PartitionCallback,
    ValueRange
};
use crate::math::function::matherror::MathError;
use crate::math::function::primitive::Primitive;
use crate::math::interval::Interval;
use crate::math::point::Point;
use crate::units::value::{
    Value,
    max_nan,
    min_nan
};

// ─────────────────────────────────────────────
// Boxcar1DFunction
// ─────────────────────────────────────────────

/// `value` on `[lower, upper)` and zero elsewhere.
#[derive(Clone, Copy)]
pub struct Boxcar1DFunction<R: Value, X: Value> {
    lower: f64,
    upper: f64,
    value: R,
    axis: PhantomData<X>
}

impl<R: Value, X: Value> Boxcar1DFunction<R, X> {
    pub fn new(lower: X, upper: X, value: R) -> Result<Boxcar1DFunction<R, X>, MathError> {
        if !(lower <= upper) {
            return Err(MathError::InvalidArgument(format!("boxcar lower {} exceeds upper {}", lower, upper)));
        }
        Ok(Boxcar1DFunction { lower: lower.to_f64(), upper: upper.to_f64(), value, axis: PhantomData })
    }

    pub fn lower(&self) -> X {
        X::from_f64(self.lower)
    }

    pub fn upper(&self) -> X {
        X::from_f64(self.upper)
    }

    pub fn boxcar_value(&self) -> R {
        self.value
    }
}

impl<R: Value, X: Value> Function<R, (X,)> for Boxcar1DFunction<R, X> {
    fn range(&self) -> ValueRange<R> {
        ValueRange::new(min_nan(R::zero(), self.value), max_nan(R::zero(), self.value))
    }

    fn value(&self, p: &Point<(X,)>) -> R {
        let x = p.get(0);
        if x < self.lower || x >= self.upper { R::zero() } else { self.value }
    }

    fn partition(&self, i: &Interval<(X,)>, callback: &mut PartitionCallback<'_, R, (X,)>) -> Result<(), MathError> {
        let pieces = [
            (f64::NEG_INFINITY, self.lower, false, R::zero()),
            (self.lower, self.upper, true, self.value),
            (self.upper, f64::INFINITY, true, R::zero())
        ];
        for (lower, upper, lower_closed, r) in pieces {
            let i1 = i.clipped(0, lower, upper, lower_closed, false);
            if !i1.is_empty() {
                callback(&i1, &Primitive::constant(r))?;
            }
        }
        Ok(())
    }

    fn is_finite(&self, _i: &Interval<(X,)>) -> Result<bool, MathError> {
        Ok(self.value.is_finite())
    }

    fn print_structure(&self, out: &mut dyn fmt::Write, _level: usize) -> fmt::Result {
        write!(out, "(Boxcar1D, [{} … {}] → {})", self.lower(), self.upper(), self.value)
    }
}

// ─────────────────────────────────────────────
// Boxcar2DFunction
// ─────────────────────────────────────────────

/// `value` on `[lower_x, upper_x) x [lower_y, upper_y)` and zero elsewhere.
#[derive(Clone, Copy)]
pub struct Boxcar2DFunction<R: Value, X: Value, Y: Value> {
    lower_x: f64,
    upper_x: f64,
    lower_y: f64,
    upper_y: f64,
    value: R,
    axes: PhantomData<(X, Y)>
}

impl<R: Value, X: Value, Y: Value> Boxcar2DFunction<R, X, Y> {
    pub fn new(lower_x: X, upper_x: X, lower_y: Y, upper_y: Y, value: R) -> Result<Boxcar2DFunction<R, X, Y>, MathError> {
        if !(lower_x <= upper_x && lower_y <= upper_y) {
            return Err(MathError::InvalidArgument(format!(
                "boxcar extent [{} … {}] x [{} … {}] is inverted",
                lower_x, upper_x, lower_y, upper_y
            )));
        }
        Ok(Boxcar2DFunction {
            lower_x: lower_x.to_f64(),
            upper_x: upper_x.to_f64(),
            lower_y: lower_y.to_f64(),
            upper_y: upper_y.to_f64(),
            value,
            axes: PhantomData
        })
    }

    fn bands(lower: f64, upper: f64) -> [(f64, f64, bool, bool); 3] {
        [
            (f64::NEG_INFINITY, lower, false, false),
            (lower, upper, true, true),
            (upper, f64::INFINITY, true, false)
        ]
    }
}

impl<R: Value, X: Value, Y: Value> Function<R, (X, Y)> for Boxcar2DFunction<R, X, Y> {
    fn range(&self) -> ValueRange<R> {
        ValueRange::new(min_nan(R::zero(), self.value), max_nan(R::zero(), self.value))
    }

    fn value(&self, p: &Point<(X, Y)>) -> R {
        let (x, y) = (p.get(0), p.get(1));
        if x < self.lower_x || x >= self.upper_x || y < self.lower_y || y >= self.upper_y {
            R::zero()
        } else {
            self.value
        }
    }

    fn partition(&self, i: &Interval<(X, Y)>, callback: &mut PartitionCallback<'_, R, (X, Y)>) -> Result<(), MathError> {
        for (lower_y, upper_y, lower_closed_y, inside_y) in Self::bands(self.lower_y, self.upper_y) {
            let row = i.clipped(1, lower_y, upper_y, lower_closed_y, false);
            if row.is_empty() {
                continue;
            }
            for (lower_x, upper_x, lower_closed_x, inside_x) in Self::bands(self.lower_x, self.upper_x) {
                let i1 = row.clipped(0, lower_x, upper_x, lower_closed_x, false);
                if !i1.is_empty() {
                    let r = if inside_x && inside_y { self.value } else { R::zero() };
                    callback(&i1, &Primitive::constant(r))?;
                }
            }
        }
        Ok(())
    }

    fn is_finite(&self, _i: &Interval<(X, Y)>) -> Result<bool, MathError> {
        Ok(self.value.is_finite())
    }

    fn print_structure(&self, out: &mut dyn fmt::Write, _level: usize) -> fmt::Result {
        write!(
            out,
            "(Boxcar2D, [{} … {}] x [{} … {}] → {})",
            X::from_f64(self.lower_x),
            X::from_f64(self.upper_x),
            Y::from_f64(self.lower_y),
            Y::from_f64(self.upper_y),
            self.value
        )
    }
}
