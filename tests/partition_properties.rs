//! Property-based tests for partitions.
//!
//! Every piece has to reproduce the function at its corners and center, and
//! the pieces have to cover the query exactly once.

use std::sync::Arc;

use proptest::prelude::*;
use piecewisemath::math::function::function::{
    FunctionAlgebra,
    SharedFunction
};
use piecewisemath::math::function::compoundfunctions::combined2dfunction::Combined2DFunction;
use piecewisemath::math::function::compoundfunctions::curriedfunction::{
    curry_left,
    curry_right
};
use piecewisemath::math::function::compoundfunctions::rasterized2dfunction::Rasterized2DFunction;
use piecewisemath::math::function::functionchecker::FunctionChecker;
use piecewisemath::math::function::primitivefunctions::boxcarfunction::Boxcar1DFunction;
use piecewisemath::math::function::primitivefunctions::gaussfunction::GaussFunction;
use piecewisemath::math::function::primitivefunctions::interpolated1dfunction::Interpolated1DFunction;
use piecewisemath::math::function::primitivefunctions::periodicallyinterpolated1dfunction::PeriodicallyInterpolated1DFunction;
use piecewisemath::math::function::primitivefunctions::periodicallyinterpolated2dfunction::PeriodicallyInterpolated2DFunction;
use piecewisemath::math::function::primitivefunctions::sawtoothfunction::SawtoothFunction;
use piecewisemath::math::interpolator::{
    Interpolator,
    InterpolatorType
};
use piecewisemath::math::interval::Interval;
use piecewisemath::math::point::Point;

type F = SharedFunction<f64, (f64,)>;
type F2 = SharedFunction<f64, (f64, f64)>;

const INTERPOLATORS: [InterpolatorType; 7] = [
    InterpolatorType::Left,
    InterpolatorType::Right,
    InterpolatorType::Center,
    InterpolatorType::Closer,
    InterpolatorType::Smaller,
    InterpolatorType::Greater,
    InterpolatorType::Linear
];

fn coordinate() -> impl Strategy<Value = f64> {
    (-40i32..40).prop_map(|k| k as f64 * 0.25)
}

fn sample_value() -> impl Strategy<Value = f64> {
    (-80i32..80).prop_map(|k| k as f64 * 0.125)
}

fn interpolator() -> impl Strategy<Value = Interpolator> {
    prop::sample::select(INTERPOLATORS.to_vec()).prop_map(Interpolator::new)
}

fn boxcar() -> impl Strategy<Value = F> {
    (coordinate(), 1i32..40, sample_value()).prop_map(|(lower, width, value)| {
        Arc::new(Boxcar1DFunction::new(lower, lower + width as f64 * 0.25, value).unwrap()) as F
    })
}

fn table() -> impl Strategy<Value = F> {
    (coordinate(), prop::collection::vec((1i32..20, sample_value()), 1..7), interpolator()).prop_map(|(start, steps, interpolator)| {
        let mut x = start;
        let points = steps
            .into_iter()
            .map(|(gap, y)| {
                x += gap as f64 * 0.25;
                (x, y)
            })
            .collect();
        Arc::new(Interpolated1DFunction::new(points, interpolator).unwrap()) as F
    })
}

fn periodic_table() -> impl Strategy<Value = F> {
    (coordinate(), 1i32..5, prop::collection::vec(sample_value(), 2..6), interpolator()).prop_map(|(start, step, values, interpolator)| {
        let end = start + (values.len() - 1) as f64 * step as f64;
        Arc::new(PeriodicallyInterpolated1DFunction::new(start, end, interpolator, values).unwrap()) as F
    })
}

/// Functions whose partitions hold closed-form pieces only.
fn piecewise() -> impl Strategy<Value = F> {
    prop_oneof![boxcar(), table(), periodic_table()]
}

fn query() -> impl Strategy<Value = Interval<(f64,)>> {
    (coordinate(), 0i32..80).prop_map(|(lower, width)| {
        Interval::closed(Point::new((lower,)), Point::new((lower + width as f64 * 0.25,)))
    })
}

/// Outer products of two closed-form functions.
fn surface() -> impl Strategy<Value = F2> {
    (piecewise(), piecewise()).prop_map(|(fx, fy)| Arc::new(Combined2DFunction::new(fx, fy)) as F2)
}

fn periodic_surface() -> impl Strategy<Value = F2> {
    let interpolator = prop::sample::select(vec![InterpolatorType::Left, InterpolatorType::Center, InterpolatorType::Linear]);
    (coordinate(), 2usize..5, coordinate(), 2usize..5, interpolator, prop::collection::vec(sample_value(), 16))
        .prop_map(|(start_x, size_x, start_y, size_y, interpolator_type, values)| {
            let interpolator = Interpolator::new(interpolator_type);
            let end_x = start_x + (size_x - 1) as f64 * 0.5;
            let end_y = start_y + (size_y - 1) as f64 * 0.75;
            let rs = values[..size_x * size_y].to_vec();
            Arc::new(PeriodicallyInterpolated2DFunction::new(start_x, end_x, size_x, interpolator, start_y, end_y, size_y, interpolator, rs).unwrap()) as F2
        })
}

fn query_2d() -> impl Strategy<Value = Interval<(f64, f64)>> {
    (coordinate(), 0i32..60, coordinate(), 0i32..60).prop_map(|(lower_x, width_x, lower_y, width_y)| {
        Interval::closed(
            Point::new((lower_x, lower_y)),
            Point::new((lower_x + width_x as f64 * 0.25, lower_y + width_y as f64 * 0.25))
        )
    })
}

fn check_2d(f: &F2, i: &Interval<(f64, f64)>) -> Result<(), TestCaseError> {
    let report = FunctionChecker::new(f.as_ref()).check(i).unwrap();
    prop_assert!(report.pieces > 0);
    prop_assert!(report.is_consistent(), "mismatches {:?}", report.mismatches);
    prop_assert!(report.is_covering(), "covered {} of {}", report.covered_volume, report.expected_volume);
    Ok(())
}

fn check(f: &F, i: &Interval<(f64,)>) -> Result<(), TestCaseError> {
    let report = FunctionChecker::new(f.as_ref()).check(i).unwrap();
    prop_assert!(report.pieces > 0);
    prop_assert!(report.is_consistent(), "mismatches {:?}", report.mismatches);
    prop_assert!(report.is_covering(), "covered {} of {}", report.covered_volume, report.expected_volume);
    Ok(())
}

proptest! {
    #[test]
    fn prop_primitive_partitions(f in piecewise(), i in query()) {
        check(&f, &i)?;
    }

    #[test]
    fn prop_sum_partitions(f in piecewise(), g in piecewise(), i in query()) {
        check(&f.add(&g), &i)?;
        check(&f.subtract(&g), &i)?;
    }

    #[test]
    fn prop_product_partitions(f in piecewise(), g in boxcar(), i in query()) {
        check(&f.multiply(&g), &i)?;
    }

    #[test]
    fn prop_shifted_partitions(f in piecewise(), shift in coordinate(), i in query()) {
        check(&f.shift_domain(&Point::new((shift,))), &i)?;
    }

    #[test]
    fn prop_memoized_partitions(f in piecewise(), i in query()) {
        check(&f.memoize(4), &i)?;
    }

    /// Pieces of a limited function stay inside its domain, so only a query
    /// inside the domain is fully covered.
    #[test]
    fn prop_limited_partitions(f in piecewise(), domain in query(), i in query()) {
        let limited = f.limit_domain(&domain).unwrap();
        let report = FunctionChecker::new(limited.as_ref()).check(&i).unwrap();
        prop_assert!(report.is_consistent(), "mismatches {:?}", report.mismatches);
        check(&limited, &domain)?;
    }

    #[test]
    fn prop_sampled_partitions(start in coordinate(), teeth in 1i32..8, value in sample_value(), i in query()) {
        let sawtooth: F = Arc::new(SawtoothFunction::new(start, start + teeth as f64, 1.0, value).unwrap());
        check(&sawtooth, &i)?;
        let gauss: F = Arc::new(GaussFunction::<f64, f64>::new(start, 2.0).unwrap());
        check(&gauss, &i)?;
    }

    #[test]
    fn prop_approximated_partitions(mean in coordinate(), step in 1i32..8, i in query()) {
        let gauss: F = Arc::new(GaussFunction::<f64, f64>::new(mean, 1.5).unwrap());
        let linear = Interpolator::new(InterpolatorType::Linear);
        let approximated = gauss.approximate(0, mean - 4.0, mean + 4.0, step as f64 * 0.25, linear).unwrap();
        check(&approximated, &i)?;
    }

    #[test]
    fn prop_curried_partitions(f in surface(), x in coordinate(), i in query()) {
        check(&curry_left(&f, x).unwrap(), &i)?;
        check(&curry_right(&f, x).unwrap(), &i)?;
    }

    #[test]
    fn prop_curried_slices_match_the_surface(f in surface(), x in coordinate(), y in coordinate()) {
        let at_x = curry_left(&f, x).unwrap();
        let at_y = curry_right(&f, y).unwrap();
        prop_assert_eq!(at_x.value(&Point::new((y,))), f.value(&Point::new((x, y))));
        prop_assert_eq!(at_y.value(&Point::new((x,))), f.value(&Point::new((x, y))));
    }

    #[test]
    fn prop_rasterized_partitions(f in surface(), start_x in coordinate(), size_x in 2usize..6, start_y in coordinate(), size_y in 2usize..6, i in query_2d()) {
        let end_x = start_x + (size_x - 1) as f64;
        let end_y = start_y + (size_y - 1) as f64 * 0.5;
        let raster: F2 = Arc::new(Rasterized2DFunction::new(start_x, end_x, size_x, start_y, end_y, size_y, f).unwrap());
        check_2d(&raster, &i)?;
    }

    #[test]
    fn prop_periodic_2d_partitions(f in periodic_surface(), i in query_2d()) {
        check_2d(&f, &i)?;
    }
}
