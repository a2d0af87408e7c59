//! End-to-end scenarios on small hand-built functions.

use std::sync::Arc;

use piecewisemath::math::function::function::{
    FunctionAlgebra,
    SharedFunction
};
use piecewisemath::math::function::matherror::{
    FunctionKind,
    MathError
};
use piecewisemath::math::function::compoundfunctions::combined2dfunction::Combined2DFunction;
use piecewisemath::math::function::compoundfunctions::integratedfunction::integrate;
use piecewisemath::math::function::functionchecker::FunctionChecker;
use piecewisemath::math::function::primitivefunctions::boxcarfunction::Boxcar1DFunction;
use piecewisemath::math::function::primitivefunctions::constantfunction::ConstantFunction;
use piecewisemath::math::function::primitivefunctions::unilinearfunction::UnilinearFunction;
use piecewisemath::math::interval::Interval;
use piecewisemath::math::point::Point;

type F = SharedFunction<f64, (f64,)>;

fn closed(lower: f64, upper: f64) -> Interval<(f64,)> {
    Interval::closed(Point::new((lower,)), Point::new((upper,)))
}

fn constant(value: f64) -> F {
    Arc::new(ConstantFunction::<f64, (f64,)>::new(value))
}

fn ramp(lower: f64, upper: f64, r_lower: f64, r_upper: f64) -> F {
    Arc::new(UnilinearFunction::<f64, (f64,)>::from_extent(0, lower, upper, r_lower, r_upper))
}

#[test]
fn sum_of_constants_is_one_constant() {
    let f = constant(3.0).add(&constant(4.0));
    for x in [-1e9, -1.0, 0.0, 2.5, 1e9] {
        assert_eq!(f.value(&Point::new((x,))), 7.0);
    }
    let mut pieces = Vec::new();
    f.partition(&closed(-5.0, 5.0), &mut |i1, f1| {
        pieces.push((i1.volume(), f1.kind(), f1.value(&i1.center())));
        Ok(())
    }).unwrap();
    assert_eq!(pieces, vec![(10.0, FunctionKind::Constant, 7.0)]);
}

#[test]
fn ramp_integral_is_triangle_area() {
    let f = ramp(0.0, 10.0, 0.0, 10.0);
    assert_eq!(f.integral(&closed(0.0, 10.0)).unwrap(), 50.0);
    assert_eq!(f.mean(&closed(0.0, 10.0)).unwrap(), 5.0);
}

#[test]
fn quotient_of_equal_ramps_is_one_away_from_the_pole() {
    let f = ramp(0.0, 10.0, -5.0, 5.0);
    let g = f.divide(&f);
    for x in [0.0, 2.0, 4.5, 7.0, 10.0] {
        assert_eq!(g.value(&Point::new((x,))), 1.0);
    }
    assert!(g.value(&Point::new((5.0,))).is_nan());
    assert!(FunctionChecker::new(g.as_ref()).check(&closed(0.0, 4.0)).unwrap().is_ok());
    assert!(matches!(g.integral(&closed(0.0, 10.0)), Err(MathError::Singularity { .. })));
}

#[test]
fn boxcar_partition_has_three_pieces() {
    let f: F = Arc::new(Boxcar1DFunction::new(2.0, 5.0, 9.0).unwrap());
    for (x, expected) in [(0.0, 0.0), (2.0, 9.0), (4.999, 9.0), (5.0, 0.0), (10.0, 0.0)] {
        assert_eq!(f.value(&Point::new((x,))), expected);
    }
    let mut bounds = Vec::new();
    f.partition(&closed(0.0, 10.0), &mut |i1, _| {
        bounds.push((i1.lower().get(0), i1.upper().get(0)));
        Ok(())
    }).unwrap();
    assert_eq!(bounds, vec![(0.0, 2.0), (2.0, 5.0), (5.0, 10.0)]);
}

#[test]
fn separable_surface_integrates_back_to_its_profile() {
    let time: F = Arc::new(Boxcar1DFunction::new(0.0, 2.0, 3.0).unwrap());
    let band: F = Arc::new(Boxcar1DFunction::new(10.0, 14.0, 0.5).unwrap());
    let surface: SharedFunction<f64, (f64, f64)> = Arc::new(Combined2DFunction::new(time, band));
    let profile = integrate(&surface);
    assert_eq!(profile.value(&Point::new((1.0,))), 6.0);
    assert_eq!(profile.value(&Point::new((3.0,))), 0.0);
    assert_eq!(profile.integral(&closed(-1.0, 5.0)).unwrap(), 12.0);
}

#[test]
fn unsupported_pairs_surface_as_errors() {
    let f = ramp(0.0, 10.0, 1.0, 2.0);
    let g = f.multiply(&ramp(0.0, 10.0, 3.0, 4.0));
    assert!(matches!(g.integral(&closed(0.0, 10.0)), Err(MathError::UnsupportedCombination { .. })));
}
