use std::sync::Arc;

use serde::Deserialize;

use crate::manager::manager::{
    IManager,
    ManagerBuilder
};
use crate::manager::managererror::ManagerError;
use crate::manager::namedobject::NamedJsonObject;
use crate::math::function::algebraicoperations::summedfunction::SummedFunction;
use crate::math::function::function::{
    Function,
    FunctionAlgebra,
    SharedFunction
};
use crate::math::function::primitivefunctions::boxcarfunction::Boxcar1DFunction;
use crate::math::function::primitivefunctions::constantfunction::ConstantFunction;
use crate::math::function::primitivefunctions::gaussfunction::GaussFunction;
use crate::math::function::primitivefunctions::interpolated1dfunction::Interpolated1DFunction;
use crate::math::function::primitivefunctions::periodicallyinterpolated1dfunction::PeriodicallyInterpolated1DFunction;
use crate::math::function::primitivefunctions::sawtoothfunction::SawtoothFunction;
use crate::math::interpolator::Interpolator;
use crate::math::interval::Interval;
use crate::math::point::Point;

/// Functions of one plain axis, the kind a configuration file describes.
pub type ConfiguredFunction = dyn Function<f64, (f64,)>;

#[derive(Deserialize)]
#[serde(tag = "function_type")]
enum FunctionJsonProp {
    Constant {
        value: f64
    },
    Boxcar {
        lower: f64,
        upper: f64,
        value: f64
    },
    Gauss {
        mean: f64,
        stddev: f64
    },
    Sawtooth {
        start: f64,
        end: f64,
        period: f64,
        value: f64
    },
    Interpolated {
        interpolator: String,
        points: Vec<(f64, f64)>
    },
    PeriodicallyInterpolated {
        start: f64,
        end: f64,
        interpolator: String,
        values: Vec<f64>
    },
    Sum {
        elements: Vec<String>
    },
    Product {
        function: String,
        factor: String
    },
    Shifted {
        function: String,
        shift: f64
    },
    Limited {
        function: String,
        lower: f64,
        upper: f64
    }
}

fn build_function(props: FunctionJsonProp,
                  builder: &ManagerBuilder<ConfiguredFunction>) -> Result<SharedFunction<f64, (f64,)>, ManagerError> {
    let function: SharedFunction<f64, (f64,)> = match props {
        FunctionJsonProp::Constant { value } => Arc::new(ConstantFunction::<f64, (f64,)>::new(value)),
        FunctionJsonProp::Boxcar { lower, upper, value } => Arc::new(Boxcar1DFunction::new(lower, upper, value)?),
        FunctionJsonProp::Gauss { mean, stddev } => Arc::new(GaussFunction::<f64, f64>::new(mean, stddev)?),
        FunctionJsonProp::Sawtooth { start, end, period, value } => Arc::new(SawtoothFunction::new(start, end, period, value)?),
        FunctionJsonProp::Interpolated { interpolator, points } => {
            let interpolator = Interpolator::parse(&interpolator)?;
            Arc::new(Interpolated1DFunction::new(points, interpolator)?)
        },
        FunctionJsonProp::PeriodicallyInterpolated { start, end, interpolator, values } => {
            let interpolator = Interpolator::parse(&interpolator)?;
            Arc::new(PeriodicallyInterpolated1DFunction::new(start, end, interpolator, values)?)
        },
        FunctionJsonProp::Sum { elements } => {
            let elements = elements
                .iter()
                .map(|name| builder.get(name))
                .collect::<Result<Vec<_>, _>>()?;
            Arc::new(SummedFunction::new(elements))
        },
        FunctionJsonProp::Product { function, factor } => builder.get(&function)?.multiply(&builder.get(&factor)?),
        FunctionJsonProp::Shifted { function, shift } => builder.get(&function)?.shift_domain(&Point::new((shift,))),
        FunctionJsonProp::Limited { function, lower, upper } => {
            let domain = Interval::closed(Point::new((lower,)), Point::new((upper,)));
            builder.get(&function)?.limit_domain(&domain)?
        }
    };
    Ok(function)
}

/// Builds configured functions; composite entries refer to entries defined
/// before them by name.
pub struct FunctionLoader;

impl IManager<ConfiguredFunction, ()> for FunctionLoader {
    fn insert_obj_from_json(&self,
                            builder: &mut ManagerBuilder<ConfiguredFunction>,
                            json_value: serde_json::Value,
                            _supports: &()) -> Result<(), ManagerError> {
        let named: NamedJsonObject<FunctionJsonProp> = ManagerError::from_json_or_json_parse_error(json_value)?;
        let (name, props) = named.into_parts();
        let function = build_function(props, builder)?;
        builder.insert(name, function);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn load(entries: serde_json::Value) -> Result<ManagerBuilder<ConfiguredFunction>, ManagerError> {
        let mut builder = ManagerBuilder::new();
        let entries: Vec<serde_json::Value> = ManagerError::from_json_or_json_parse_error(entries)?;
        FunctionLoader.insert_obj_from_json_vec(&mut builder, &entries, &())?;
        Ok(builder)
    }

    #[test]
    fn composites_refer_to_earlier_entries() {
        let builder = load(json!([
            { "name": "floor", "function_type": "Constant", "value": 1.0 },
            { "name": "pulse", "function_type": "Boxcar", "lower": 2, "upper": 5, "value": 9 },
            { "name": "total", "function_type": "Sum", "elements": ["floor", "pulse"] },
            { "name": "later", "function_type": "Shifted", "function": "total", "shift": 10 }
        ])).unwrap();
        let later = builder.get("later").unwrap();
        assert_eq!(later.value(&Point::new((13.0,))), 10.0);
        assert_eq!(later.value(&Point::new((0.0,))), 1.0);
    }

    #[test]
    fn tables_parse_their_interpolator() {
        let builder = load(json!([
            { "name": "table", "function_type": "Interpolated", "interpolator": "linear", "points": [[0, 0], [2, 4]] }
        ])).unwrap();
        assert_eq!(builder.get("table").unwrap().value(&Point::new((1.0,))), 2.0);
    }

    #[test]
    fn configuration_errors_are_reported() {
        let unknown = load(json!([
            { "name": "table", "function_type": "Interpolated", "interpolator": "cubic", "points": [[0, 0]] }
        ]));
        assert!(matches!(unknown, Err(ManagerError::InterpolatorParseError(_))));
        let missing = load(json!([{ "name": "sum", "function_type": "Sum", "elements": ["nothing"] }]));
        assert!(matches!(missing, Err(ManagerError::NameNotFoundError(_))));
        let invalid = load(json!([{ "name": "g", "function_type": "Gauss", "mean": 0, "stddev": -1 }]));
        assert!(matches!(invalid, Err(ManagerError::MathError(_))));
    }
}
