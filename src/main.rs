use std::path::Path;
use std::process::ExitCode;

use tracing::error;

use piecewisemath::configuration::Configuration;
use piecewisemath::math::function::function::describe;
use piecewisemath::math::interval::Interval;
use piecewisemath::math::point::Point;

const CONFIG_PATH: &str = "demos/config.json";

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let config = match Configuration::from_reader(Path::new(CONFIG_PATH)) {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "cannot load configuration");
            return ExitCode::FAILURE;
        }
    };
    let window = Interval::closed(Point::new((0.0,)), Point::new((0.006,)));
    for name in config.function_manager().names() {
        let dump = config.function(name).map_err(|err| err.to_string()).and_then(|function| {
            describe(function.as_ref(), &window).map_err(|err| err.to_string())
        });
        match dump {
            Ok(dump) => println!("== {}\n{}", name, dump),
            Err(err) => {
                error!(name, %err, "cannot describe function");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
