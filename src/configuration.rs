use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::manager::manager::{
    FrozenManager,
    IManager,
    ManagerBuilder
};
use crate::manager::managererror::ManagerError;
use crate::math::function::function::SharedFunction;
use crate::math::function::functionmanager::{
    ConfiguredFunction,
    FunctionLoader
};

#[derive(Deserialize)]
struct ConfigurationJsonProp {
    #[serde(default)]
    function: Vec<serde_json::Value>
}

pub struct Configuration {
    function_manager: FrozenManager<ConfiguredFunction>
}

impl Configuration {
    pub fn from_reader(file_path: &Path) -> Result<Configuration, ManagerError> {
        info!(path = %file_path.display(), "reading configuration");
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let json_value: serde_json::Value = serde_json::from_reader(reader)?;
        Configuration::from_json(json_value)
    }

    pub fn from_json(json_value: serde_json::Value) -> Result<Configuration, ManagerError> {
        let json_prop: ConfigurationJsonProp = ManagerError::from_json_or_json_parse_error(json_value)?;
        let mut builder = ManagerBuilder::new();
        FunctionLoader.insert_obj_from_json_vec(&mut builder, &json_prop.function, &())?;
        info!(functions = builder.len(), "configuration loaded");
        Ok(Configuration { function_manager: builder.freeze() })
    }

    pub fn function_manager(&self) -> &FrozenManager<ConfiguredFunction> {
        &self.function_manager
    }

    pub fn function(&self, name: &str) -> Result<SharedFunction<f64, (f64,)>, ManagerError> {
        self.function_manager.get(name)
    }
}
