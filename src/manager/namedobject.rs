use serde::{
    Deserialize,
    Serialize
};

/// A configuration entry: its `name` plus whatever else the entry holds,
/// parsed as `P`.
#[derive(Clone, Serialize, Deserialize)]
pub struct NamedJsonObject<P> {
    name: String,
    #[serde(flatten)]
    props: P
}

impl<P> NamedJsonObject<P> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn props(&self) -> &P {
        &self.props
    }

    pub fn into_parts(self) -> (String, P) {
        (self.name, self.props)
    }
}
