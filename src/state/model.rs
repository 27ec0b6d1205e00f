use serde::{Deserialize, Serialize};

use super::param::ParamId;

/// Current value of a single parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamValue {
    pub param_id: ParamId,
    pub value: String,
}

impl ParamValue {
    pub fn new(param_id: ParamId, value: &str) -> Self {
        Self {
            param_id,
            value: value.to_string(),
        }
    }
}

/// The data exchanged between the editor and its host.
///
/// Only the first entry of `colors` is ever read by the editor, and every
/// model it emits carries exactly one color.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[serde(default)]
    pub param_values: Vec<ParamValue>,
    #[serde(default)]
    pub colors: Vec<String>,
}

impl Model {
    pub fn first_color(&self) -> Option<&str> {
        self.colors.first().map(String::as_str)
    }

    /// Pretty JSON with two-space indentation, as shown in the result pane
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
