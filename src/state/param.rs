use serde::{Deserialize, Serialize};

pub type ParamId = i64;

/// Value type of an editable parameter. Only free text is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    #[default]
    String,
}

/// Descriptor for one editable field, supplied by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub id: ParamId,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: ParamType,
}

impl Param {
    #[allow(dead_code)]
    pub fn new(id: ParamId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            kind: ParamType::String,
        }
    }
}
