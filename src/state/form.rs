use std::path::Path;

use serde::{Deserialize, Serialize};

use super::model::Model;
use super::param::Param;
use crate::error::Error;

const DEFAULT_FORM: &str = include_str!("../../form.json");

/// What the host hands to the editor: the field registry and the model
/// to start from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDefinition {
    pub params: Vec<Param>,
    #[serde(default)]
    pub model: Model,
}

impl FormDefinition {
    pub fn embedded() -> Self {
        serde_json::from_str(DEFAULT_FORM).expect("Failed to parse embedded form.json")
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| Error::Form {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::model::ParamValue;

    #[test]
    fn test_embedded_form() {
        let form = FormDefinition::embedded();
        let names: Vec<&str> = form.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Назначение", "Длина", "Стиль"]);
        assert_eq!(form.model.param_values[1], ParamValue::new(2, "макси"));
        assert!(form.model.colors.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.json");
        std::fs::write(
            &path,
            r##"{
                "params": [{ "id": 1, "name": "Purpose", "type": "string" }],
                "model": { "paramValues": [{ "paramId": 1, "value": "casual" }], "colors": ["#ff0000"] }
            }"##,
        )
        .unwrap();

        let form = FormDefinition::load(&path).unwrap();
        assert_eq!(form.params, vec![Param::new(1, "Purpose")]);
        assert_eq!(form.model.first_color(), Some("#ff0000"));
    }

    #[test]
    fn test_model_section_is_optional() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.json");
        std::fs::write(&path, r#"{ "params": [] }"#).unwrap();

        let form = FormDefinition::load(&path).unwrap();
        assert_eq!(form.model, Model::default());
    }

    #[test]
    fn test_load_errors_carry_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(FormDefinition::load(&missing), Err(Error::Read { .. })));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();
        match FormDefinition::load(&broken) {
            Err(Error::Form { path, .. }) => assert_eq!(path, broken),
            other => panic!("expected form error, got {:?}", other),
        }
    }
}
