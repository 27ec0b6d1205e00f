pub mod editor;
pub mod form;
pub mod model;
pub mod param;
pub mod session;

pub use editor::ParamEditor;
pub use form::FormDefinition;
pub use model::Model;

use param::Param;

/// Host-side state, owned by main.rs and passed to panes by reference.
pub struct AppState {
    /// Field registry handed to the editor
    pub params: Vec<Param>,
    /// The host's copy of the model, replaced on every editor update
    pub model: Model,
    /// Pretty JSON of the last model pulled from the editor
    pub last_result: Option<String>,
    /// Number of model updates received from the editor
    pub updates: u64,
}

impl AppState {
    pub fn new(form: &FormDefinition) -> Self {
        Self {
            params: form.params.clone(),
            model: form.model.clone(),
            last_result: None,
            updates: 0,
        }
    }

    /// Take a model emitted by the editor as the host's current model
    pub fn apply_model(&mut self, model: Model) {
        self.model = model;
        self.updates += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::model::ParamValue;

    #[test]
    fn test_apply_model_replaces_host_copy() {
        let form = FormDefinition::embedded();
        let mut state = AppState::new(&form);
        assert_eq!(state.model, form.model);

        let next = Model {
            param_values: vec![ParamValue::new(1, "вечернее")],
            colors: vec!["#ff0000".to_string()],
        };
        state.apply_model(next.clone());
        assert_eq!(state.model, next);
        assert_eq!(state.updates, 1);
    }
}
