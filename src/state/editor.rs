use tracing::{debug, trace};

use super::model::Model;
use super::param::{Param, ParamId};
use super::session::EditSession;

/// Host callback receiving every model the editor emits
pub type ModelCallback = Box<dyn FnMut(Model)>;

/// Parameter editor: holds the current edit session for a fixed list of
/// params and reports a full model snapshot to the host after every change.
///
/// The host model is only read at construction. Replacing it afterwards does
/// not flow back into the editor.
pub struct ParamEditor {
    params: Vec<Param>,
    session: EditSession,
    on_model_change: ModelCallback,
}

impl ParamEditor {
    pub fn new(
        params: Vec<Param>,
        initial: Model,
        on_model_change: impl FnMut(Model) + 'static,
    ) -> Self {
        let session = EditSession::new(initial);
        debug!(
            params = params.len(),
            values = session.base().param_values.len(),
            color = session.color(),
            "editor created"
        );
        Self {
            params,
            session,
            on_model_change: Box::new(on_model_change),
        }
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    /// Value shown in the field for `param_id`; empty until first set
    pub fn value(&self, param_id: ParamId) -> &str {
        self.session.value(param_id).unwrap_or("")
    }

    pub fn color(&self) -> &str {
        self.session.color()
    }

    pub fn on_field_change(&mut self, param_id: ParamId, value: &str) {
        trace!(param_id, value, "field changed");
        self.session = self.session.with_value(param_id, value);
        self.emit();
    }

    pub fn on_color_change(&mut self, color: &str) {
        trace!(color, "color changed");
        self.session = self.session.with_color(color);
        self.emit();
    }

    /// Snapshot of the current state; no side effects
    pub fn model(&self) -> Model {
        self.session.model()
    }

    fn emit(&mut self) {
        let model = self.session.model();
        (self.on_model_change)(model);
    }
}

impl std::fmt::Debug for ParamEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParamEditor")
            .field("params", &self.params)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
