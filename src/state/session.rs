use std::rc::Rc;

use indexmap::IndexMap;

use super::model::{Model, ParamValue};
use super::param::ParamId;

/// Color used when the base model carries none
pub const DEFAULT_COLOR: &str = "#000000";

/// Edits made since the session was opened, latest value per target
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingEdits {
    /// Ordered by first touch
    pub values: IndexMap<ParamId, String>,
    pub color: Option<String>,
}

impl PendingEdits {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.color.is_none()
    }
}

/// An immutable edit session: the model the editor was opened with plus
/// the edits applied on top of it. Applying an edit yields a new session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    base: Rc<Model>,
    pending: PendingEdits,
}

impl EditSession {
    pub fn new(base: Model) -> Self {
        Self {
            base: Rc::new(base),
            pending: PendingEdits::default(),
        }
    }

    pub fn base(&self) -> &Model {
        &self.base
    }

    pub fn is_dirty(&self) -> bool {
        !self.pending.is_empty()
    }

    #[must_use]
    pub fn with_value(&self, param_id: ParamId, value: &str) -> Self {
        let mut pending = self.pending.clone();
        pending.values.insert(param_id, value.to_string());
        Self {
            base: Rc::clone(&self.base),
            pending,
        }
    }

    #[must_use]
    pub fn with_color(&self, color: &str) -> Self {
        let mut pending = self.pending.clone();
        pending.color = Some(color.to_string());
        Self {
            base: Rc::clone(&self.base),
            pending,
        }
    }

    /// Current value for a parameter, `None` if it was never set
    pub fn value(&self, param_id: ParamId) -> Option<&str> {
        if let Some(value) = self.pending.values.get(&param_id) {
            return Some(value.as_str());
        }
        // Later duplicates win, matching map construction in `derive_model`
        self.base
            .param_values
            .iter()
            .rev()
            .find(|pv| pv.param_id == param_id)
            .map(|pv| pv.value.as_str())
    }

    pub fn color(&self) -> &str {
        self.pending
            .color
            .as_deref()
            .or_else(|| self.base.first_color())
            .unwrap_or(DEFAULT_COLOR)
    }

    pub fn model(&self) -> Model {
        derive_model(&self.base, &self.pending)
    }
}

/// Fold pending edits over a base model.
///
/// Values keep the position of their first appearance: base entries in base
/// order, then newly touched ids in the order they were first edited.
pub fn derive_model(base: &Model, pending: &PendingEdits) -> Model {
    let mut values: IndexMap<ParamId, &str> = base
        .param_values
        .iter()
        .map(|pv| (pv.param_id, pv.value.as_str()))
        .collect();
    for (id, value) in &pending.values {
        values.insert(*id, value.as_str());
    }

    let color = pending
        .color
        .as_deref()
        .or_else(|| base.first_color())
        .unwrap_or(DEFAULT_COLOR);

    Model {
        param_values: values
            .into_iter()
            .map(|(id, value)| ParamValue::new(id, value))
            .collect(),
        colors: vec![color.to_string()],
    }
}
