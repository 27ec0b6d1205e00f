use tracing::{debug, info, warn};

use crate::panes::{HelpPane, ParamEditorPane};
use crate::state::{AppState, Model};
use crate::ui::{Action, Frame, ModelAction, NavAction, PaneManager};

/// Dispatch an action. Returns true if the app should quit.
pub fn dispatch_action(
    action: &Action,
    state: &mut AppState,
    panes: &mut PaneManager,
    app_frame: &mut Frame,
) -> bool {
    match action {
        Action::Quit => return true,
        Action::Nav(NavAction::ShowHelp) => show_help(state, panes),
        Action::Nav(_) => {} // Handled by PaneManager
        Action::Model(ModelAction::Pull) => pull_model(state, panes, app_frame),
        Action::Notify(msg) => app_frame.push_message(msg.clone()),
        Action::None => {}
    }
    false
}

/// Host side of the editor callback: adopt the emitted model as-is
pub fn apply_model_update(model: Model, state: &mut AppState, app_frame: &mut Frame) {
    debug!(
        values = model.param_values.len(),
        color = model.first_color().unwrap_or(""),
        "host model updated"
    );
    state.apply_model(model);
    app_frame.push_message(format!(
        "update #{}: {} values, color {}",
        state.updates,
        state.model.param_values.len(),
        state.model.first_color().unwrap_or("-"),
    ));
}

fn show_help(state: &AppState, panes: &mut PaneManager) {
    if panes.active().id() == "help" {
        return;
    }
    let title = panes.active().title().to_string();
    let keymap = panes.active().keymap().clone();
    if let Some(help) = panes.get_pane_mut::<HelpPane>("help") {
        help.set_context(&title, &keymap);
    }
    panes.push_to("help", state);
}

fn pull_model(state: &mut AppState, panes: &mut PaneManager, app_frame: &mut Frame) {
    let Some(editor_pane) = panes.get_pane_mut::<ParamEditorPane>("editor") else {
        return;
    };
    let model = editor_pane.editor().model();
    let edited = editor_pane.editor().session().is_dirty();

    match model.to_json_pretty() {
        Ok(json) => {
            info!(values = model.param_values.len(), "model pulled from editor");
            state.last_result = Some(json);
            app_frame.push_message(format!(
                "model: {} values, color {}{}",
                model.param_values.len(),
                model.first_color().unwrap_or("-"),
                if edited { " (edited)" } else { "" },
            ));
            panes.push_to("result", state);
        }
        Err(e) => {
            warn!("failed to serialize model: {}", e);
            app_frame.push_message(format!("failed to serialize model: {}", e));
        }
    }
}
