mod cli;
mod config;
mod dispatch;
mod error;
mod logging;
mod panes;
mod state;
mod ui;

use std::io::{self, Write};
use std::sync::mpsc;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use cli::Cli;
use config::Config;
use error::Error;
use panes::{HelpPane, ParamEditorPane, ResultPane};
use state::{AppState, FormDefinition, ParamEditor};
use ui::{Frame, InputSource, PaneManager, RatatuiBackend};

fn main() -> Result<(), Error> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    let log_path = logging::init(
        cli.log_file.as_deref(),
        config.log_file(),
        config.log_filter(),
        cli.debug,
    );

    let form = match &cli.form {
        Some(path) => FormDefinition::load(path)?,
        None => FormDefinition::embedded(),
    };
    info!(
        params = form.params.len(),
        log = ?log_path,
        "starting paramedit"
    );

    let mut backend = RatatuiBackend::new()?;
    backend.start()?;

    let result = run(&mut backend, form, &config);

    let stopped = backend.stop();
    let state = finish(result, stopped)?;

    if cli.print {
        print_model(&state, &mut io::stdout().lock())?;
    }
    Ok(())
}

/// The run's error takes priority over a failure restoring the terminal
fn finish<T>(result: Result<T, Error>, stopped: io::Result<()>) -> Result<T, Error> {
    let value = result?;
    stopped?;
    Ok(value)
}

/// Write the host's final model as pretty JSON
fn print_model(state: &AppState, out: &mut impl Write) -> Result<(), Error> {
    writeln!(out, "{}", state.model.to_json_pretty()?)?;
    Ok(())
}

fn run(backend: &mut RatatuiBackend, form: FormDefinition, config: &Config) -> Result<AppState, Error> {
    let mut state = AppState::new(&form);

    let (tx, updates) = mpsc::channel();
    let editor = ParamEditor::new(form.params, form.model, move |model| {
        // Receiver lives for the whole loop
        let _ = tx.send(model);
    });

    let mut panes = PaneManager::new(Box::new(ParamEditorPane::new(
        editor,
        config.color_label(),
        config.palette(),
    )));
    panes.add_pane(Box::new(ResultPane::new(config.result_title())));
    panes.add_pane(Box::new(HelpPane::new()));

    let mut app_frame = Frame::new(config.title());

    loop {
        if let Some(event) = backend.poll_event(Duration::from_millis(50)) {
            // Global Ctrl-Q to quit
            if event.is_ctrl_char('q') {
                break;
            }

            let action = panes.handle_input(event, &state);
            if dispatch::dispatch_action(&action, &mut state, &mut panes, &mut app_frame) {
                break;
            }
        }

        while let Ok(model) = updates.try_recv() {
            dispatch::apply_model_update(model, &mut state, &mut app_frame);
        }

        backend.draw(|area, buf| {
            let inner = app_frame.render(area, buf, &state);
            panes.render(inner, buf, &state);
        })?;
    }

    info!(updates = state.updates, "quitting");
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_error_wins_over_stop_error() {
        let run: Result<(), Error> = Err(Error::Io(io::Error::other("draw failed")));
        let stop = Err(io::Error::other("restore failed"));
        match finish(run, stop) {
            Err(e) => assert!(e.to_string().contains("draw failed")),
            Ok(()) => panic!("expected the run error"),
        }
    }

    #[test]
    fn test_stop_error_surfaces_after_clean_run() {
        let stop = Err(io::Error::other("restore failed"));
        assert!(matches!(finish(Ok(3), stop), Err(Error::Io(_))));
        assert_eq!(finish(Ok(3), Ok(())).unwrap(), 3);
    }

    #[test]
    fn test_print_model_writes_pretty_json() {
        let app = AppState::new(&FormDefinition::embedded());
        let mut out = Vec::new();
        print_model(&app, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("}\n"));
        let parsed: crate::state::Model = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, app.model);
    }
}
