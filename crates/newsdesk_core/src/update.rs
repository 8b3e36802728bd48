use crate::{AppState, ClickTarget, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    // A pending alert is modal: user clicks are swallowed until it is acknowledged.
    if state.alert().is_some() && is_blocked_by_alert(&msg) {
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::PageLoaded { credential } => {
            state.set_credential_input(credential);
            if state.claim_log_stream() {
                vec![Effect::OpenLogStream]
            } else {
                Vec::new()
            }
        }
        Msg::CredentialEdited(text) => {
            let token = text.trim().to_string();
            state.set_credential_input(text);
            if token.is_empty() {
                Vec::new()
            } else {
                vec![Effect::PersistCredential { token }]
            }
        }
        Msg::RunClicked => {
            // Trigger is disabled while a run is in flight.
            if state.is_run_in_flight() {
                return (state, Vec::new());
            }
            state.begin_run();
            vec![Effect::StartRun {
                api_key: state.credential_input().trim().to_string(),
            }]
        }
        Msg::RunFinished(result) => {
            state.finish_run(result);
            Vec::new()
        }
        Msg::ExportClicked => {
            if state.is_export_in_flight() {
                return (state, Vec::new());
            }
            match state.begin_export() {
                Some(records) => vec![Effect::SubmitExport { records }],
                None => Vec::new(),
            }
        }
        Msg::ExportFinished(result) => {
            state.finish_export(result);
            Vec::new()
        }
        Msg::CardClicked { index } => {
            state.open_detail(index);
            Vec::new()
        }
        Msg::ModalCloseClicked => {
            state.close_detail();
            Vec::new()
        }
        Msg::ModalClicked { target } => {
            if target == ClickTarget::Backdrop {
                state.close_detail();
            }
            Vec::new()
        }
        Msg::AlertDismissed => {
            state.dismiss_alert();
            Vec::new()
        }
        Msg::LogLineReceived(line) => {
            state.append_log_line(&line);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn is_blocked_by_alert(msg: &Msg) -> bool {
    matches!(
        msg,
        Msg::RunClicked
            | Msg::ExportClicked
            | Msg::CardClicked { .. }
            | Msg::ModalCloseClicked
            | Msg::ModalClicked { .. }
    )
}
