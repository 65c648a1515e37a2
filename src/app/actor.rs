//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::config::MarketConfig;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        config: MarketConfig,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(config),
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Send initial render state, then ask the ledger for a session
        let _ = self.render_tx.send(self.state.to_render_state());
        let init = self.state.init_session();
        self.dispatch(Some(init));

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    let follow_up = self.state.handle_response(response);
                    self.dispatch(follow_up);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    fn dispatch(&self, command: Option<NetworkCommand>) {
        if let Some(cmd) = command {
            if self.network_tx.send(cmd).is_err() {
                tracing::warn!("Network actor is gone, dropping command");
            }
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Form navigation
            UiEvent::NextForm => self.state.next_form(),
            UiEvent::PrevForm => self.state.prev_form(),
            UiEvent::NextField => self.state.next_field(),
            UiEvent::PrevField => self.state.prev_field(),
            UiEvent::ScrollUp => self.state.scroll_up(),
            UiEvent::ScrollDown => self.state.scroll_down(),

            // Input editing
            UiEvent::StartEditing => self.state.start_editing(),
            UiEvent::StopEditing => self.state.stop_editing(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),

            // Ledger actions
            UiEvent::SelectFile => {
                let cmd = self.state.select_file();
                self.dispatch(cmd);
            }
            UiEvent::Submit => {
                let cmd = self.state.submit();
                self.dispatch(cmd);
            }

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),
            UiEvent::DismissAlert => self.state.dismiss_alert(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::ui_events::Form;
    use alloy_primitives::Address;

    #[tokio::test]
    async fn test_startup_requests_session_then_total() {
        let (net_tx, mut net_cmd_rx) = mpsc::unbounded_channel();
        let (render_tx, mut render_rx) = mpsc::unbounded_channel();
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (resp_tx, resp_rx) = mpsc::unbounded_channel();

        let actor = AppActor::new(MarketConfig::default(), net_tx, render_tx);
        let handle = tokio::spawn(actor.run(ui_rx, resp_rx));

        let Some(NetworkCommand::InitSession { id }) = net_cmd_rx.recv().await else {
            panic!("expected InitSession");
        };
        resp_tx
            .send(NetworkResponse::SessionReady {
                id,
                account: Address::with_last_byte(1),
            })
            .unwrap();
        assert!(matches!(
            net_cmd_rx.recv().await,
            Some(NetworkCommand::FetchTotalTokens { .. })
        ));

        ui_tx.send(UiEvent::Quit).unwrap();
        assert!(matches!(net_cmd_rx.recv().await, Some(NetworkCommand::Shutdown)));
        handle.await.unwrap();

        let first = render_rx.recv().await.unwrap();
        assert_eq!(first.active_form, Form::Upload);
        assert!(first.image_url.ends_with(crate::constants::PLACEHOLDER_CONTENT_ID));
    }
}
