use std::time::{Duration, Instant};

use eframe::egui;
use tokio::sync::mpsc;

use crate::common::{ApiCommand, ApiEvent};

use super::components::{
    chat_area, dialogs, input_bar,
    result_card::CardAction,
    status_bar::{self, StatusActions},
};
use super::state::ChatState;

/// How often the UI polls the worker while idle.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct ChatApp {
    state: ChatState,
    command_sender: mpsc::Sender<ApiCommand>,
    event_receiver: mpsc::Receiver<ApiEvent>,
}

impl ChatApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        command_sender: mpsc::Sender<ApiCommand>,
        event_receiver: mpsc::Receiver<ApiEvent>,
    ) -> Self {
        let mut app = Self {
            state: ChatState::new(),
            command_sender,
            event_receiver,
        };
        app.send_command(ApiCommand::CheckHealth);
        app
    }

    fn handle_api_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            match event {
                ApiEvent::SearchCompleted { query, response } => {
                    self.state.finish_search(query, response)
                }
                ApiEvent::SearchFailed { error, .. } => self.state.fail_search(&error),
                ApiEvent::PdfProcessed(response) => {
                    self.state.finish_processing(&response);
                    // Backend reloads its index after ingestion; refresh the status bar.
                    self.send_command(ApiCommand::CheckHealth);
                }
                ApiEvent::PdfFailed(error) => self.state.fail_processing(&error),
                ApiEvent::HealthChecked(health) => self.state.apply_health(&health),
                ApiEvent::HealthFailed(_) => self.state.health_failed(),
                ApiEvent::SystemInfoLoaded(info) => self.state.system_info = Some(info),
            }
        }
    }

    fn send_command(&mut self, command: ApiCommand) {
        if let Err(err) = self.command_sender.try_send(command) {
            log::warn!("Failed to send command to API worker: {err}");
        }
    }

    fn submit(&mut self) {
        if let Some(query) = self.state.begin_search() {
            self.send_command(ApiCommand::Search { query });
        }
    }

    fn apply_status_actions(&mut self, actions: StatusActions) {
        if actions.recheck_health {
            self.state.recheck_health();
            self.send_command(ApiCommand::CheckHealth);
        }
        if actions.process_pdf && self.state.begin_processing() {
            self.send_command(ApiCommand::ProcessPdf);
        }
    }

    fn apply_card_actions(&mut self, ctx: &egui::Context, actions: Vec<CardAction>) {
        for action in actions {
            match action {
                CardAction::Copy { key, text } => {
                    ctx.copy_text(text);
                    self.state.mark_copied(&key, Instant::now());
                }
                CardAction::ToggleExpanded(key) => self.state.toggle_expanded(&key),
            }
        }
    }

    fn show_dialogs(&mut self, ctx: &egui::Context) {
        if let Some(text) = self.state.notice() {
            if dialogs::notice(ctx, text) {
                self.state.dismiss_notice();
            }
        }

        if self.state.confirm_clear {
            match dialogs::confirm_clear(ctx) {
                Some(true) => self.state.clear_chat(),
                Some(false) => self.state.confirm_clear = false,
                None => {}
            }
        }
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_api_events();

        let status_actions = egui::TopBottomPanel::top("status_bar")
            .show(ctx, |ui| status_bar::render(ui, &self.state))
            .inner;
        self.apply_status_actions(status_actions);

        let input_actions = egui::TopBottomPanel::bottom("input_bar")
            .show(ctx, |ui| {
                ui.add_space(6.0);
                let busy = self.state.is_loading;
                input_bar::render(ui, &mut self.state.input_text, busy)
            })
            .inner;
        if input_actions.submit {
            self.submit();
        }
        if input_actions.clear_requested {
            self.state.confirm_clear = true;
        }

        let card_actions = egui::CentralPanel::default()
            .show(ctx, |ui| chat_area::render(ui, &self.state))
            .inner;
        self.apply_card_actions(ctx, card_actions);

        self.show_dialogs(ctx);

        ctx.request_repaint_after(POLL_INTERVAL);
    }
}
