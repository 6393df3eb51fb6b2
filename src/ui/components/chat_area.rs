use std::time::Instant;

use eframe::egui::{self, Color32, RichText};

use crate::common::ChatMessage;
use crate::ui::format;
use crate::ui::state::ChatState;

use super::result_card::{self, CardAction};

const USER_FILL: Color32 = Color32::from_rgb(37, 99, 235);
const WARNING: Color32 = Color32::from_rgb(180, 83, 9);

pub fn render(ui: &mut egui::Ui, state: &ChatState) -> Vec<CardAction> {
    let mut actions = Vec::new();
    let now = Instant::now();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            if state.messages.is_empty() {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("No hay mensajes aún. ¡Empieza a chatear!").weak());
                });
            }

            for message in &state.messages {
                render_message(ui, message, state, now, &mut actions);
                ui.add_space(8.0);
            }

            if state.is_loading {
                loading_indicator(ui);
            }
        });

    actions
}

fn render_message(
    ui: &mut egui::Ui,
    message: &ChatMessage,
    state: &ChatState,
    now: Instant,
    actions: &mut Vec<CardAction>,
) {
    let (author, align) = if message.is_user() {
        ("Tú", egui::Align::Max)
    } else {
        ("Asistente IA", egui::Align::Min)
    };

    ui.with_layout(egui::Layout::top_down(align), |ui| {
        let mut frame = egui::Frame::group(ui.style());
        if message.is_user() {
            frame = frame.fill(USER_FILL);
        }

        frame.show(ui, |ui| {
            ui.set_max_width(ui.available_width() * 0.8);
            let text_color = message.is_user().then_some(Color32::WHITE);

            ui.horizontal(|ui| {
                ui.label(colored(RichText::new(author).strong(), text_color));
                ui.label(colored(
                    RichText::new(format::format_time(&message.timestamp)).small(),
                    text_color,
                ));
            });
            ui.label(colored(RichText::new(&message.content), text_color));

            match &message.results {
                Some(results) if results.is_empty() => not_found_notice(ui),
                Some(results) => {
                    let terms = format::query_terms(message.query.as_deref().unwrap_or(""));
                    for result in results {
                        ui.add_space(6.0);
                        if let Some(action) =
                            result_card::render(ui, &message.id, result, &terms, state, now)
                        {
                            actions.push(action);
                        }
                    }
                }
                None => {}
            }
        });
    });
}

fn colored(text: RichText, color: Option<Color32>) -> RichText {
    match color {
        Some(color) => text.color(color),
        None => text,
    }
}

fn not_found_notice(ui: &mut egui::Ui) {
    ui.add_space(6.0);
    ui.label(
        RichText::new("⚠ Información no encontrada")
            .strong()
            .color(WARNING),
    );
    ui.label(
        RichText::new(
            "No se encontró información específica sobre este tema en el libro. \
             Intenta reformular tu pregunta o preguntar sobre otro tema.",
        )
        .small()
        .color(WARNING),
    );
}

fn loading_indicator(ui: &mut egui::Ui) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(RichText::new("Buscando en el libro...").strong());
        });
        ui.label(
            RichText::new("Analizando el contenido y buscando la información más relevante")
                .small()
                .weak(),
        );
    });
}
