use eframe::egui::{self, Color32, RichText};

use crate::ui::state::{BackendStatus, ChatState};

const OK: Color32 = Color32::from_rgb(21, 128, 61);
const PENDING: Color32 = Color32::from_rgb(180, 83, 9);
const FAILED: Color32 = Color32::from_rgb(185, 28, 28);

#[derive(Default)]
pub struct StatusActions {
    pub process_pdf: bool,
    pub recheck_health: bool,
}

pub fn render(ui: &mut egui::Ui, state: &ChatState) -> StatusActions {
    let mut actions = StatusActions::default();

    ui.horizontal_wrapped(|ui| {
        ui.vertical(|ui| {
            ui.heading("Book AI Assistant");
            ui.label(RichText::new("Chatbot académico para libro de IA").weak());
        });
        ui.separator();

        let (backend, color) = match state.backend_status {
            BackendStatus::Healthy => ("Conectado", OK),
            BackendStatus::Error => ("Error", FAILED),
            BackendStatus::Loading => ("Conectando...", PENDING),
        };
        ui.colored_label(color, format!("● Backend: {backend}"));

        let (pdf, color) = if state.pdf_processed {
            ("Procesado", OK)
        } else {
            ("No procesado", PENDING)
        };
        ui.colored_label(color, format!("● PDF: {pdf}"));

        if let Some(info) = &state.system_info {
            ui.label(
                RichText::new(format!("{} • Python {}", info.system, info.python_version()))
                    .weak(),
            );
        }

        if state.backend_status == BackendStatus::Error && ui.button("Reintentar").clicked() {
            actions.recheck_health = true;
        }

        if state.needs_processing() {
            if state.processing {
                ui.spinner();
                ui.label("Procesando...");
            } else if ui.button("📖 Procesar PDF").clicked() {
                actions.process_pdf = true;
            }
        }
    });

    if state.needs_processing() {
        ui.add_space(4.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.label(RichText::new("Primero, procesa el PDF").strong());
            ui.label(
                RichText::new(
                    "Antes de hacer preguntas, necesitas procesar el PDF del libro. \
                     Haz clic en \"Procesar PDF\" arriba. Esto creará los embeddings para \
                     la búsqueda semántica. El proceso puede tomar 1-2 minutos.",
                )
                .small(),
            );
        });
    }

    actions
}
