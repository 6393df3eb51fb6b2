use std::time::Instant;

use eframe::egui::{self, Color32, RichText};

use crate::common::SearchResult;
use crate::ui::format::{self, TRUNCATE_WORDS};
use crate::ui::state::{ChatState, card_key};

const HIGHLIGHT_BG: Color32 = Color32::from_rgb(254, 240, 138);

pub enum CardAction {
    Copy { key: String, text: String },
    ToggleExpanded(String),
}

pub fn render(
    ui: &mut egui::Ui,
    message_id: &str,
    result: &SearchResult,
    terms: &[String],
    state: &ChatState,
    now: Instant,
) -> Option<CardAction> {
    let key = card_key(message_id, result.chunk_id);
    let page = format::extract_page_info(&result.text);
    let quality = format::quality(result.similarity_percent);
    let expanded = state.is_expanded(&key);
    let mut action = None;

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());

        ui.horizontal(|ui| {
            ui.label(RichText::new(format!("Resultado #{}", result.rank)).strong());
            ui.label(
                RichText::new(format!(
                    "{}% relevante",
                    format::format_percent(result.similarity_percent)
                ))
                .strong()
                .color(quality.color()),
            );
            if let Some(page) = page.page {
                ui.label(RichText::new(format!("Página {page}")).weak());
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let toggle = if expanded { "Mostrar menos" } else { "Expandir" };
                if ui.small_button(toggle).clicked() {
                    action = Some(CardAction::ToggleExpanded(key.clone()));
                }
                let copy = if state.is_copied(&key, now) {
                    "✔ Copiado"
                } else {
                    "Copiar"
                };
                if ui.small_button(copy).clicked() {
                    action = Some(CardAction::Copy {
                        key: key.clone(),
                        text: page.text.clone(),
                    });
                }
            });
        });

        ui.add_space(4.0);
        let shown = format::truncate_words(&page.text, TRUNCATE_WORDS, expanded);
        highlighted_label(ui, &shown.text, terms);

        if shown.is_truncated()
            && ui
                .link(format!("Mostrar {} palabras más", shown.hidden_words))
                .clicked()
        {
            action = Some(CardAction::ToggleExpanded(key.clone()));
        }

        ui.separator();
        egui::Grid::new(("result_meta", &key))
            .num_columns(4)
            .spacing([24.0, 2.0])
            .show(ui, |ui| {
                for title in ["Palabras", "ID Chunk", "Similitud", "Calidad"] {
                    ui.label(RichText::new(title).small().weak());
                }
                ui.end_row();

                ui.label(format::word_count(&page.text).to_string());
                ui.label(result.chunk_id.to_string());
                ui.label(format!("{:.3}", result.similarity));
                ui.label(RichText::new(quality.label()).color(quality.color()));
                ui.end_row();
            });
    });

    action
}

fn highlighted_label(ui: &mut egui::Ui, text: &str, terms: &[String]) {
    let base = egui::TextFormat {
        font_id: egui::TextStyle::Body.resolve(ui.style()),
        color: ui.visuals().text_color(),
        ..Default::default()
    };

    let mut job = egui::text::LayoutJob::default();
    job.wrap.max_width = ui.available_width();
    for segment in format::highlight(text, terms) {
        let mut text_format = base.clone();
        if segment.highlighted {
            text_format.background = HIGHLIGHT_BG;
            text_format.color = Color32::BLACK;
        }
        job.append(segment.text, 0.0, text_format);
    }
    ui.label(job);
}
