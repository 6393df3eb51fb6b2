use eframe::egui;

#[derive(Default)]
pub struct InputActions {
    pub submit: bool,
    pub clear_requested: bool,
}

pub fn render(ui: &mut egui::Ui, input_text: &mut String, busy: bool) -> InputActions {
    let mut actions = InputActions::default();

    ui.horizontal(|ui| {
        let send_width = 140.0;
        let input = egui::TextEdit::singleline(input_text)
            .hint_text("Ej: ¿Qué es la inteligencia artificial? ¿Qué son los algoritmos genéticos?")
            .desired_width((ui.available_width() - send_width).max(120.0));
        let response = ui.add_enabled(!busy, input);

        let label = if busy { "Buscando..." } else { "Enviar" };
        let can_send = !busy && !input_text.trim().is_empty();
        if ui.add_enabled(can_send, egui::Button::new(label)).clicked() {
            actions.submit = true;
        }

        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            actions.submit = true;
            response.request_focus();
        }
    });

    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Presiona Enter para enviar").small().weak());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button("🗑 Limpiar chat").clicked() {
                actions.clear_requested = true;
            }
        });
    });

    actions
}
