use eframe::egui;

/// Modal-style notice. Returns `true` once the user dismisses it.
pub fn notice(ctx: &egui::Context, text: &str) -> bool {
    let mut dismissed = false;
    centered_window("Aviso").show(ctx, |ui| {
        ui.label(text);
        ui.add_space(8.0);
        if ui.button("Aceptar").clicked() {
            dismissed = true;
        }
    });
    dismissed
}

/// Clear-chat confirmation: `Some(true)` confirmed, `Some(false)` cancelled.
pub fn confirm_clear(ctx: &egui::Context) -> Option<bool> {
    let mut answer = None;
    centered_window("Limpiar chat").show(ctx, |ui| {
        ui.label("¿Estás seguro de que quieres limpiar el chat?");
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button("Sí, limpiar").clicked() {
                answer = Some(true);
            }
            if ui.button("Cancelar").clicked() {
                answer = Some(false);
            }
        });
    });
    answer
}

fn centered_window(title: &str) -> egui::Window<'_> {
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
}
