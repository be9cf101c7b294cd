use crate::SketchApp;

pub fn central_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let surface = app.editor().surface();
        let size = egui::vec2(surface.width() as f32, surface.height() as f32);

        egui::ScrollArea::both().show(ui, |ui| {
            let (canvas_rect, response) = ui.allocate_exact_size(size, egui::Sense::drag());

            app.handle_canvas_input(ctx, canvas_rect, ui.clip_rect());

            let texture = app.canvas_texture(ctx);
            ui.painter().image(
                texture.id(),
                canvas_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );

            if response.hovered() {
                ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
            }
        });
    });
}
