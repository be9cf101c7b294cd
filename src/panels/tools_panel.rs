use crate::SketchApp;
use crate::command::ToolCommand;
use crate::input::mode_shortcut;
use crate::style::{MAX_LINE_WIDTH, MIN_LINE_WIDTH, color_to_hex};
use crate::tools::Mode;

pub fn tools_panel(app: &mut SketchApp, ctx: &egui::Context) {
    // Collected first so the editor is not borrowed while commands run
    let mut commands = Vec::new();

    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(180.0)
        .show(ctx, |ui| {
            let editor = app.editor();

            ui.heading("Tools");
            let active_mode = editor.mode();
            for mode in Mode::ALL {
                let label = format!("{} ({})", mode.name(), mode_shortcut(mode));
                if ui.selectable_label(active_mode == mode, label).clicked() {
                    log::info!("Tool selected from UI: {}", mode.name());
                    commands.push(ToolCommand::select(mode));
                }
            }
            ui.separator();

            ui.horizontal(|ui| {
                let history = editor.history();
                if ui.add_enabled(history.can_undo(), egui::Button::new("Undo")).clicked() {
                    commands.push(ToolCommand::Undo);
                }
                if ui.add_enabled(history.can_redo(), egui::Button::new("Redo")).clicked() {
                    commands.push(ToolCommand::Redo);
                }
                if ui.button("Clear").clicked() {
                    commands.push(ToolCommand::Clear);
                }
            });
            ui.separator();

            let style = *editor.style();
            ui.horizontal(|ui| {
                ui.label("Color:");
                let mut color = style.stroke_color;
                if egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut color,
                    egui::color_picker::Alpha::Opaque,
                )
                .changed()
                {
                    commands.push(ToolCommand::SetColor(color_to_hex(color)));
                }
            });
            ui.horizontal(|ui| {
                ui.label("Size:");
                let mut width = style.line_width;
                if ui
                    .add(egui::Slider::new(&mut width, MIN_LINE_WIDTH..=MAX_LINE_WIDTH))
                    .changed()
                {
                    commands.push(ToolCommand::SetLineWidth(width));
                }
            });
            ui.separator();

            if ui.button("Export PNG").clicked() {
                commands.push(ToolCommand::Export);
            }
            ui.separator();

            let history = editor.history();
            ui.label(format!("History entries: {}", history.len()));
            ui.label(format!("Redo stack size: {}", history.redo_len()));
            ui.label(format!("Gesture: {}", editor.tools().gesture().name()));
            if let Some(status) = app.status() {
                ui.separator();
                ui.label(status);
            }
        });

    for command in commands {
        app.run_command(command);
    }
}
