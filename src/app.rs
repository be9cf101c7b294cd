use crate::command::{CommandOutcome, ToolCommand};
use crate::config::SketchConfig;
use crate::file_handler::{EXPORT_FILE_NAME, FileHandler};
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};
use crate::state::EditorContext;

/// The eframe front end: panels and input glue around an [`EditorContext`].
pub struct SketchApp {
    /// Persisted between runs; style and mode are refreshed from the editor on save
    config: SketchConfig,
    editor: EditorContext,
    input: InputHandler,
    file_handler: FileHandler,
    canvas_texture: Option<egui::TextureHandle>,
    /// Surface revision last uploaded to `canvas_texture`
    uploaded_revision: Option<u64>,
    /// Last message shown in the status line
    status: Option<String>,
}

impl Default for SketchApp {
    fn default() -> Self {
        Self::with_config(SketchConfig::default())
    }
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = cc
            .storage
            .and_then(|storage| eframe::get_value::<SketchConfig>(storage, eframe::APP_KEY))
            .unwrap_or_default();
        Self::with_config(config)
    }

    pub fn with_config(config: SketchConfig) -> Self {
        let editor = EditorContext::new(&config);
        Self {
            config,
            editor,
            input: InputHandler::new(),
            file_handler: FileHandler::new(),
            canvas_texture: None,
            uploaded_revision: None,
            status: None,
        }
    }

    pub fn editor(&self) -> &EditorContext {
        &self.editor
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Run a command from a button or shortcut, saving exports and reporting errors.
    pub fn run_command(&mut self, command: ToolCommand) {
        match self.editor.execute(command) {
            Ok(CommandOutcome::Done) => {}
            Ok(CommandOutcome::Exported(bytes)) => {
                match self.file_handler.save_png(&bytes, EXPORT_FILE_NAME) {
                    Ok(()) => {
                        self.status = self
                            .file_handler
                            .last_export()
                            .map(|location| format!("Exported to {location}"));
                    }
                    Err(err) => self.report(err),
                }
            }
            Err(err) => self.report(err),
        }
    }

    fn report(&mut self, err: crate::error::SketchError) {
        log::error!("{err}");
        self.status = Some(err.to_string());
    }

    /// Feed this frame's canvas input to the editor. `visible_rect` is the
    /// clip rect of the scroll area holding the canvas.
    pub(crate) fn handle_canvas_input(
        &mut self,
        ctx: &egui::Context,
        canvas_rect: egui::Rect,
        visible_rect: egui::Rect,
    ) {
        for event in self.input.process_input(ctx, canvas_rect, visible_rect) {
            self.editor.handle_input(&event);
        }
    }

    /// Texture showing the surface, re-uploaded only when the surface changed.
    pub(crate) fn canvas_texture(&mut self, ctx: &egui::Context) -> &egui::TextureHandle {
        let surface = self.editor.surface();
        let revision = surface.revision();
        let stale = self.uploaded_revision != Some(revision);

        let texture = self.canvas_texture.get_or_insert_with(|| {
            ctx.load_texture("canvas", surface.to_color_image(), egui::TextureOptions::NEAREST)
        });
        if stale {
            texture.set(surface.to_color_image(), egui::TextureOptions::NEAREST);
            self.uploaded_revision = Some(revision);
        }
        texture
    }
}

impl eframe::App for SketchApp {
    /// Called by the framework to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.config.style = *self.editor.style();
        self.config.mode = self.editor.mode();
        eframe::set_value(storage, eframe::APP_KEY, &self.config);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for command in self.input.shortcut_commands(ctx) {
            self.run_command(command);
        }

        tools_panel(self, ctx);
        central_panel(self, ctx);

        if self.input.is_dragging() {
            ctx.request_repaint();
        }
    }
}
