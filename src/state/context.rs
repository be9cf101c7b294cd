//! The single owner of everything the sketch engine mutates.
//!
//! `EditorContext` holds the surface, the undo history, the tool state
//! machine and the current style. Pointer events arrive through
//! [`EditorContext::handle_input`]; discrete commands go through
//! [`ToolCommand::execute`](crate::command::ToolCommand::execute), which calls
//! the methods below.
//!
//! The surface always shows either the history's current snapshot or that
//! snapshot plus the preview of the gesture in progress.

use crate::command::{CommandOutcome, HistoryStack, ToolCommand};
use crate::config::SketchConfig;
use crate::error::SketchResult;
use crate::input::InputEvent;
use crate::style::Style;
use crate::surface::Surface;
use crate::tools::{Mode, ToolStateMachine};

#[derive(Debug)]
pub struct EditorContext {
    surface: Surface,
    history: HistoryStack,
    tools: ToolStateMachine,
    style: Style,
}

impl EditorContext {
    /// Creates a blank canvas as described by `config`.
    pub fn new(config: &SketchConfig) -> Self {
        let surface = Surface::new(config.width, config.height, config.background);
        let base = surface.snapshot();
        let history = match config.history_limit {
            Some(limit) => HistoryStack::with_limit(base, limit),
            None => HistoryStack::new(base),
        };
        let mut style = config.style;
        if let Err(err) = style.set_line_width(config.style.line_width) {
            log::warn!("{err}, falling back to the default width");
            style.line_width = Style::default().line_width;
        }
        log::info!(
            "Created {}x{} canvas (history limit: {:?})",
            config.width,
            config.height,
            config.history_limit
        );
        Self {
            surface,
            history,
            tools: ToolStateMachine::new(config.mode),
            style,
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn tools(&self) -> &ToolStateMachine {
        &self.tools
    }

    pub fn mode(&self) -> Mode {
        self.tools.mode()
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    /// Route a pointer event to the tool state machine, committing the result of a finished gesture.
    pub fn handle_input(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown { position, .. } => {
                self.tools.on_pointer_down(position, self.history.current());
            }
            InputEvent::PointerMove { position, modifier } => {
                self.tools
                    .on_pointer_move(position, modifier, &mut self.surface, &self.style);
            }
            InputEvent::PointerUp { position, modifier } => {
                if let Some(snapshot) =
                    self.tools
                        .on_pointer_up(position, modifier, &mut self.surface, &self.style)
                {
                    self.history.commit(snapshot);
                    log::debug!("Committed gesture, history: {:?}", self.history);
                }
            }
        }
    }

    /// Convenience for `command.execute(self)`
    pub fn execute(&mut self, command: ToolCommand) -> SketchResult<CommandOutcome> {
        command.execute(self)
    }

    pub fn select_mode(&mut self, mode: Mode) {
        self.tools.select_mode(mode, &mut self.surface);
    }

    pub fn toggle_eraser(&mut self) {
        self.tools.toggle_eraser(&mut self.surface);
    }

    /// Step back one commit. Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.tools.cancel(&mut self.surface);
        match self.history.undo() {
            Some(snapshot) => {
                self.surface.restore(&snapshot);
                true
            }
            None => {
                log::debug!("Nothing to undo");
                false
            }
        }
    }

    /// Step forward one undone commit. Returns false if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.tools.cancel(&mut self.surface);
        match self.history.redo() {
            Some(snapshot) => {
                self.surface.restore(&snapshot);
                true
            }
            None => {
                log::debug!("Nothing to redo");
                false
            }
        }
    }

    /// Wipe the whole canvas to the background color and commit the result.
    pub fn clear(&mut self) {
        self.tools.cancel(&mut self.surface);
        self.surface.clear(None);
        self.history.commit(self.surface.snapshot());
        log::info!("Canvas cleared");
    }

    /// PNG encoding of the committed canvas. A gesture in progress is not
    /// included.
    pub fn export_png(&self) -> SketchResult<Vec<u8>> {
        if self.tools.is_active() {
            let mut committed = Surface::new(0, 0, self.surface.background());
            committed.restore(&self.history.current());
            return committed.encode_png();
        }
        self.surface.encode_png()
    }
}
